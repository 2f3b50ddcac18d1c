use crate::errors::CertError;
use crate::utils;
use calamine::{open_workbook_auto, Data, DataType, Reader};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// One sheet row keyed by column header, in sheet column order.
pub type Row = Map<String, Value>;

/// Reads the first worksheet. The first non-empty row supplies the headers.
pub fn read_rows(path: &Path) -> Result<Vec<Row>, CertError> {
    let fail = |message: String| CertError::Spreadsheet { path: path.to_path_buf(), message };

    let mut workbook = open_workbook_auto(path).map_err(|e| fail(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| fail("workbook has no worksheets".to_string()))?
        .map_err(|e| fail(e.to_string()))?;
    debug!(path = %path.display(), height = range.height(), width = range.width(), "worksheet loaded");

    let cells = range.rows().map(|r| r.iter().map(cell_to_value).collect()).collect();
    rows_from_cells(cells).ok_or_else(|| CertError::MissingHeader(path.to_path_buf()))
}

/// Missing, error and non-finite cells become `null`.
pub fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
            Some(dt) => Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => Value::String(cell.to_string()),
        },
        Data::DurationIso(s) => Value::String(s.clone()),
    }
}

/// Turns a grid of cells into header-keyed rows. `None` when every row is
/// blank. Blank data rows are skipped.
pub fn rows_from_cells(cells: Vec<Vec<Value>>) -> Option<Vec<Row>> {
    let mut grid = cells.into_iter().skip_while(|r| is_blank(r));
    let headers = header_names(&grid.next()?);

    let rows = grid
        .filter(|r| !is_blank(r))
        .map(|cells| {
            let mut cells = cells.into_iter();
            headers
                .iter()
                .map(|h| (h.clone(), cells.next().unwrap_or(Value::Null)))
                .collect()
        })
        .collect();
    Some(rows)
}

fn is_blank(row: &[Value]) -> bool {
    row.iter().all(|v| match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    })
}

/// Blank headers become `Unnamed: <i>`; repeats get `.1`, `.2`, ...
fn header_names(row: &[Value]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    row.iter()
        .enumerate()
        .map(|(i, v)| {
            let text = utils::cell_text(v).trim().to_string();
            let base = if text.is_empty() { format!("Unnamed: {i}") } else { text };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 { base } else { format!("{base}.{count}") };
            *count += 1;
            name
        })
        .collect()
}
