//! Spreadsheet to JSON conversion: normalizes every row for the full export
//! and reduces them to the certificate schema for the verification store.

use crate::config::Settings;
use crate::errors::CertError;
use crate::file_ops;
use crate::models::Certificate;
use crate::spreadsheet::{self, Row};
use crate::storage::CertificateStore;
use crate::utils;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

pub const PHONE_COLUMN: &str = "Phone";

/// What a run produced, for the summary.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub rows: Vec<Row>,
    pub certificates: Vec<Certificate>,
    pub export_path: PathBuf,
    pub export_digest: String,
    pub store_path: PathBuf,
    pub store_digest: String,
}

/// Phone becomes a digit string (or `""`, adding the key when the column is
/// absent); every other missing value becomes `""`.
pub fn normalize_rows(rows: &mut [Row]) {
    for row in rows.iter_mut() {
        let phone = match row.get(PHONE_COLUMN) {
            Some(v) if !utils::is_missing(v) => utils::normalize_phone(v),
            _ => String::new(),
        };
        row.insert(PHONE_COLUMN.to_string(), Value::String(phone));

        for value in row.values_mut() {
            if utils::is_missing(value) {
                *value = Value::String(String::new());
            }
        }
    }
}

pub fn to_certificate(row: &Row, event: &str, date: &str) -> Certificate {
    let text = |column: &str| row.get(column).map(utils::cell_text).unwrap_or_default();
    Certificate {
        cert_id: text("Certificate ID"),
        name: text("Participant Name"),
        team_name: text("Team Name"),
        college: text("College"),
        startup_idea: text("Startup Idea Title"),
        email: text("Email"),
        phone: text(PHONE_COLUMN),
        event: event.to_string(),
        date: date.to_string(),
        extra: Map::new(),
    }
}

pub fn to_certificates(rows: &[Row], event: &str, date: &str) -> Vec<Certificate> {
    let certs: Vec<Certificate> = rows.iter().map(|r| to_certificate(r, event, date)).collect();
    let blank_ids = certs.iter().filter(|c| c.cert_id.is_empty()).count();
    if blank_ids > 0 {
        warn!(blank_ids, "rows without a Certificate ID");
    }
    certs
}

/// Reads the spreadsheet and overwrites both output files.
pub fn run(settings: &Settings) -> Result<ImportReport, CertError> {
    let mut rows = spreadsheet::read_rows(&settings.spreadsheet)?;
    normalize_rows(&mut rows);

    file_ops::write_json_atomic(&settings.export, &rows)?;
    let export_digest = file_ops::compute_file_hash(&settings.export)?;

    let certificates = to_certificates(&rows, &settings.event, &settings.event_date);
    let store = CertificateStore::new(&settings.store);
    store.save_all(&certificates)?;
    let store_digest = file_ops::compute_file_hash(store.path())?;

    info!(
        input = %settings.spreadsheet.display(),
        rows = rows.len(),
        export = %settings.export.display(),
        store = %settings.store.display(),
        "import complete"
    );

    Ok(ImportReport {
        rows,
        certificates,
        export_path: settings.export.clone(),
        export_digest,
        store_path: settings.store.clone(),
        store_digest,
    })
}

pub fn print_summary<W: Write>(out: &mut W, report: &ImportReport) -> anyhow::Result<()> {
    writeln!(out, "Data converted successfully!")?;
    writeln!(out, "Total participants: {}", report.rows.len())?;
    writeln!(out, "Written to {} (blake3 {})", report.export_path.display(), report.export_digest)?;
    preview(out, "Sample data:", report.rows.first())?;

    writeln!(out)?;
    writeln!(out, "Simplified data created for verification system!")?;
    writeln!(out, "Total certificates: {}", report.certificates.len())?;
    writeln!(out, "Written to {} (blake3 {})", report.store_path.display(), report.store_digest)?;
    preview(out, "Sample simplified data:", report.certificates.first())?;
    Ok(())
}

fn preview<W: Write, T: serde::Serialize>(out: &mut W, title: &str, first: Option<&T>) -> anyhow::Result<()> {
    writeln!(out)?;
    match first {
        Some(record) => {
            writeln!(out, "{title}")?;
            writeln!(out, "{}", serde_json::to_string_pretty(record)?)?;
        }
        None => writeln!(out, "(no rows)")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn missing_phone_becomes_empty_string() {
        let mut rows = vec![
            row(json!({"Certificate ID": "E-1", "Phone": null})),
            row(json!({"Certificate ID": "E-2"})),
        ];
        normalize_rows(&mut rows);
        assert_eq!(rows[0]["Phone"], json!(""));
        assert_eq!(rows[1]["Phone"], json!(""));
        let certs = to_certificates(&rows, "Ev", "01-01-2025");
        assert!(certs.iter().all(|c| c.phone.is_empty()));
    }

    #[test]
    fn numeric_phone_becomes_digit_string() {
        let mut rows = vec![row(json!({"Phone": 9876543210.0}))];
        normalize_rows(&mut rows);
        assert_eq!(rows[0]["Phone"], json!("9876543210"));
        assert_eq!(to_certificate(&rows[0], "Ev", "D").phone, "9876543210");
    }

    #[test]
    fn na_text_cells_become_empty_strings() {
        let mut rows = vec![row(json!({"Email": "N/A", "Phone": "nan", "College": "NA", "Team Name": "Nanda"}))];
        normalize_rows(&mut rows);
        assert_eq!(rows[0]["Email"], json!(""));
        assert_eq!(rows[0]["Phone"], json!(""));
        assert_eq!(rows[0]["College"], json!(""));
        assert_eq!(rows[0]["Team Name"], json!("Nanda"));
        let cert = to_certificate(&rows[0], "Ev", "D");
        assert_eq!((cert.email.as_str(), cert.phone.as_str()), ("", ""));
    }

    #[test]
    fn other_missing_values_become_empty_and_extra_columns_pass_through() {
        let mut rows = vec![row(json!({"College": null, "Score": 8.5, "Email": "a@x.in"}))];
        normalize_rows(&mut rows);
        assert_eq!(rows[0]["College"], json!(""));
        assert_eq!(rows[0]["Score"], json!(8.5));
        let keys: Vec<_> = rows[0].keys().cloned().collect();
        assert_eq!(keys, ["College", "Score", "Email", "Phone"]);
    }

    #[test]
    fn reduction_maps_columns_and_fixes_event() {
        let rows = vec![row(json!({
            "Certificate ID": "PITCHDECK25-001",
            "Participant Name": "Asha Verma",
            "Team Name": "Nimbus",
            "College": "UCER",
            "Startup Idea Title": "Solar kiosks",
            "Email": "asha@example.com",
            "Phone": "9876543210",
            "Mentor": "ignored"
        }))];
        let cert = &to_certificates(&rows, "Eureka! Pitching Competition 2025", "29-08-2025")[0];
        assert_eq!(cert.cert_id, "PITCHDECK25-001");
        assert_eq!(cert.name, "Asha Verma");
        assert_eq!(cert.team_name, "Nimbus");
        assert_eq!(cert.college, "UCER");
        assert_eq!(cert.startup_idea, "Solar kiosks");
        assert_eq!(cert.email, "asha@example.com");
        assert_eq!(cert.event, "Eureka! Pitching Competition 2025");
        assert_eq!(cert.date, "29-08-2025");
    }

    #[test]
    fn absent_columns_default_to_empty() {
        let cert = to_certificate(&row(json!({"Participant Name": "Ravi"})), "Ev", "D");
        assert_eq!(cert.name, "Ravi");
        assert_eq!(cert.cert_id, "");
        assert_eq!(cert.startup_idea, "");
    }

    #[test]
    fn summary_handles_empty_import() {
        let report = ImportReport {
            rows: Vec::new(),
            certificates: Vec::new(),
            export_path: PathBuf::from("all.json"),
            export_digest: "00".to_string(),
            store_path: PathBuf::from("certs.json"),
            store_digest: "11".to_string(),
        };
        let mut out = Vec::new();
        print_summary(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total participants: 0"));
        assert!(text.contains("Total certificates: 0"));
        assert!(text.contains("(no rows)"));
    }
}
