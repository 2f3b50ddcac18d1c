use crate::errors::CertError;
use crate::storage::DB_FILE;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

pub const SPREADSHEET_FILE: &str = "final_all_participants_certificates.xlsx";
pub const EXPORT_FILE: &str = "all_participants_data.json";
pub const DEFAULT_EVENT: &str = "Eureka! Pitching Competition 2025";
pub const DEFAULT_EVENT_DATE: &str = "29-08-2025";
pub const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub store: PathBuf,
    pub export: PathBuf,
    pub spreadsheet: PathBuf,
    pub event: String,
    /// Always `DD-MM-YYYY`.
    pub event_date: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            store: PathBuf::from(DB_FILE),
            export: PathBuf::from(EXPORT_FILE),
            spreadsheet: PathBuf::from(SPREADSHEET_FILE),
            event: DEFAULT_EVENT.to_string(),
            event_date: DEFAULT_EVENT_DATE.to_string(),
        }
    }
}

/// Store location shared by both binaries.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Certificate store file.
    #[arg(long, env = "CERTFILE_STORE", default_value = DB_FILE)]
    pub store: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Spreadsheet to convert (first worksheet is read).
    #[arg(long, env = "CERTFILE_SPREADSHEET", default_value = SPREADSHEET_FILE)]
    pub input: PathBuf,

    /// Full normalized export of every row.
    #[arg(long, env = "CERTFILE_EXPORT", default_value = EXPORT_FILE)]
    pub export: PathBuf,

    /// Event name written into every certificate.
    #[arg(long, env = "CERTFILE_EVENT", default_value = DEFAULT_EVENT)]
    pub event: String,

    /// Event date, DD-MM-YYYY.
    #[arg(long, env = "CERTFILE_EVENT_DATE", default_value = DEFAULT_EVENT_DATE)]
    pub date: String,
}

impl Settings {
    pub fn from_store_args(args: StoreArgs) -> Self {
        Settings { store: args.store, ..Settings::default() }
    }

    pub fn from_import_args(args: ImportArgs) -> Result<Self, CertError> {
        Ok(Settings {
            store: args.store.store,
            export: args.export,
            spreadsheet: args.input,
            event: args.event,
            event_date: normalize_event_date(&args.date)?,
        })
    }
}

/// Parses a `DD-MM-YYYY` date and returns it zero-padded in the same format.
pub fn normalize_event_date(s: &str) -> Result<String, CertError> {
    let date = NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| CertError::InvalidDate(s.to_string()))?;
    Ok(date.format(DATE_FORMAT).to_string())
}
