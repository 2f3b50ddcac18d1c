pub mod cli;
pub mod config;
pub mod errors;
pub mod file_ops;
pub mod hashers;
pub mod importer;
pub mod logging;
pub mod models;
pub mod spreadsheet;
pub mod storage;
pub mod utils;
