//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Malformed month '{0}': expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Month out of supported range: {0}")]
    MonthOutOfRange(String),

    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: String, to: String },

    #[error("Invalid shift: {0}")]
    InvalidShift(String),

    #[error("Invalid attendance status: {0}")]
    InvalidStatus(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payroll {0} is already paid and can no longer be changed")]
    AlreadyPaid(String),

    #[error("Invalid line item index: {0}")]
    InvalidIndex(usize),

    #[error(
        "Write conflict on payroll for employee {employee_id}, store {store_id}, month {month}: the record changed, reload and retry"
    )]
    WriteConflict {
        employee_id: String,
        store_id: String,
        month: String,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    #[error("Configuration format error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
