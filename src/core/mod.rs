//! Core module - case storage, errors, and configuration

pub mod config;
pub mod error;
pub mod repository;

pub use config::Config;
pub use error::StoreError;
pub use repository::{
    filter_by_status, next_case_id, CaseRepository, InitOutcome, DEFAULT_DATA_FILE,
};
