//! SAV: service-after-sale case tracker
//!
//! Keeps support cases in a single JSON file that can be shared through
//! git. Every change reads the whole file, edits it in memory, and writes
//! the whole file back.

pub mod cli;
pub mod core;
pub mod entities;
