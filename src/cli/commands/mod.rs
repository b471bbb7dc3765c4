//! CLI command implementations

pub mod add;
pub mod completions;
pub mod init;
pub mod list;
pub mod update;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{CaseRepository, Config};

/// Open the case repository selected by flags, environment, or config
pub fn open_repository(global: &GlobalOpts, config: &Config) -> CaseRepository {
    let path = config.data_file(global.data_file.as_deref());
    tracing::debug!(path = %path.display(), "using data file");
    CaseRepository::new(path)
}

/// Output format from the flag, else from config, else auto
pub fn resolve_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global
        .format
        .or_else(|| {
            config
                .default_format
                .as_deref()
                .and_then(|f| f.parse::<OutputFormat>().ok())
        })
        .unwrap_or_default()
}
