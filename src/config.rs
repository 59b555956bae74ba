//! Runtime configuration shared by the `explore` and `report` commands.

use std::path::PathBuf;

use crate::execution::ExecutionOptions;
use crate::stats::ReportKind;

/// Environment variable naming the directory holding the city CSV files.
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";

/// Rows shown per page by the raw data view.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text, one block per report.
    #[default]
    Text,
    /// One JSON document containing every report.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

/// Options for one explorer session.
///
/// Use [`Default`] for common cases.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Directory containing `chicago.csv`, `new_york_city.csv` and `washington.csv`.
    pub data_dir: PathBuf,
    /// Rows per page in the raw data view.
    pub page_size: usize,
    /// Reports to compute, in display order.
    pub reports: Vec<ReportKind>,
    pub execution: ExecutionOptions,
    pub format: OutputFormat,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            page_size: DEFAULT_PAGE_SIZE,
            reports: ReportKind::ALL.to_vec(),
            execution: ExecutionOptions::default(),
            format: OutputFormat::default(),
        }
    }
}
