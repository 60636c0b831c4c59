use thiserror::Error;

/// Structural load failures. These abort the whole load; bad numeric cells
/// do not appear here — they degrade to missing values in the coercion pass.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("reading source file: {0}")]
    Io(#[from] std::io::Error),

    #[error("reading workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a top-level JSON array of records")]
    JsonShape,

    #[error("workbook contains no worksheets")]
    NoWorksheet,

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// `row` is the spreadsheet row number (header row = 1).
    #[error("row {row}: '{value}' is not a day-first date (expected e.g. 31/12/2024)")]
    DateParse { row: usize, value: String },
}
