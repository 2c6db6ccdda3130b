pub mod json;
pub mod text;

use crate::error::StarcheckError;
use crate::types::report::SuspicionReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Text,
}

pub fn render(report: &SuspicionReport, format: OutputFormat) -> Result<String, StarcheckError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(StarcheckError::Json),
        OutputFormat::Text => Ok(text::to_text(report)),
    }
}
