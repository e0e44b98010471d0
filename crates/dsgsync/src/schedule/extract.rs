use std::path::Path;

use crate::error::ScheduleError;

/// Produces the plain text of a schedule document.
pub trait TextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ScheduleError>;
}

/// Page-by-page text from the PDF's content streams. Pages lopdf cannot
/// decode are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ScheduleError> {
        let _span = tracing::info_span!("schedule.extract_text").entered();

        let bytes = std::fs::read(path).map_err(|e| ScheduleError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let doc = lopdf::Document::load_mem(&bytes).map_err(|e| ScheduleError::PdfParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut text = String::new();
        for (page_num, _) in doc.get_pages() {
            match doc.extract_text(&[page_num]) {
                Ok(page_text) => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Err(e) => log::debug!("Page {} has no extractable text: {}", page_num, e),
            }
        }

        Ok(text)
    }
}
