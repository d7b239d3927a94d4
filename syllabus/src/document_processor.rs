use crate::error::{Result, ServiceError};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

/// Standard alphabet, padding optional on decode.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Local PDF text extraction backed by `pdf-extract`.
pub struct DocumentProcessor;

impl DocumentProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts the plain text of a PDF held in memory.
    ///
    /// `pdf-extract` is synchronous and can panic on unusual font data, so it
    /// runs on the blocking pool; a panic there surfaces as an extraction error.
    pub async fn extract_text(&self, pdf: Vec<u8>) -> Result<String> {
        log::info!("Extracting text from PDF ({} bytes)", pdf.len());

        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
            .await
            .map_err(|e| ServiceError::Extraction(format!("extractor aborted: {}", e)))?
            .map_err(|e| ServiceError::Extraction(e.to_string()))?;

        if text.trim().is_empty() {
            log::warn!("PDF contained no extractable text");
        }
        Ok(text)
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes the base64 `file` payload of a request.
///
/// Whitespace and line breaks anywhere in the payload are ignored, trailing
/// `=` padding is optional, and a `data:<mime>;base64,` prefix is stripped.
pub fn decode_base64_pdf(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let payload = match trimmed.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(',')
            .map(|(_, data)| data)
            .ok_or_else(|| ServiceError::Input("Malformed data URL in file field".to_string()))?,
        None => trimmed,
    };

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(ServiceError::Input("Missing Base64 file".to_string()));
    }

    LENIENT_BASE64
        .decode(compact.as_bytes())
        .map_err(|e| ServiceError::Input(format!("Invalid Base64 file: {}", e)))
}
