use serde::Deserialize;

#[derive(Deserialize)]
pub struct ParseRequest {
    /// Base64-encoded PDF.
    pub file: Option<String>,
}
