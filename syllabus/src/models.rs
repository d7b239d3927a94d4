use serde::{Deserialize, Serialize};

/// Structured syllabus as the prompt asks the model to produce it.
///
/// Nothing enforces this shape on the model reply; the pipeline hands back
/// whatever JSON value the model produced. This type is for callers that want
/// typed access and can live with missing fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyllabusData {
    pub course_title: String,
    pub course_code: String,
    pub instructor: String,
    pub contact_info: String,
    pub office_hours: String,
    pub grading_policy: String,
    pub important_dates: Vec<ImportantDate>,
    pub important_notes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportantDate {
    pub title: String,
    pub date: String,
    pub description: String,
}

impl SyllabusData {
    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiCandidate {
    pub content: Option<GeminiContent>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate, if the envelope has one.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .map(|p| p.text.as_str())
    }
}

/// Job record returned by the conversion API on submit and on status checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionJob {
    pub id: u64,
    pub status: String,
    #[serde(default)]
    pub target_files: Vec<ConvertedFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertedFile {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}
