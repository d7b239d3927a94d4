use crate::config::GeminiConfig;
use crate::error::{Result, ServiceError};
use crate::models::*;
use crate::utils::truncate_for_log;
use reqwest::Client;

pub struct GeminiService {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiService {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        }
    }

    /// Sends `prompt` to generateContent and returns the reply text.
    pub async fn generate_content(&self, prompt: String) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::error!("Gemini API returned {}: {}", status, truncate_for_log(&body, 200));
            return Err(ServiceError::upstream(
                format!("Gemini API error: {}", status),
                Some(body),
            ));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            log::error!("Unreadable Gemini envelope ({}): {}", e, truncate_for_log(&body, 200));
            ServiceError::upstream("Failed to extract text from Gemini response", Some(body.clone()))
        })?;

        match gemini_response.first_text() {
            Some(text) => {
                log::info!("Gemini text: {}", truncate_for_log(text, 200));
                Ok(text.to_string())
            }
            None => {
                log::error!("Gemini envelope has no candidate text: {}", truncate_for_log(&body, 200));
                Err(ServiceError::upstream(
                    "Failed to extract text from Gemini response",
                    Some(body),
                ))
            }
        }
    }
}

/// Fixed extraction instruction followed by the syllabus text, unescaped.
pub fn build_prompt(syllabus_text: &str) -> String {
    format!(
        r#"Extract the following information from this syllabus into a structured JSON format:
1. Course title
2. Course code
3. Instructor name
4. Contact information
5. Office hours
6. Grading policy
7. Important dates including assignments, exams, and project due dates
8. Important notes or policies

Format the response as valid JSON with the following structure:
{{
  "courseTitle": "string",
  "courseCode": "string",
  "instructor": "string",
  "contactInfo": "string",
  "officeHours": "string",
  "gradingPolicy": "string",
  "importantDates": [
    {{ "title": "string", "date": "string", "description": "string" }}
  ],
  "importantNotes": ["string"]
}}

Here's the syllabus content:

{syllabus_text}"#
    )
}
