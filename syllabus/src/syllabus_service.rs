use crate::config::{Config, ExtractorConfig};
use crate::conversion_service::ConversionService;
use crate::document_processor::{decode_base64_pdf, DocumentProcessor};
use crate::error::Result;
use crate::gemini_service::{build_prompt, GeminiService};
use crate::response_parser::extract_json;
use crate::utils::truncate_for_log;
use serde_json::Value;

/// Where PDF text comes from for a given deployment.
pub enum TextSource {
    Local(DocumentProcessor),
    Conversion(ConversionService),
}

impl TextSource {
    pub fn from_config(config: &ExtractorConfig) -> Self {
        match config {
            ExtractorConfig::Local => TextSource::Local(DocumentProcessor::new()),
            ExtractorConfig::Conversion(conversion) => {
                TextSource::Conversion(ConversionService::new(conversion))
            }
        }
    }

    pub async fn extract(&self, pdf: Vec<u8>) -> Result<String> {
        match self {
            TextSource::Local(processor) => processor.extract_text(pdf).await,
            TextSource::Conversion(service) => service.convert_to_text(pdf).await,
        }
    }
}

/// PDF in, model-produced JSON out. Each step finishes before the next starts.
pub struct SyllabusService {
    text_source: TextSource,
    gemini_service: GeminiService,
}

impl SyllabusService {
    pub fn new(text_source: TextSource, gemini_service: GeminiService) -> Self {
        Self {
            text_source,
            gemini_service,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TextSource::from_config(&config.extractor),
            GeminiService::new(&config.gemini),
        )
    }

    /// Decodes a base64 `file` payload and runs it through [`parse_pdf`](Self::parse_pdf).
    pub async fn parse_base64(&self, file: &str) -> Result<Value> {
        let pdf = decode_base64_pdf(file)?;
        self.parse_pdf(pdf).await
    }

    pub async fn parse_pdf(&self, pdf: Vec<u8>) -> Result<Value> {
        let start_time = std::time::Instant::now();

        let text = self.text_source.extract(pdf).await?;
        log::info!(
            "Extracted {} characters: {}",
            text.chars().count(),
            truncate_for_log(&text, 200)
        );

        let reply = self.gemini_service.generate_content(build_prompt(&text)).await?;
        let parsed = extract_json(&reply)?;

        log::info!("Syllabus parsed in {} ms", start_time.elapsed().as_millis());
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeminiConfig;
    use crate::test_util::one_page_pdf;
    use crate::error::ServiceError;
    use axum::{Json, Router};
    use base64::Engine;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    async fn fake_gemini(reply_text: &'static str, prompts: Arc<Mutex<Vec<String>>>) -> String {
        let app = Router::new().fallback(move |Json(body): Json<Value>| {
            let prompts = prompts.clone();
            async move {
                let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
                prompts.lock().unwrap().push(prompt.to_string());
                Json(json!({ "candidates": [{ "content": { "parts": [{ "text": reply_text }] } }] }))
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{}/v1beta", addr)
    }

    fn service(base_url: String) -> SyllabusService {
        SyllabusService::new(
            TextSource::Local(DocumentProcessor::new()),
            GeminiService::new(&GeminiConfig {
                api_key: "test-key".to_string(),
                model: "gemini-2.0-flash".to_string(),
                base_url,
            }),
        )
    }

    #[tokio::test]
    async fn pdf_text_reaches_the_prompt_and_reply_is_parsed() {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let base = fake_gemini("```json\n{\"courseTitle\":\"CS101\"}\n```", prompts.clone()).await;

        let pdf = one_page_pdf(&["CS101 Introduction to Computing"]);
        let encoded = base64::engine::general_purpose::STANDARD.encode(&pdf);
        let result = service(base).parse_base64(&encoded).await.unwrap();

        assert_eq!(result, json!({"courseTitle": "CS101"}));
        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        let (_, syllabus_text) = prompts[0].split_once("Here's the syllabus content:\n\n").unwrap();
        assert!(syllabus_text.contains("CS101"));
        assert!(syllabus_text.contains("Computing"));
    }

    #[tokio::test]
    async fn unparseable_reply_carries_raw_text() {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let base = fake_gemini("Sorry, I can't read that syllabus.", prompts).await;

        let pdf = one_page_pdf(&["Syllabus"]);
        match service(base).parse_pdf(pdf).await {
            Err(ServiceError::Parse { raw_text, .. }) => {
                assert_eq!(raw_text, "Sorry, I can't read that syllabus.")
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn bad_pdf_never_reaches_gemini() {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let base = fake_gemini("{}", prompts.clone()).await;

        let result = service(base).parse_pdf(b"plain text, not a pdf".to_vec()).await;
        assert!(matches!(result, Err(ServiceError::Extraction(_))));
        assert!(prompts.lock().unwrap().is_empty());
    }
}
