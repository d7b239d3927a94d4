pub mod config;
pub mod conversion_service;
pub mod document_processor;
pub mod error;
pub mod gemini_service;
pub mod models;
pub mod response_parser;
pub mod syllabus_service;
#[cfg(any(test, feature = "test-util"))]
pub mod test_util;
pub mod utils;

pub use config::Config;
pub use conversion_service::ConversionService;
pub use document_processor::DocumentProcessor;
pub use error::{Result, ServiceError};
pub use gemini_service::GeminiService;
pub use models::*;
pub use response_parser::extract_json;
pub use syllabus_service::{SyllabusService, TextSource};
