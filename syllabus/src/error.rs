use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Failures a syllabus request can end in.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Missing or undecodable `file` payload.
    #[error("{0}")]
    Input(String),

    #[error("PDF text extraction failed: {0}")]
    Extraction(String),

    /// Generation or conversion API answered with a failure status or an
    /// envelope missing the expected fields. `raw` holds the body when we got one.
    #[error("{message}")]
    Upstream { message: String, raw: Option<String> },

    /// The model reply was not valid JSON after fence stripping.
    #[error("{message}")]
    Parse { message: String, raw_text: String },

    #[error("conversion job {job_id} did not finish after {attempts} status checks")]
    ConversionTimeout { job_id: String, attempts: u32 },

    /// Transport failure. The request URL is stripped before wrapping.
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Http(err.without_url())
    }
}

impl ServiceError {
    pub fn upstream(message: impl Into<String>, raw: Option<String>) -> Self {
        ServiceError::Upstream {
            message: message.into(),
            raw,
        }
    }
}
