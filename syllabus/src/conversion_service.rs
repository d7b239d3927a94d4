//! PDF-to-text through a job-based file conversion API (Zamzar-style).
//!
//! Submit a job, poll its status on a fixed interval up to a fixed number of
//! checks, then download the converted file. Every call authenticates with
//! the API key as the basic-auth user and an empty password.

use crate::config::ConversionConfig;
use crate::error::{Result, ServiceError};
use crate::models::{ConversionJob, ConvertedFile};
use crate::utils::truncate_for_log;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

const TARGET_FORMAT: &str = "txt";

pub struct ConversionService {
    client: Client,
    api_key: String,
    base_url: String,
    poll_interval: Duration,
    max_attempts: u32,
}

impl ConversionService {
    pub fn new(config: &ConversionConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            poll_interval: config.poll_interval,
            max_attempts: config.max_attempts,
        }
    }

    pub async fn convert_to_text(&self, pdf: Vec<u8>) -> Result<String> {
        let job = self.submit_job(pdf).await?;
        log::info!("Conversion job {} submitted ({})", job.id, job.status);

        let file = self.wait_for_job(job.id).await?;
        self.download(&file).await
    }

    pub async fn submit_job(&self, pdf: Vec<u8>) -> Result<ConversionJob> {
        let source = Part::bytes(pdf)
            .file_name("syllabus.pdf")
            .mime_str("application/pdf")?;
        let form = Form::new()
            .part("source_file", source)
            .text("target_format", TARGET_FORMAT);

        let request = self
            .authed(self.client.post(format!("{}/jobs", self.base_url)))
            .multipart(form);
        read_json(request.send().await?, "submit conversion job").await
    }

    /// Polls the job until it succeeds, fails, or `max_attempts` checks pass.
    /// Returns the converted file on success.
    pub async fn wait_for_job(&self, job_id: u64) -> Result<ConvertedFile> {
        for attempt in 1..=self.max_attempts {
            let job = self.fetch_job(job_id).await?;
            log::debug!("Conversion job {} check {}/{}: {}", job_id, attempt, self.max_attempts, job.status);

            match job.status.as_str() {
                "successful" => {
                    return job.target_files.into_iter().next().ok_or_else(|| {
                        ServiceError::upstream(
                            format!("conversion job {} succeeded without a target file", job_id),
                            None,
                        )
                    });
                }
                "failed" | "cancelled" => {
                    return Err(ServiceError::upstream(
                        format!("conversion job {} {}", job_id, job.status),
                        None,
                    ));
                }
                _ => {}
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        log::error!("Conversion job {} timed out after {} checks", job_id, self.max_attempts);
        Err(ServiceError::ConversionTimeout {
            job_id: job_id.to_string(),
            attempts: self.max_attempts,
        })
    }

    async fn fetch_job(&self, job_id: u64) -> Result<ConversionJob> {
        let request = self.authed(self.client.get(format!("{}/jobs/{}", self.base_url, job_id)));
        read_json(request.send().await?, "check conversion job").await
    }

    async fn download(&self, file: &ConvertedFile) -> Result<String> {
        let request = self.authed(
            self.client
                .get(format!("{}/files/{}/content", self.base_url, file.id)),
        );
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            log::error!("Converted file download returned {}: {}", status, truncate_for_log(&body, 200));
            return Err(ServiceError::upstream(
                format!("Failed to download converted file: {}", status),
                Some(body),
            ));
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.api_key, Some(""))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        log::error!("Failed to {}: {} {}", action, status, truncate_for_log(&body, 200));
        return Err(ServiceError::upstream(
            format!("Failed to {}: {}", action, status),
            Some(body),
        ));
    }

    serde_json::from_str(&body).map_err(|e| {
        ServiceError::upstream(format!("Failed to {}: unexpected response ({})", action, e), Some(body))
    })
}
