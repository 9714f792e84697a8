use sales_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::Llm;
use crate::ollama::OllamaClient;

#[derive(Debug, Clone)]
pub struct OllamaLlm {
    client: OllamaClient,
    timeout: std::time::Duration,
}

impl OllamaLlm {
    pub fn new(client: OllamaClient) -> Self {
        Self {
            client,
            timeout: std::time::Duration::from_secs(120),
        }
    }

    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Clone, Serialize)]
struct GenerateOptions {
    num_predict: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl Llm for OllamaLlm {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, AppError> {
        let url = format!("{}/api/generate", self.client.base_url());
        let req = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: GenerateOptions { num_predict: 6000 },
        };

        let resp = ureq::post(&url)
            .timeout(self.timeout)
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("AI_SUMMARY_FAILED", "Failed to encode summary request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: GenerateResponse = r.into_json().map_err(|e| {
                    AppError::new("AI_SUMMARY_FAILED", "Failed to decode summary response")
                        .with_details(e.to_string())
                })?;
                if v.response.trim().is_empty() {
                    return Err(AppError::new("AI_SUMMARY_FAILED", "Summary response was empty"));
                }
                Ok(v.response)
            }
            Ok(r) => Err(
                AppError::new("AI_SUMMARY_FAILED", "Summary request failed")
                    .with_details(format!("model={model}; status={}", r.status())),
            ),
            Err(e) => Err(
                AppError::new("AI_SUMMARY_FAILED", "Failed to call generate endpoint")
                    .with_details(format!("model={model}; err={e}"))
                    .with_retryable(true),
            ),
        }
    }
}
