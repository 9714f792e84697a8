use tracing::{error, warn};

use crate::llm::Llm;

/// Prefix of the text returned when every model failed.
pub const SUMMARY_FAILURE_PREFIX: &str = "요약 호출 중 오류 발생";

/// Turns a prompt into prose. Never fails: on total failure the returned text describes the
/// error, and callers treat it like any other summary.
pub trait Summarizer {
    fn summarize(&self, prompt: &str) -> String;
}

/// Primary model first, then the fallback model.
pub struct FallbackSummarizer<'a> {
    llm: &'a dyn Llm,
    primary_model: String,
    fallback_model: Option<String>,
}

impl<'a> FallbackSummarizer<'a> {
    pub fn new(llm: &'a dyn Llm, primary_model: impl Into<String>) -> Self {
        Self {
            llm,
            primary_model: primary_model.into(),
            fallback_model: None,
        }
    }

    pub fn with_fallback(mut self, model: impl Into<String>) -> Self {
        self.fallback_model = Some(model.into());
        self
    }
}

impl Summarizer for FallbackSummarizer<'_> {
    fn summarize(&self, prompt: &str) -> String {
        let primary_err = match self.llm.generate(&self.primary_model, prompt) {
            Ok(text) => return text,
            Err(e) => e,
        };

        let Some(fallback) = self.fallback_model.as_deref() else {
            error!(model = %self.primary_model, err = %primary_err, "summary failed");
            return format!("{SUMMARY_FAILURE_PREFIX}: {primary_err}");
        };

        warn!(
            model = %self.primary_model,
            fallback = %fallback,
            err = %primary_err,
            "primary model failed; trying fallback"
        );
        match self.llm.generate(fallback, prompt) {
            Ok(text) => text,
            Err(e) => {
                error!(model = %fallback, err = %e, "fallback model failed");
                format!("{SUMMARY_FAILURE_PREFIX}: {e}")
            }
        }
    }
}
