pub mod annotate;
pub mod domain;
pub mod error;
pub mod flatten;
pub mod footnotes;
pub mod ingest;
pub mod numeric;
pub mod report;
pub mod validate;

#[cfg(test)]
mod tests {
    use super::error::AppError;

    #[test]
    fn app_error_is_structured() {
        let err = AppError::new("INPUT_JSON_INVALID", "bad json").with_retryable(false);
        assert_eq!(err.code, "INPUT_JSON_INVALID");
        assert_eq!(err.message, "bad json");
        assert!(!err.retryable);
        assert_eq!(err.to_string(), "[INPUT_JSON_INVALID] bad json");
    }

    #[test]
    fn app_error_display_includes_details() {
        let err = AppError::new("AI_SUMMARY_FAILED", "call failed").with_details("status=500");
        assert_eq!(err.to_string(), "[AI_SUMMARY_FAILED] call failed (status=500)");
    }
}
