pub mod analysis;
pub mod llm;
pub mod ollama;
pub mod summarizer;

#[cfg(test)]
mod tests {
    use super::ollama::OllamaClient;

    #[test]
    fn enforces_localhost_only_base_url() {
        assert!(OllamaClient::new("http://127.0.0.1:11434").is_ok());
        assert!(OllamaClient::new("http://127.0.0.1").is_ok());

        assert!(OllamaClient::new("http://localhost:11434").is_err());
        assert!(OllamaClient::new("http://0.0.0.0:11434").is_err());
        assert!(OllamaClient::new("http://[::1]:11434").is_err());
        assert!(OllamaClient::new("https://example.com").is_err());

        // Harden against prefix-based bypasses.
        assert!(OllamaClient::new("http://127.0.0.1.evil.com:11434").is_err());
        assert!(OllamaClient::new("http://127.0.0.1@evil.com:11434").is_err());
        assert!(OllamaClient::new("http://127.0.0.1:").is_err());
        assert!(OllamaClient::new("http://127.0.0.1:0").is_err());
        assert!(OllamaClient::new("http://127.0.0.1:99999").is_err());
        assert!(OllamaClient::new("http://127.0.0.1:11434/").is_ok()); // trailing slash is trimmed
        assert!(OllamaClient::new("http://127.0.0.1:11434/api").is_err());
    }

    #[test]
    fn port_must_be_a_single_numeric_segment() {
        assert!(OllamaClient::new("http://127.0.0.1:11434:1").is_err());
        assert!(OllamaClient::new("http://127.0.0.1:+11434").is_err());
        assert!(OllamaClient::new("http://127.0.0.1:65535").is_ok());
        assert!(OllamaClient::new("http://127.0.0.1:65536").is_err());
        assert!(OllamaClient::new("http://127.0.0.1://").is_err());
        assert_eq!(
            OllamaClient::new("http://127.0.0.1:8080///").unwrap().base_url(),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn remote_url_error_has_stable_code() {
        let err = OllamaClient::new("https://example.com").unwrap_err();
        assert_eq!(err.code, "AI_REMOTE_NOT_ALLOWED");
    }
}
