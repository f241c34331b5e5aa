//! Errors raised by backend clients.
//!
//! Callers receive these wrapped in `anyhow::Error` and can recover the
//! variant with `downcast_ref::<ProviderError>()`.

/// Maximum number of response-body bytes kept in an error message
const MAX_BODY_CHARS: usize = 800;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("gemini error: {}{}", .status, body_suffix(.body))]
    Http { status: u16, body: String },

    #[error("No Gemini authentication configured")]
    MissingCredential,

    #[error("gemini returned no text (finish reason: {reason})")]
    EmptyResponse { reason: String },
}

impl ProviderError {
    pub fn http(status: u16, body: &str) -> Self {
        let body = body.trim();
        let body: String = if body.chars().count() > MAX_BODY_CHARS {
            format!("{}...", body.chars().take(MAX_BODY_CHARS).collect::<String>())
        } else {
            body.to_string()
        };
        ProviderError::Http { status, body }
    }

    /// HTTP status reported by the backend, if this is a transport-level failure
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!("\n{}", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_display() {
        let err = ProviderError::http(403, "  {\"error\": \"denied\"}  ");
        assert_eq!(err.to_string(), "gemini error: 403\n{\"error\": \"denied\"}");

        let bare = ProviderError::http(500, "");
        assert_eq!(bare.to_string(), "gemini error: 500");
    }

    #[test]
    fn test_body_truncated() {
        let err = ProviderError::http(400, &"x".repeat(2000));
        match err {
            ProviderError::Http { body, .. } => {
                assert_eq!(body.len(), MAX_BODY_CHARS + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rate_limited() {
        assert!(ProviderError::http(429, "quota").is_rate_limited());
        assert!(!ProviderError::http(500, "429 in body only").is_rate_limited());
        assert!(!ProviderError::MissingCredential.is_rate_limited());
    }
}
