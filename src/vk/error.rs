use thiserror::Error;

/// Errors from the VK metadata fetch.
///
/// `Api` and `Shape` both mean the caller asked for something that does not
/// exist (unknown owner, unknown album, private profile) — the top-level loop
/// re-prompts on them instead of aborting.
#[derive(Error, Debug)]
pub enum VkError {
    #[error("VK API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("VK response missing expected field: {0}")]
    Shape(&'static str),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl VkError {
    /// Whether the error indicates bad user input (unknown owner/album)
    /// rather than a transport or programming failure.
    pub fn is_user_input(&self) -> bool {
        matches!(self, VkError::Api { .. } | VkError::Shape(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_is_user_input() {
        let e = VkError::Api {
            code: 113,
            message: "Invalid user id".into(),
        };
        assert!(e.is_user_input());
    }

    #[test]
    fn test_shape_error_is_user_input() {
        assert!(VkError::Shape("response").is_user_input());
    }

    #[test]
    fn test_http_error_is_not_user_input() {
        // Create a reqwest::Error by requesting an unreachable address
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let err = rt
            .block_on(reqwest::Client::new().get("http://127.0.0.1:1").send())
            .unwrap_err();
        let e: VkError = err.into();
        assert!(!e.is_user_input());
    }
}
