use thiserror::Error;

/// Typed Yandex.Disk errors enabling per-photo retry classification.
///
/// `is_auth()` separates a bad OAuth token (which must surface to the user
/// and abort the whole batch) from per-request failures that only cost the
/// current photo one attempt.
#[derive(Debug, Error)]
pub enum DiskError {
    #[error("Yandex.Disk returned {status} for {operation}")]
    Status { status: u16, operation: &'static str },

    #[error("copy submission response carried no polling href")]
    MissingHref,

    #[error("unrecognized copy status '{0}'")]
    UnknownStatus(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl DiskError {
    /// Whether this is a credential failure rather than a transient one.
    pub fn is_auth(&self) -> bool {
        matches!(self, DiskError::Status { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_is_auth() {
        let e = DiskError::Status {
            status: 401,
            operation: "submit_copy",
        };
        assert!(e.is_auth());
    }

    #[test]
    fn test_other_statuses_not_auth() {
        for status in [400, 404, 409, 429, 500, 507] {
            let e = DiskError::Status {
                status,
                operation: "submit_copy",
            };
            assert!(!e.is_auth(), "status {status} must not classify as auth");
        }
    }

    #[test]
    fn test_missing_href_not_auth() {
        assert!(!DiskError::MissingHref.is_auth());
    }

    #[test]
    fn test_unknown_status_not_auth() {
        assert!(!DiskError::UnknownStatus("paused".into()).is_auth());
    }

    #[test]
    fn test_http_error_not_auth() {
        // Create a reqwest::Error by requesting an unreachable address
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let err = rt
            .block_on(reqwest::Client::new().get("http://127.0.0.1:1").send())
            .unwrap_err();
        let e: DiskError = err.into();
        assert!(!e.is_auth());
    }
}
