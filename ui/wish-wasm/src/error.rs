//! Failure kinds of a backend call.

/// `Transport` covers everything below the JSON envelope: the request never
/// completed, or the body was not the JSON we expected. `Application` is a
/// well-formed body whose `success` flag was not `true`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request rejected: {}", .0.as_deref().unwrap_or("no message"))]
    Application(Option<String>),
}

impl ApiError {
    /// Notification text: transport failures always get the generic
    /// `transport` text, rejections prefer the server's own message.
    pub fn user_message(&self, transport: &str, rejected: &str) -> String {
        match self {
            ApiError::Transport(_) => transport.to_owned(),
            ApiError::Application(Some(message)) if !message.trim().is_empty() => message.clone(),
            ApiError::Application(_) => rejected.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_prefers_server_message() {
        let err = ApiError::Application(Some("Too long".into()));
        assert_eq!(err.user_message("offline", "failed"), "Too long");

        let err = ApiError::Application(Some("  ".into()));
        assert_eq!(err.user_message("offline", "failed"), "failed");

        let err = ApiError::Application(None);
        assert_eq!(err.user_message("offline", "failed"), "failed");
    }

    #[test]
    fn transport_always_uses_generic_text() {
        let err = ApiError::Transport("TypeError: Failed to fetch".into());
        assert_eq!(err.user_message("offline", "failed"), "offline");
        assert_eq!(err.to_string(), "transport error: TypeError: Failed to fetch");
    }
}
