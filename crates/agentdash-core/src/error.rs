//! Error types for dashboard polling.

use thiserror::Error;

/// Why a single fetch against the dashboard API produced no usable data.
///
/// None of these reach the user as an error: the status poll turns any of
/// them into an offline indicator, the projects/stats refresh skips the
/// update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {status}")]
    Http { status: u16 },

    #[error("malformed response body: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown state id: {0}")]
pub struct UnknownStateId(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            PollError::Transport("connection refused".into()).to_string(),
            "transport error: connection refused"
        );
        assert_eq!(
            PollError::Http { status: 502 }.to_string(),
            "unexpected HTTP status 502"
        );
        assert_eq!(
            UnknownStateId("bogus".into()).to_string(),
            "unknown state id: bogus"
        );
    }
}
