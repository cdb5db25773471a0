use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures of the underlying socket. None of these are fatal to a client;
/// the connection driver turns every one of them into a retry.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("connect failed: {0}")]
    Connect(String),

    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("send failed: {0}")]
    Send(String),

    #[error("receive failed: {0}")]
    Receive(String),

    #[error("socket closed")]
    Closed,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid subject id: {0:?}")]
    InvalidSubject(String),

    #[error("client already disposed")]
    Disposed,
}

#[derive(Debug, thiserror::Error)]
pub enum LanyardError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Client(#[from] ClientError),

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("retry.jitter = 2 is out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: retry.jitter = 2 is out of range"
        );
    }

    #[test]
    fn transport_error_display() {
        let err = TransportError::Timeout(Duration::from_secs(15));
        assert_eq!(err.to_string(), "timed out after 15000ms");

        let err = TransportError::Connect("dns failure".into());
        assert_eq!(err.to_string(), "connect failed: dns failure");

        assert_eq!(TransportError::Closed.to_string(), "socket closed");
    }

    #[test]
    fn client_error_display() {
        let err = ClientError::InvalidSubject(String::new());
        assert_eq!(err.to_string(), "invalid subject id: \"\"");
        assert_eq!(ClientError::Disposed.to_string(), "client already disposed");
    }

    #[test]
    fn lanyard_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: LanyardError = config_err.into();
        assert!(matches!(err, LanyardError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn lanyard_error_from_transport() {
        let err: LanyardError = TransportError::Send("broken pipe".into()).into();
        assert!(matches!(err, LanyardError::Transport(_)));
        assert_eq!(err.to_string(), "send failed: broken pipe");
    }

    #[test]
    fn lanyard_error_from_client() {
        let err: LanyardError = ClientError::InvalidSubject(" ".into()).into();
        assert!(matches!(err, LanyardError::Client(_)));
        assert_eq!(err.to_string(), "invalid subject id: \" \"");
    }
}
