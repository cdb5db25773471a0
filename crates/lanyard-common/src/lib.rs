pub mod errors;

pub use errors::{ClientError, ConfigError, LanyardError, TransportError};

/// Public presence gateway endpoint.
pub const DEFAULT_GATEWAY_URL: &str = "wss://api.lanyard.rest/socket";

pub type Result<T> = std::result::Result<T, LanyardError>;
