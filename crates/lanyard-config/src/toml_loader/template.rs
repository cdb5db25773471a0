//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Lanyard presence client configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[subject]
# Id of the user whose presence is tracked. Required to connect.
id = ""

[gateway]
# url = "wss://api.lanyard.rest/socket"
# connect_timeout_ms = 15000   # 1000-120000
# hello_timeout_ms = 10000     # 1000-120000

[retry]
# strategy = "exponential"     # "fixed" | "exponential"
# base_delay_ms = 5000         # 100-600000
# max_delay_ms = 60000         # base_delay_ms-3600000
# jitter = 0.2                 # 0.0-1.0
# max_consecutive_failures = 10  # unset = retry forever

[logging]
# level = "info"               # trace | debug | info | warn | error
"##
}
