//! Built-in property defaults for a fresh invitation.

pub const DEFAULT_VERSION: &str = "2.0";
pub const DEFAULT_CALSCALE: &str = "GREGORIAN";
pub const DEFAULT_METHOD: &str = "REQUEST";
pub const DEFAULT_TRANSPARENCY: &str = "OPAQUE";

/// Status is fixed; invitations are always sent as confirmed.
pub const EVENT_STATUS: &str = "CONFIRMED";

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "ics-invite";
pub const DEFAULTS_FILE_NAME: &str = "defaults.toml";
