//! Buffer Sizes and Capacity Limits
//!
//! Every table in the core has a compile-time capacity. Loading a
//! configuration that does not fit is a `ConfigError`, never a truncation.

// ===== SCHEDULE TABLE =====

/// Maximum number of switches a node can drive.
///
/// Matches the 16 unit codes of a KlikAanKlikUit code wheel.
pub const MAX_SWITCHES: usize = 16;

/// Maximum schedule rules attached to one switch.
pub const MAX_RULES_PER_SWITCH: usize = 8;

/// Default number of switches a node is configured for.
pub const DEFAULT_MAX_SWITCH: u8 = 8;

// ===== SAMPLE HISTORY =====

/// Default number of samples kept per quantity.
///
/// - 15 samples × 16 bytes = 240 bytes per quantity
/// - 2.5 hours of history at the default 10-minute cadence
pub const DEFAULT_SAMPLE_COUNT: usize = 15;

// ===== STRING AND IDENTIFIER LIMITS =====

/// Maximum switch display name length (bytes).
pub const SWITCH_NAME_LEN: usize = 24;

/// Maximum site name length (bytes).
pub const SITE_NAME_LEN: usize = 32;

/// Maximum number of status LED pins.
pub const MAX_LED_PINS: usize = 4;

/// Maximum WiFi SSID length (bytes), per IEEE 802.11.
pub const SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length (bytes).
pub const PASSWORD_LEN: usize = 64;
