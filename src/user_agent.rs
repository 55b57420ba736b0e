//! Shared User-Agent strings for catalog and mirror requests.
//!
//! The catalog and most mirrors reject obvious tool traffic, so the default
//! identity is a desktop browser string. Operators may override it through
//! configuration.

/// Browser User-Agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.45 Safari/537.36";
