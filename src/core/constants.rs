//! Shared constants used across the crate

/// Number of entries a conversation window keeps before the oldest one is
/// evicted. Used whenever no explicit capacity is configured.
pub const DEFAULT_CAPACITY: usize = 1200;

/// Status glyph shown next to entries that carry no explicit marker.
pub const DEFAULT_SHOW_CHAR: char = '-';
