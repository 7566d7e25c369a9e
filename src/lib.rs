//! Scrollback is the bounded message history behind each conversation window
//! of a terminal chat client.
//!
//! - [`core::entry`] defines the renderable history entries and their
//!   optional date, origin and delivery-receipt records.
//! - [`core::buffer`] holds entries oldest first and evicts the oldest once
//!   the configured capacity is reached.
//! - [`core::config`] loads the history capacity from a TOML file.
//!
//! Rendering, theme colours and the receipt acknowledgment protocol live in
//! the embedding client; this crate only stores and locates entries.

pub mod core;

pub use crate::core::buffer::{BufferError, MessageBuffer};
pub use crate::core::config::{ConfigError, HistoryConfig};
pub use crate::core::entry::{BufferDate, Entry, EntryFrom, FromType, Receipt, ThemeItem};
