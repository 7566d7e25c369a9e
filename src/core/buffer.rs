use std::collections::{vec_deque, TryReserveError, VecDeque};
use std::error::Error as StdError;
use std::fmt;

use tracing::debug;

use crate::core::config::HistoryConfig;
use crate::core::constants::DEFAULT_CAPACITY;
use crate::core::entry::Entry;


/// Errors reported by [`MessageBuffer`] operations.
#[derive(Debug)]
pub enum BufferError {
    /// The requested index is not held by the buffer.
    OutOfRange {
        /// Index that was asked for.
        index: usize,
        /// Number of entries held at the time of the request.
        len: usize,
    },

    /// Storage for a new entry could not be allocated.
    ResourceExhausted(TryReserveError),
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::OutOfRange { index, len } => {
                write!(f, "Entry {index} is out of range (buffer holds {len})")
            }
            BufferError::ResourceExhausted(source) => {
                write!(f, "Unable to grow message buffer: {source}")
            }
        }
    }
}

impl StdError for BufferError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            BufferError::OutOfRange { .. } => None,
            BufferError::ResourceExhausted(source) => Some(source),
        }
    }
}

/// Bounded history backing a single conversation window.
///
/// Entries are kept oldest first. Once `capacity` entries are held, every
/// append drops the oldest entry before storing the new one, so the length
/// never exceeds the capacity. References handed out by the lookup methods
/// borrow the buffer and therefore cannot outlive the next mutation.
#[derive(Debug, Clone)]
pub struct MessageBuffer {
    entries: VecDeque<Entry>,
    capacity: usize,
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A zero capacity is treated as one so the newest entry is always kept.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::with_capacity(config.capacity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stores `entry` as the newest entry, evicting the oldest one first when
    /// the buffer is full.
    pub fn append(&mut self, entry: Entry) {
        self.evict_if_full();
        self.entries.push_back(entry);
    }

    /// Like [`append`](Self::append), but reports allocation failure instead
    /// of aborting. On failure nothing is evicted. Returns the evicted entry.
    pub fn try_append(&mut self, entry: Entry) -> Result<Option<Entry>, BufferError> {
        // Reserve before evicting so a failed reservation leaves the buffer
        // untouched. A full buffer reuses the evicted slot and needs none.
        // The failure branch is not covered by tests: `try_reserve` cannot be
        // made to fail deterministically without a custom allocator.
        if self.entries.len() < self.capacity {
            self.entries
                .try_reserve(1)
                .map_err(BufferError::ResourceExhausted)?;
        }
        let evicted = self.evict_if_full();
        self.entries.push_back(entry);
        Ok(evicted)
    }

    /// Entry at `index`, counted from the oldest surviving entry.
    pub fn get_entry(&self, index: usize) -> Result<&Entry, BufferError> {
        self.entries.get(index).ok_or(BufferError::OutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Oldest entry whose receipt id equals `id`.
    pub fn get_entry_by_id(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.has_receipt_id(id))
    }

    pub fn get_entry_by_id_mut(&mut self, id: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| entry.has_receipt_id(id))
    }

    /// Flags the receipt `id` as received. Returns `false` when no entry
    /// carries that id, which is expected once the message has scrolled out
    /// of the history.
    pub fn mark_received(&mut self, id: &str) -> bool {
        match self
            .get_entry_by_id_mut(id)
            .and_then(|entry| entry.receipt_mut())
        {
            Some(receipt) => {
                receipt.received = true;
                true
            }
            None => {
                debug!(receipt_id = %id, "Receipt acknowledged for unknown entry");
                false
            }
        }
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Drops every entry, keeping the buffer usable.
    pub fn clear(&mut self) {
        debug!(dropped = self.entries.len(), "Clearing message buffer");
        self.entries.clear();
    }

    fn evict_if_full(&mut self) -> Option<Entry> {
        if self.entries.len() < self.capacity {
            return None;
        }
        let evicted = self.entries.pop_front();
        if let Some(entry) = &evicted {
            debug!(
                capacity = self.capacity,
                evicted_receipt = entry.receipt().map(|receipt| receipt.id.as_str()),
                "Evicted oldest history entry"
            );
        }
        evicted
    }
}

impl<'a> IntoIterator for &'a MessageBuffer {
    type Item = &'a Entry;
    type IntoIter = vec_deque::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
