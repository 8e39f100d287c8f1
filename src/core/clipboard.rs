//! Clipboard module
//!
//! Watches the system clipboard and decides what gets translated.
//!
//! - `backend`: read/write access to the plain-text clipboard slot
//! - `filter`: denylist of system/error output
//! - `monitor`: change detection and qualification of new text
//! - `poller`: periodic tick driving the monitor

pub mod backend;
pub mod filter;
pub mod monitor;
pub mod poller;

pub use backend::{ClipboardBackend, SystemClipboard};
pub use monitor::{ClipboardWatcher, SkipReason, WatchDecision};
pub use poller::Poller;
