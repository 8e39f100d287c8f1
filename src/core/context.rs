//! Context analysis for copied text

pub mod detection;

pub use detection::{LanguageDetector, WhatlangDetector};
