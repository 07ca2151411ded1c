//! Paragraph-level prosody contour transformation for a TTS pipeline.
//!
//! Takes a document whose phones already carry predicted durations and F0
//! targets, and reshapes speaking rate and pitch range according to each
//! sentence's position in the paragraph.

pub mod boundary;
pub mod config;
pub mod document;
pub mod error;
pub mod interchange;
pub mod prosody;
pub mod types;

pub use config::ProsodyConfig;
pub use error::ContourError;
pub use prosody::{ParagraphCounter, ParagraphProsody, ProcessSummary};
pub use types::*;
