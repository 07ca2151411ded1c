//! Paragraph-level rate and pitch-range transformation.

pub mod baseline;
pub mod contour;
pub mod duration;
pub mod paragraph;
pub mod policy;
pub mod writeback;

pub use paragraph::{ParagraphProsody, ProcessSummary};
pub use policy::{ParagraphCounter, PolicyChoice, RatePolicy, WordBucket};
