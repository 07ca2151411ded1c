use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContourError;
use crate::interchange::{attr_string, f0_attr};

/// Part-of-speech marker carried by punctuation tokens.
pub const PUNCTUATION_POS: &str = ".";

/// A single pitch target inside a phone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct F0Target {
    /// Position within the phone, 0-100
    pub percent: u32,
    /// Frequency in Hz
    pub hz: f64,
}

impl F0Target {
    pub fn new(percent: u32, hz: f64) -> Self {
        Self { percent, hz }
    }
}

/// A timed phonetic segment with predicted duration and pitch targets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Phone {
    /// Phone label (e.g. "AH")
    #[serde(rename = "p", default)]
    pub symbol: String,
    /// Duration in milliseconds
    #[serde(rename = "d", default, with = "attr_string", skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
    /// Cumulative end time in seconds
    #[serde(rename = "end", default, with = "attr_string", skip_serializing_if = "Option::is_none")]
    pub end_sec: Option<f64>,
    /// Pitch targets in breakpoint order
    #[serde(default, with = "f0_attr", skip_serializing_if = "Vec::is_empty")]
    pub f0: Vec<F0Target>,
}

impl Phone {
    pub fn new(symbol: &str, duration_ms: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            duration_ms: Some(duration_ms),
            end_sec: None,
            f0: Vec::new(),
        }
    }

    pub fn with_f0(mut self, targets: &[(u32, f64)]) -> Self {
        self.f0 = targets.iter().map(|&(p, hz)| F0Target::new(p, hz)).collect();
        self
    }

    /// Duration in seconds, if set.
    pub fn duration_sec(&self) -> Option<f64> {
        self.duration_ms.map(|d| 0.001 * d)
    }
}

/// A prosodic break between phrases or words.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Boundary {
    /// Break strength class as written in the markup, normally "0"-"9"
    #[serde(default, with = "attr_string", skip_serializing_if = "Option::is_none")]
    pub breakindex: Option<String>,
    /// Pause duration in milliseconds
    #[serde(rename = "duration", default, with = "attr_string", skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
}

impl Boundary {
    pub fn new(breakindex: Option<&str>) -> Self {
        Self {
            breakindex: breakindex.map(str::to_string),
            duration_ms: None,
        }
    }
}

/// Leaf of the document tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Phone(Phone),
    Boundary(Boundary),
}

impl Segment {
    pub fn as_phone(&self) -> Option<&Phone> {
        match self {
            Segment::Phone(p) => Some(p),
            Segment::Boundary(_) => None,
        }
    }

    pub fn as_phone_mut(&mut self) -> Option<&mut Phone> {
        match self {
            Segment::Phone(p) => Some(p),
            Segment::Boundary(_) => None,
        }
    }

    pub fn is_phone(&self) -> bool {
        matches!(self, Segment::Phone(_))
    }

    /// Duration contributed to the document timeline (ms).
    pub fn duration_ms(&self) -> Option<f64> {
        match self {
            Segment::Phone(p) => p.duration_ms,
            Segment::Boundary(b) => b.duration_ms,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Segment::Phone(_) => "phone",
            Segment::Boundary(_) => "boundary",
        }
    }
}

/// A word or punctuation token and the segments realizing it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub text: String,
    #[serde(default)]
    pub pos: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Token {
    pub fn new(text: &str, pos: &str, segments: Vec<Segment>) -> Self {
        Self {
            text: text.to_string(),
            pos: pos.to_string(),
            segments,
        }
    }

    pub fn is_punctuation(&self) -> bool {
        self.pos == PUNCTUATION_POS
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Phrase {
    #[serde(default)]
    pub tokens: Vec<Token>,
}

impl Phrase {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// All segments of the phrase in document order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.tokens.iter().flat_map(|t| t.segments.iter())
    }

    /// Phone segments only, in document order.
    pub fn phone_segments(&self) -> Vec<&Segment> {
        self.segments().filter(|s| s.is_phone()).collect()
    }

    pub fn phone_segments_mut(&mut self) -> Vec<&mut Segment> {
        self.tokens
            .iter_mut()
            .flat_map(|t| t.segments.iter_mut())
            .filter(|s| s.is_phone())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Sentence {
    #[serde(default)]
    pub phrases: Vec<Phrase>,
}

impl Sentence {
    pub fn new(phrases: Vec<Phrase>) -> Self {
        Self { phrases }
    }
}

/// Root of the document tree. Document order is temporal order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Document {
    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

impl Document {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    /// Every segment in the document, in document order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.sentences
            .iter()
            .flat_map(|s| s.phrases.iter())
            .flat_map(|p| p.segments())
    }

    pub fn segments_mut(&mut self) -> impl Iterator<Item = &mut Segment> {
        self.sentences
            .iter_mut()
            .flat_map(|s| s.phrases.iter_mut())
            .flat_map(|p| p.tokens.iter_mut())
            .flat_map(|t| t.segments.iter_mut())
    }
}

/// Where a sentence sits within its paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentencePosition {
    First,
    Middle,
    Last,
}

impl SentencePosition {
    /// Classify a sentence by its index among `count` siblings.
    ///
    /// Index 0 is always `First`, even for a single-sentence document.
    pub fn from_index(index: usize, count: usize) -> Self {
        if index == 0 {
            SentencePosition::First
        } else if index + 1 == count {
            SentencePosition::Last
        } else {
            SentencePosition::Middle
        }
    }
}

impl fmt::Display for SentencePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SentencePosition::First => "First",
            SentencePosition::Middle => "Middle",
            SentencePosition::Last => "Last",
        };
        f.write_str(name)
    }
}

impl FromStr for SentencePosition {
    type Err = ContourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(SentencePosition::First),
            "middle" => Ok(SentencePosition::Middle),
            "last" => Ok(SentencePosition::Last),
            _ => Err(ContourError::UnknownPosition(s.to_string())),
        }
    }
}
