//! Rate and pitch-range selection by sentence position and phrase length.

use crate::config::ProsodyConfig;
use crate::error::ContourError;
use crate::types::SentencePosition;

/// Phrase length class used to index the policy tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordBucket {
    /// Up to 4 words
    Short,
    /// 5 to 7 words
    Medium,
    /// 8 words or more
    Long,
}

impl WordBucket {
    pub fn classify(num_words: usize) -> Self {
        if num_words <= 4 {
            WordBucket::Short
        } else if num_words < 8 {
            WordBucket::Medium
        } else {
            WordBucket::Long
        }
    }

    fn column(self) -> usize {
        match self {
            WordBucket::Short => 0,
            WordBucket::Medium => 1,
            WordBucket::Long => 2,
        }
    }
}

/// Rotating paragraph position, owned by the calling pipeline.
///
/// Starts at 1 and is advanced by every [`RatePolicy::select`] call. Keep one
/// counter per output stream; reusing it across documents continues the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphCounter {
    position: u32,
}

impl ParagraphCounter {
    pub fn new() -> Self {
        Self { position: 1 }
    }

    /// Resume from a saved position (values below 1 restart the cycle).
    pub fn at(position: u32) -> Self {
        Self {
            position: position.max(1),
        }
    }

    pub fn position(&self) -> u32 {
        self.position
    }
}

impl Default for ParagraphCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Values selected for one phrase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyChoice {
    /// Percent added to each phone duration
    pub rate_percent_delta: f64,
    /// Pitch half-range as a fraction of the baseline peak
    pub pitch_half_range: f64,
    /// True on the once-per-cycle damped call
    pub damped: bool,
}

/// Table-driven rate and range selector.
#[derive(Debug, Clone)]
pub struct RatePolicy {
    config: ProsodyConfig,
}

impl RatePolicy {
    pub fn new(config: ProsodyConfig) -> Result<Self, ContourError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Pitch half-range for a position and phrase length. Never damped.
    pub fn pitch_half_range(&self, position: SentencePosition, num_words: usize) -> f64 {
        self.config.range_table.row(position)[WordBucket::classify(num_words).column()]
    }

    /// Undamped rate delta (percent) for a position and phrase length.
    pub fn rate_percent_delta(&self, position: SentencePosition, num_words: usize) -> f64 {
        self.config.rate_table.row(position)[WordBucket::classify(num_words).column()]
    }

    /// Select rate and range for one phrase and advance the counter.
    ///
    /// While the counter is below `num_paragraphs` the tables apply verbatim
    /// and the counter increments. At `num_paragraphs` the rate delta is
    /// scaled by `1 - damping_factor` once and the counter resets to 1. The
    /// cycle counts policy calls, not real paragraphs in the document.
    pub fn select(
        &self,
        counter: &mut ParagraphCounter,
        position: SentencePosition,
        num_words: usize,
    ) -> PolicyChoice {
        let base_rate = self.rate_percent_delta(position, num_words);
        let pitch_half_range = self.pitch_half_range(position, num_words);

        let damped = counter.position >= self.config.num_paragraphs;
        let rate_percent_delta = if damped {
            counter.position = 1;
            base_rate - base_rate * self.config.damping_factor
        } else {
            counter.position += 1;
            base_rate
        };

        log::trace!(
            "Policy {} / {} words: rate {:+.3}%, half-range {:.3}{}",
            position,
            num_words,
            rate_percent_delta,
            pitch_half_range,
            if damped { " (damped)" } else { "" }
        );

        PolicyChoice {
            rate_percent_delta,
            pitch_half_range,
            damped,
        }
    }

    /// Like [`select`](Self::select), but takes the position by name.
    pub fn select_named(
        &self,
        counter: &mut ParagraphCounter,
        position: &str,
        num_words: usize,
    ) -> Result<PolicyChoice, ContourError> {
        let position = position.parse::<SentencePosition>()?;
        Ok(self.select(counter, position, num_words))
    }
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self {
            config: ProsodyConfig::default(),
        }
    }
}
