//! Paragraph-position prosody: reshape rate and pitch range per phrase.

use crate::config::ProsodyConfig;
use crate::document::{collect, LexicalStats};
use crate::error::Result;
use crate::types::{Document, SentencePosition};

use super::baseline::{recombine, reshape_baseline, BaselineFit};
use super::contour::{extract_contour, CONTOUR_LENGTH};
use super::duration::{recompute_timeline, rescale_durations};
use super::policy::{ParagraphCounter, PolicyChoice, RatePolicy};
use super::writeback::write_back;

/// What happened to one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessSummary {
    pub phrases_processed: usize,
    /// Phrases without content words
    pub phrases_skipped: usize,
    /// Policy calls that fell on the damped step of the cycle
    pub damped_calls: usize,
    pub targets_rewritten: usize,
    /// Document length after rescaling (ms)
    pub total_duration_ms: f64,
}

/// Location and statistics of a phrase, gathered before mutation.
#[derive(Debug, Clone, Copy)]
struct PhrasePlan {
    sentence: usize,
    phrase: usize,
    position: SentencePosition,
    stats: LexicalStats,
}

/// Applies the rate and range policy to every phrase of a document.
#[derive(Debug, Clone, Default)]
pub struct ParagraphProsody {
    policy: RatePolicy,
}

impl ParagraphProsody {
    pub fn new(config: ProsodyConfig) -> Result<Self> {
        Ok(Self {
            policy: RatePolicy::new(config)?,
        })
    }

    /// Rescale durations and reshape pitch for every phrase, in document order.
    ///
    /// Phrases without content words are skipped and do not advance the
    /// counter. The first failing phrase aborts processing; phrases already
    /// handled keep their new values.
    pub fn process(&self, doc: &mut Document, counter: &mut ParagraphCounter) -> Result<ProcessSummary> {
        let plans = plan_phrases(doc);
        let mut summary = ProcessSummary::default();

        if doc.sentences.is_empty() {
            log::info!("Document has no sentences, nothing to do");
            return Ok(summary);
        }

        for plan in plans {
            if !plan.stats.has_words() {
                log::debug!(
                    "Skipping phrase {}.{}: no content words",
                    plan.sentence,
                    plan.phrase
                );
                summary.phrases_skipped += 1;
                continue;
            }

            let choice = self
                .policy
                .select(counter, plan.position, plan.stats.num_words);
            if choice.damped {
                summary.damped_calls += 1;
            }

            log::debug!(
                "Phrase {}.{} ({}, {} words, avg {:.1} chars): rate {:+.2}%, half-range {:.3}",
                plan.sentence,
                plan.phrase,
                plan.position,
                plan.stats.num_words,
                plan.stats.avg_word_length().unwrap_or(0.0),
                choice.rate_percent_delta,
                choice.pitch_half_range
            );

            let (rewritten, total_ms) = process_phrase(doc, &plan, choice)?;
            summary.targets_rewritten += rewritten;
            summary.total_duration_ms = total_ms;
            summary.phrases_processed += 1;
        }

        log::info!(
            "Processed {} phrases ({} skipped, {} damped), document length {:.0} ms",
            summary.phrases_processed,
            summary.phrases_skipped,
            summary.damped_calls,
            summary.total_duration_ms
        );
        Ok(summary)
    }
}

fn plan_phrases(doc: &Document) -> Vec<PhrasePlan> {
    collect(doc)
        .iter()
        .flat_map(|sentence| {
            sentence.phrases.iter().map(move |phrase| PhrasePlan {
                sentence: sentence.index,
                phrase: phrase.index,
                position: sentence.position,
                stats: LexicalStats::from_tokens(phrase.tokens),
            })
        })
        .collect()
}

/// Run the duration and contour stages for one phrase.
///
/// Returns the number of rewritten targets and the document length (ms).
fn process_phrase(doc: &mut Document, plan: &PhrasePlan, choice: PolicyChoice) -> Result<(usize, f64)> {
    {
        let phrase = &mut doc.sentences[plan.sentence].phrases[plan.phrase];
        let mut phones = phrase.phone_segments_mut();
        rescale_durations(&mut phones, choice.rate_percent_delta);
    }
    let total_ms = recompute_timeline(doc);

    let phrase = &doc.sentences[plan.sentence].phrases[plan.phrase];
    let contour = extract_contour(&phrase.phone_segments(), CONTOUR_LENGTH)?;
    let fit = BaselineFit::fit(&contour);
    let new_baseline = reshape_baseline(&fit, choice.pitch_half_range);
    let reshaped = recombine(&fit.residual, &new_baseline);

    let phrase = &mut doc.sentences[plan.sentence].phrases[plan.phrase];
    let mut phones = phrase.phone_segments_mut();
    let rewritten = write_back(&mut phones, &reshaped)?;
    Ok((rewritten, total_ms))
}
