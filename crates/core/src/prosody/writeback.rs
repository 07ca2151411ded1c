//! Map a dense contour back onto each phone's sparse F0 targets.

use crate::error::{ContourError, Result};
use crate::prosody::contour::{phone_timing, PhraseSpan};
use crate::types::Segment;

/// Rewrite every F0 target with the contour value at its time-derived index.
///
/// Uses the same span and index formula as extraction, so the contour must
/// come from the same (unmodified) timing. Values are truncated toward zero;
/// target order and percents are preserved. Phones without targets are left
/// alone. Returns the number of targets rewritten.
pub fn write_back(segments: &mut [&mut Segment], contour: &[f64]) -> Result<usize> {
    if contour.is_empty() {
        return Err(ContourError::InvalidLength(0));
    }
    let len = contour.len();

    let (span, timings) = {
        let shared: Vec<&Segment> = segments.iter().map(|s| &**s).collect();
        let span = PhraseSpan::of(&shared)?;
        let timings = shared
            .iter()
            .enumerate()
            .map(|(i, seg)| phone_timing(seg, i).map(|(_, t)| t))
            .collect::<Result<Vec<_>>>()?;
        (span, timings)
    };

    let mut rewritten = 0;
    for (seg, timing) in segments.iter_mut().zip(timings) {
        let Some(phone) = seg.as_phone_mut() else {
            continue;
        };
        for target in phone.f0.iter_mut() {
            let index = span.index_of(timing, target.percent, len);
            target.hz = contour[index].trunc();
            rewritten += 1;
        }
    }
    Ok(rewritten)
}
