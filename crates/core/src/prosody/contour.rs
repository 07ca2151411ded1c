//! Sparse per-phone F0 targets to a dense, time-normalized contour.

use crate::error::{ContourError, Result};
use crate::types::{Phone, Segment};

/// Number of samples in a phrase contour (0%..=100%).
pub const CONTOUR_LENGTH: usize = 101;

/// Temporal extent of a phrase, from the first phone's start to the last
/// phone's end (seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhraseSpan {
    pub start: f64,
    pub duration: f64,
}

/// Timing of one phone, validated against the attribute contract.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PhoneTiming {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
}

/// Extract a phone's timing, checking it is a phone with `d` and `end`.
pub(crate) fn phone_timing(seg: &Segment, index: usize) -> Result<(&Phone, PhoneTiming)> {
    let phone = seg.as_phone().ok_or(ContourError::NotAPhone {
        index,
        kind: seg.kind(),
    })?;
    let duration = phone.duration_sec().ok_or_else(|| ContourError::missing("d", index))?;
    let end = phone.end_sec.ok_or_else(|| ContourError::missing("end", index))?;
    Ok((
        phone,
        PhoneTiming {
            start: end - duration,
            end,
            duration,
        },
    ))
}

impl PhraseSpan {
    /// Compute the span of a phone list, validating every segment.
    pub fn of(segments: &[&Segment]) -> Result<Self> {
        if segments.is_empty() {
            return Err(ContourError::EmptySegments);
        }
        for (i, seg) in segments.iter().enumerate() {
            phone_timing(seg, i)?;
        }
        let last_index = segments.len() - 1;
        let (_, first) = phone_timing(segments[0], 0)?;
        let (_, last) = phone_timing(segments[last_index], last_index)?;
        Ok(Self {
            start: first.start,
            duration: last.end - first.start,
        })
    }

    /// Sample index for a target at `percent` within a phone.
    ///
    /// Floors the normalized offset and clamps to `[0, len - 1]`.
    pub(crate) fn index_of(&self, phone: PhoneTiming, percent: u32, len: usize) -> usize {
        let offset = (phone.start - self.start) + phone.duration * (percent as f64 / 100.0);
        let raw = (offset * len as f64 / self.duration).floor();
        // NaN and infinities saturate in the cast; the clamp does the rest.
        (raw as i64).clamp(0, len as i64 - 1) as usize
    }
}

/// Build a dense contour of `len` samples from a phrase's phones.
///
/// Each target is written at its time-derived index (later targets overwrite
/// earlier ones on the same index), then unset samples are interpolated.
pub fn extract_contour(segments: &[&Segment], len: usize) -> Result<Vec<f64>> {
    if len == 0 {
        return Err(ContourError::InvalidLength(len));
    }
    let span = PhraseSpan::of(segments)?;

    let mut contour = vec![0.0; len];
    for (i, seg) in segments.iter().enumerate() {
        let (phone, timing) = phone_timing(seg, i)?;
        for target in &phone.f0 {
            contour[span.index_of(timing, target.percent, len)] = target.hz;
        }
    }

    interpolate_unset(&mut contour);
    Ok(contour)
}

/// Fill zero samples by linear interpolation between their nearest non-zero
/// neighbours. Leading and trailing gaps hold the nearest known value. An
/// all-zero contour is left unchanged.
pub fn interpolate_unset(contour: &mut [f64]) {
    let known: Vec<usize> = contour
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v != 0.0)
        .map(|(i, _)| i)
        .collect();

    let (Some(&first), Some(&last)) = (known.first(), known.last()) else {
        return;
    };

    let head = contour[first];
    contour[..first].iter_mut().for_each(|v| *v = head);
    let tail = contour[last];
    contour[last + 1..].iter_mut().for_each(|v| *v = tail);

    for pair in known.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if b - a < 2 {
            continue;
        }
        let (va, vb) = (contour[a], contour[b]);
        let steps = (b - a) as f64;
        for i in a + 1..b {
            contour[i] = va + (vb - va) * (i - a) as f64 / steps;
        }
    }
}
