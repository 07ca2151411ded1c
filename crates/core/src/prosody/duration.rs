//! Phone duration rescaling and document timeline recomputation.

use crate::types::{Document, Segment};

/// Scale each phone duration by `rate_percent_delta` percent.
///
/// Phones without a duration, and boundaries, are left untouched.
/// Returns the number of phones rescaled.
pub fn rescale_durations(segments: &mut [&mut Segment], rate_percent_delta: f64) -> usize {
    let factor = rate_percent_delta / 100.0;
    let mut rescaled = 0;
    for seg in segments.iter_mut() {
        if let Some(d) = seg.as_phone_mut().and_then(|p| p.duration_ms.as_mut()) {
            *d += factor * *d;
            rescaled += 1;
        }
    }
    rescaled
}

/// Recompute every phone's `end` from the running sum of durations.
///
/// Boundaries add their duration to the sum but are never given an `end`.
/// Segments without a duration contribute nothing. Returns the total
/// document duration in milliseconds.
pub fn recompute_timeline(doc: &mut Document) -> f64 {
    let mut elapsed_ms = 0.0;
    for seg in doc.segments_mut() {
        elapsed_ms += seg.duration_ms().unwrap_or(0.0);
        if let Segment::Phone(phone) = seg {
            phone.end_sec = Some(0.001 * elapsed_ms);
        }
    }
    elapsed_ms
}
