//! Flat pause durations for boundaries, keyed by break strength.

use crate::types::{Document, Segment};

/// Pause used for any break index without a dedicated entry (ms).
pub const DEFAULT_BOUNDARY_MS: f64 = 210.0;

/// Pause duration for a break index (ms).
///
/// The index is matched as attribute text: anything outside the table,
/// including zero-padded or non-numeric values, gets the default.
pub fn boundary_duration_ms(breakindex: Option<&str>) -> f64 {
    match breakindex {
        Some("4") => 240.0,
        Some("5") => 520.0,
        Some("6" | "7" | "8") => 1240.0,
        Some("9") => 300.0,
        _ => DEFAULT_BOUNDARY_MS,
    }
}

/// Give every boundary without a duration its table value.
///
/// Existing durations are never overwritten. Returns the number of
/// boundaries assigned.
pub fn assign_boundary_durations(doc: &mut Document) -> usize {
    let mut assigned = 0;
    for seg in doc.segments_mut() {
        if let Segment::Boundary(b) = seg {
            if b.duration_ms.is_none() {
                b.duration_ms = Some(boundary_duration_ms(b.breakindex.as_deref()));
                assigned += 1;
            }
        }
    }
    if assigned > 0 {
        log::debug!("Assigned durations to {} boundaries", assigned);
    }
    assigned
}
