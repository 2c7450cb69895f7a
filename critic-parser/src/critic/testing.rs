//! Testing helpers
//!
//!     Small utilities shared by the unit tests, the integration tests and downstream crates that
//!     want to check scanner output without repeating the bookkeeping.

use crate::critic::scanning::{scan_str, Scanned};
use crate::critic::segment::Segment;

/// Concatenate the source slices of every scanned range.
pub fn source_slices(source: &str, scanned: &[Scanned]) -> String {
    scanned
        .iter()
        .map(|(_, range)| &source[range.clone()])
        .collect()
}

/// The document as it was before the edits, built from segment data alone.
pub fn original_of(source: &str) -> String {
    reading(source, Segment::original)
}

/// The document as it is after the edits, built from segment data alone.
pub fn edited_of(source: &str) -> String {
    reading(source, Segment::edited)
}

fn reading(source: &str, side: fn(&Segment) -> &[u8]) -> String {
    let bytes: Vec<u8> = scan_str(source)
        .iter()
        .flat_map(|(segment, _)| side(segment).iter().copied())
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Segments without their ranges.
pub fn segments_of(source: &str) -> Vec<Segment> {
    scan_str(source).into_iter().map(|(s, _)| s).collect()
}
