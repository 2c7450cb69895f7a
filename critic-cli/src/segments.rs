//! Segment dump
//!
//! Writes the scanner output as a pretty JSON array, one object per segment with its byte
//! range. Handy for checking how a document was split before looking at a render.

use critic_parser::{Scanner, Segment};
use serde::Serialize;
use std::io::{BufRead, Write};

#[derive(Serialize)]
struct SegmentRecord {
    start: usize,
    end: usize,
    #[serde(flatten)]
    segment: Segment,
}

/// Dump the segments of `input` to `output`. Returns the number of segments.
pub fn write_segments<R, W>(input: R, output: &mut W) -> Result<usize, String>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let mut records = Vec::new();
    for scanned in Scanner::new(input) {
        let (segment, range) = scanned.map_err(|e| format!("failed to read input: {}", e))?;
        records.push(SegmentRecord {
            start: range.start,
            end: range.end,
            segment,
        });
    }

    serde_json::to_writer_pretty(&mut *output, &records)
        .map_err(|e| format!("JSON serialization failed: {}", e))?;
    writeln!(output).map_err(|e| format!("failed to write output: {}", e))?;
    Ok(records.len())
}
