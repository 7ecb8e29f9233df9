//! Encoding of the outbound relay report.
//!
//! A report is a single run of lowercase hex digits with no separators.
//! Every field is zero-padded to twice its byte width, so boundaries are
//! recoverable from position alone:
//!
//! ```text
//! preamble(4) count(4) { id(8) x(4) y(4) type(4) color(4) }*
//! ```
//!
//! Signed fields are written in two's complement.

use std::fmt::Write;

use ptrk_core::TrackedObject;

/// Fixed value opening every report.
pub const PREAMBLE: i32 = 0xFEFF;

/// Hex characters in the preamble and count header.
const HEADER_LEN: usize = 8 + 8;

/// Hex characters per encoded object.
const OBJECT_LEN: usize = 16 + 8 + 8 + 8 + 8;

/// Length in characters of a report carrying `count` objects.
pub fn report_len(count: usize) -> usize {
    HEADER_LEN + count * OBJECT_LEN
}

/// Encodes a snapshot, in iteration order, as a relay report.
pub fn encode_report(objects: &[TrackedObject]) -> String {
    let mut out = String::with_capacity(report_len(objects.len()));
    // Snapshots stay in the tens to hundreds; saturate rather than wrap.
    let count = i32::try_from(objects.len()).unwrap_or(i32::MAX);

    // Writing into a String cannot fail
    let _ = write!(out, "{PREAMBLE:08x}{count:08x}");
    for object in objects {
        let _ = write!(
            out,
            "{:016x}{:08x}{:08x}{:08x}{:08x}",
            object.id.as_i64(),
            object.x,
            object.y,
            object.kind.as_u32(),
            object.color.as_u32()
        );
    }

    out
}
