//! ptrk Protocol - Wire formats for the tracking feed
//!
//! This crate provides the two wire formats the client speaks:
//! the inbound line protocol (`ID=..;X=..;Y=..;TYPE=..`) and the
//! outbound hex-encoded relay report.

pub mod parse;
pub mod relay;
pub mod split;

pub use parse::{format_line, parse_line, ParseError};
pub use relay::{encode_report, report_len, PREAMBLE};
pub use split::split_on;
