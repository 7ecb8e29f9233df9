//! Proximity colors.
//!
//! A color is relayed as four opaque bytes, so it is a `u32` newtype
//! rather than an enum. The sentinels spell the ANSI SGR sequences
//! `ESC[1m`, `ESC[3m` and `ESC[2m` in big-endian byte order.

use std::fmt;

/// Classification tag assigned to a tracked object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    /// Object is too close.
    pub const RED: Color = Color(0x1B5B_316D);
    /// Object is approaching.
    pub const YELLOW: Color = Color(0x1B5B_336D);
    /// Object is far enough away.
    pub const GREEN: Color = Color(0x1B5B_326D);

    /// Wraps an arbitrary raw value.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw 4-byte value.
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns a human-readable name for the sentinel colors.
    pub fn name(&self) -> &'static str {
        match *self {
            Self::RED => "red",
            Self::YELLOW => "yellow",
            Self::GREEN => "green",
            _ => "unknown",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
