//! Object type identification.

use std::fmt;

use crate::error::{DomainError, DomainResult};

/// Type of a tracked object as reported on the wire.
///
/// Only the values 1, 2 and 3 exist; anything else is rejected when
/// converting from the raw wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// Wire value 1.
    One,
    /// Wire value 2.
    Two,
    /// Wire value 3.
    Three,
}

impl ObjectType {
    /// Returns the wire value of this type.
    pub fn as_u32(&self) -> u32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl TryFrom<u32> for ObjectType {
    type Error = DomainError;

    fn try_from(value: u32) -> DomainResult<Self> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(DomainError::InvalidFieldValue {
                field: "type".to_string(),
                value: other.to_string(),
                expected: "1, 2 or 3".to_string(),
            }),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}
