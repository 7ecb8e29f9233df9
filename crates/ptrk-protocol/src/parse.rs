//! Parsing of the inbound line protocol.
//!
//! Each line describes one object:
//!
//! ```text
//! ID=572912;X=50;Y=130;TYPE=1
//! ```
//!
//! `ID` is a signed 64-bit integer, `X` and `Y` are signed 32-bit
//! integers and `TYPE` is 1, 2 or 3. Keys are case-sensitive and must
//! appear in exactly this order.

use ptrk_core::{ObjectId, ObjectReport, ObjectType};
use thiserror::Error;

use crate::split::split_on;

/// Separator between the fields of a line.
pub const FIELD_SEPARATOR: char = ';';

const ID_KEY: &str = "ID=";
const X_KEY: &str = "X=";
const Y_KEY: &str = "Y=";
const TYPE_KEY: &str = "TYPE=";

const FIELD_COUNT: usize = 4;

/// Reasons a line can be rejected.
///
/// There is no partial success: any of these discards the whole line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line did not split into exactly four fields.
    #[error("incorrect number of separators (expected {expected} fields, found {found})")]
    FieldCount { expected: usize, found: usize },

    /// A field did not start with the key required at its position.
    #[error("field {position} did not start with {expected}")]
    MissingKey {
        position: usize,
        expected: &'static str,
    },

    /// A value was not a number or did not fit its integer type.
    #[error("invalid field value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    /// TYPE was numeric but not one of 1, 2 or 3.
    #[error("invalid type: {value} (expected 1, 2 or 3)")]
    InvalidType { value: i64 },
}

/// Parses one line into an object report.
pub fn parse_line(line: &str) -> Result<ObjectReport, ParseError> {
    let fields = split_on(line, FIELD_SEPARATOR);
    let [id, x, y, kind] = fields.as_slice() else {
        return Err(ParseError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    };

    let id = strip_key(id, 1, ID_KEY)?;
    let x = strip_key(x, 2, X_KEY)?;
    let y = strip_key(y, 3, Y_KEY)?;
    let kind = strip_key(kind, 4, TYPE_KEY)?;

    let id: i64 = parse_value(id, "ID")?;
    let x: i32 = parse_value(x, "X")?;
    let y: i32 = parse_value(y, "Y")?;
    let raw_kind: i64 = parse_value(kind, "TYPE")?;

    // Any number outside the type set is a type error, negatives included
    let kind = u32::try_from(raw_kind)
        .ok()
        .and_then(|wire| ObjectType::try_from(wire).ok())
        .ok_or(ParseError::InvalidType { value: raw_kind })?;

    Ok(ObjectReport {
        id: ObjectId::new(id),
        x,
        y,
        kind,
    })
}

/// Renders a report in canonical line form (without a line terminator).
pub fn format_line(report: &ObjectReport) -> String {
    format!(
        "{ID_KEY}{}{FIELD_SEPARATOR}{X_KEY}{}{FIELD_SEPARATOR}{Y_KEY}{}{FIELD_SEPARATOR}{TYPE_KEY}{}",
        report.id, report.x, report.y, report.kind
    )
}

fn strip_key<'a>(
    field: &'a str,
    position: usize,
    key: &'static str,
) -> Result<&'a str, ParseError> {
    field.strip_prefix(key).ok_or(ParseError::MissingKey {
        position,
        expected: key,
    })
}

fn parse_value<T: std::str::FromStr>(value: &str, field: &'static str) -> Result<T, ParseError> {
    value.parse::<T>().map_err(|_| ParseError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: i64, x: i32, y: i32, kind: ObjectType) -> ObjectReport {
        ObjectReport {
            id: ObjectId::new(id),
            x,
            y,
            kind,
        }
    }

    #[test]
    fn test_valid_lines() {
        assert_eq!(
            parse_line("ID=123;X=1;Y=2;TYPE=3"),
            Ok(report(123, 1, 2, ObjectType::Three))
        );
        assert_eq!(
            parse_line("ID=2691882127234543;X=199;Y=230;TYPE=1"),
            Ok(report(2691882127234543, 199, 230, ObjectType::One))
        );
        assert_eq!(
            parse_line("ID=-5;X=-1000;Y=0;TYPE=2"),
            Ok(report(-5, -1000, 0, ObjectType::Two))
        );
    }

    #[test]
    fn test_smallest_possible_ints() {
        let line = format!("ID={};X={};Y={};TYPE=1", i64::MIN, i32::MIN, i32::MIN);
        assert_eq!(
            parse_line(&line),
            Ok(report(i64::MIN, i32::MIN, i32::MIN, ObjectType::One))
        );
    }

    #[test]
    fn test_largest_possible_ints() {
        let line = format!("ID={};X={};Y={};TYPE=1", i64::MAX, i32::MAX, i32::MAX);
        assert_eq!(
            parse_line(&line),
            Ok(report(i64::MAX, i32::MAX, i32::MAX, ObjectType::One))
        );
    }

    #[test]
    fn test_one_beyond_each_bound() {
        let cases = [
            ("ID=-9223372036854775809;X=0;Y=0;TYPE=1", "ID"),
            ("ID=9223372036854775808;X=0;Y=0;TYPE=1", "ID"),
            ("ID=0;X=-2147483649;Y=0;TYPE=1", "X"),
            ("ID=0;X=2147483648;Y=0;TYPE=1", "X"),
            ("ID=0;X=0;Y=-2147483649;TYPE=1", "Y"),
            ("ID=0;X=0;Y=2147483648;TYPE=1", "Y"),
        ];

        for (line, field) in cases {
            match parse_line(line) {
                Err(ParseError::InvalidValue { field: f, .. }) => assert_eq!(f, field, "{line}"),
                other => panic!("expected InvalidValue for {line}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_and_whitespace_lines() {
        assert_eq!(
            parse_line(""),
            Err(ParseError::FieldCount {
                expected: 4,
                found: 1
            })
        );
        assert!(parse_line("\t \r\n \n\t \r    ").is_err());
    }

    #[test]
    fn test_missing_field() {
        assert_eq!(
            parse_line("ID=2691882127221587;Y=310;TYPE=2"),
            Err(ParseError::FieldCount {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_invalid_value() {
        assert_eq!(
            parse_line("ID=123;X=1;Y=xyz;TYPE=3"),
            Err(ParseError::InvalidValue {
                field: "Y",
                value: "xyz".to_string()
            })
        );
        // Values are strict: no surrounding whitespace, no trailing junk
        assert!(parse_line("ID=123;X= 1;Y=2;TYPE=3").is_err());
        assert!(parse_line("ID=123;X=1;Y=2abc;TYPE=3").is_err());
        assert!(parse_line("ID=123;X=1;Y=2;TYPE=3\r").is_err());
        assert!(parse_line("ID=;X=1;Y=2;TYPE=3").is_err());
    }

    #[test]
    fn test_extra_field_and_separator() {
        assert!(matches!(
            parse_line("ID=123;X=1;Y=2;OTHER=10;TYPE=3"),
            Err(ParseError::FieldCount { found: 5, .. })
        ));
        assert!(matches!(
            parse_line("ID=123;X=1;;Y=2;TYPE=3"),
            Err(ParseError::FieldCount { found: 5, .. })
        ));
    }

    #[test]
    fn test_newline_in_line() {
        assert_eq!(
            parse_line("ID=123;X=1;\nY=2;TYPE=3"),
            Err(ParseError::MissingKey {
                position: 3,
                expected: "Y="
            })
        );
    }

    #[test]
    fn test_keys_are_ordered_and_case_sensitive() {
        assert_eq!(
            parse_line("X=1;ID=123;Y=2;TYPE=3"),
            Err(ParseError::MissingKey {
                position: 1,
                expected: "ID="
            })
        );
        assert_eq!(
            parse_line("ID=123;x=1;Y=2;TYPE=3"),
            Err(ParseError::MissingKey {
                position: 2,
                expected: "X="
            })
        );
        assert!(matches!(
            parse_line("ID=123;X=1;Y=2;type=3"),
            Err(ParseError::MissingKey { position: 4, .. })
        ));
    }

    #[test]
    fn test_type_out_of_range() {
        assert_eq!(
            parse_line("ID=123;X=1;Y=2;TYPE=0"),
            Err(ParseError::InvalidType { value: 0 })
        );
        assert_eq!(
            parse_line("ID=123;X=1;Y=2;TYPE=4"),
            Err(ParseError::InvalidType { value: 4 })
        );
        assert_eq!(
            parse_line("ID=123;X=1;Y=2;TYPE=-1"),
            Err(ParseError::InvalidType { value: -1 })
        );
        assert_eq!(
            parse_line("ID=123;X=1;Y=2;TYPE=4294967296"),
            Err(ParseError::InvalidType { value: 4_294_967_296 })
        );
        assert_eq!(
            parse_line("ID=123;X=1;Y=2;TYPE=4294967297"),
            Err(ParseError::InvalidType { value: 4_294_967_297 })
        );
    }

    #[test]
    fn test_non_numeric_type_is_invalid_value() {
        assert!(matches!(
            parse_line("ID=123;X=1;Y=2;TYPE=one"),
            Err(ParseError::InvalidValue { field: "TYPE", .. })
        ));
        assert!(matches!(
            parse_line("ID=123;X=1;Y=2;TYPE=9223372036854775808"),
            Err(ParseError::InvalidValue { field: "TYPE", .. })
        ));
    }

    #[test]
    fn test_canonical_form_reparses() {
        let lines = [
            "ID=123;X=1;Y=2;TYPE=3",
            "ID=-9223372036854775808;X=-2147483648;Y=2147483647;TYPE=2",
            "ID=+17;X=+0;Y=-0;TYPE=1",
        ];

        for line in lines {
            let parsed = parse_line(line).expect("valid line");
            let canonical = format_line(&parsed);
            assert_eq!(parse_line(&canonical), Ok(parsed), "{line} -> {canonical}");
        }

        assert_eq!(
            format_line(&report(123, 1000, -1000, ObjectType::One)),
            "ID=123;X=1000;Y=-1000;TYPE=1"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = parse_line("ID=1;X=2").unwrap_err();
        assert!(err.to_string().contains("incorrect number of separators"));

        let err = parse_line("ID=1;X=2;Y=three;TYPE=1").unwrap_err();
        assert!(err.to_string().contains("invalid field value"));

        let err = parse_line("ID=1;X=2;Y=3;TYPE=9").unwrap_err();
        assert!(err.to_string().contains("invalid type"));

        let err = parse_line("ID=1;X=2;Y=3;TYPE=-1").unwrap_err();
        assert_eq!(err.to_string(), "invalid type: -1 (expected 1, 2 or 3)");

        let err = parse_line("ID=1;X=2;Z=3;TYPE=1").unwrap_err();
        assert_eq!(err.to_string(), "field 3 did not start with Y=");
    }
}
