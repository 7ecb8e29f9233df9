//! Tracked object records.

use std::fmt;

use crate::classify;
use crate::color::Color;
use crate::kind::ObjectType;

/// Unique identifier for a tracked object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(i64);

impl ObjectId {
    /// Creates a new ObjectId.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ObjectId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One object state as received from the server, before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectReport {
    pub id: ObjectId,
    pub x: i32,
    pub y: i32,
    pub kind: ObjectType,
}

/// The latest known state of an object, with its derived color.
///
/// The color is computed once by [`TrackedObject::classify`] and stored;
/// relaying never recomputes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedObject {
    pub id: ObjectId,
    pub x: i32,
    pub y: i32,
    pub kind: ObjectType,
    pub color: Color,
}

impl TrackedObject {
    /// Classifies a report and returns the resulting tracked object.
    pub fn classify(report: ObjectReport) -> Self {
        Self {
            id: report.id,
            x: report.x,
            y: report.y,
            kind: report.kind,
            color: classify::classify(report.kind, report.x, report.y),
        }
    }

    /// Returns the report this object was built from.
    pub fn report(&self) -> ObjectReport {
        ObjectReport {
            id: self.id,
            x: self.x,
            y: self.y,
            kind: self.kind,
        }
    }

    /// Distance from the designated coordinate.
    pub fn distance(&self) -> f64 {
        classify::distance(self.x, self.y)
    }
}

impl fmt::Display for TrackedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Object{{id={}, x={}, y={}, type={}}}",
            self.id, self.x, self.y, self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(x: i32, y: i32, kind: ObjectType) -> ObjectReport {
        ObjectReport {
            id: ObjectId::new(7),
            x,
            y,
            kind,
        }
    }

    #[test]
    fn test_classify_sets_color_once() {
        let tracked = TrackedObject::classify(report(150, 150, ObjectType::Three));
        assert_eq!(tracked.color, Color::RED);
        assert_eq!(tracked.report(), report(150, 150, ObjectType::Three));
    }

    #[test]
    fn test_display_format() {
        let tracked = TrackedObject::classify(ObjectReport {
            id: ObjectId::new(-42),
            x: 1,
            y: -2,
            kind: ObjectType::Two,
        });
        assert_eq!(tracked.to_string(), "Object{id=-42, x=1, y=-2, type=2}");
    }

    #[test]
    fn test_object_id_roundtrip() {
        let id = ObjectId::from(i64::MIN);
        assert_eq!(id.as_i64(), i64::MIN);
        assert_eq!(ObjectId::new(123).to_string(), "123");
    }

    #[test]
    fn test_distance_delegates_to_classifier() {
        let tracked = TrackedObject::classify(report(180, 190, ObjectType::One));
        assert!((tracked.distance() - 50.0).abs() < f64::EPSILON);
    }
}
