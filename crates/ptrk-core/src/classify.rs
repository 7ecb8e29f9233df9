//! Proximity classification.
//!
//! Every object is measured against the designated coordinate and
//! colored by its type:
//!
//! | type | default | closer than 100 | closer than 75 | closer than 50 |
//! |------|---------|-----------------|----------------|----------------|
//! | 3    | yellow  | red             | red            | red            |
//! | 1    | green   | green           | yellow         | red            |
//! | 2    | green   | green           | green          | yellow         |
//!
//! Thresholds are strict: an object exactly at a radius gets the
//! farther color. Comparisons use exact squared integer distances.

use crate::color::Color;
use crate::kind::ObjectType;

/// X of the coordinate all objects are assessed against.
pub const DESIGNATED_X: i32 = 150;

/// Y of the coordinate all objects are assessed against.
pub const DESIGNATED_Y: i32 = 150;

/// Type 3 objects turn red inside this radius.
const TYPE_THREE_RED_RADIUS: i128 = 100;

/// Type 1 objects turn red inside this radius.
const TYPE_ONE_RED_RADIUS: i128 = 50;

/// Type 1 objects turn yellow inside this radius.
const TYPE_ONE_YELLOW_RADIUS: i128 = 75;

/// Type 2 objects turn yellow inside this radius.
const TYPE_TWO_YELLOW_RADIUS: i128 = 50;

/// Squared distance from the designated coordinate.
///
/// i128 keeps the full i32 coordinate range free of overflow.
fn squared_distance(x: i32, y: i32) -> i128 {
    let dx = i128::from(x) - i128::from(DESIGNATED_X);
    let dy = i128::from(y) - i128::from(DESIGNATED_Y);
    dx * dx + dy * dy
}

fn within(squared: i128, radius: i128) -> bool {
    squared < radius * radius
}

/// Euclidean distance from the designated coordinate.
pub fn distance(x: i32, y: i32) -> f64 {
    (squared_distance(x, y) as f64).sqrt()
}

/// Assigns a color to an object of the given type at `(x, y)`.
pub fn classify(kind: ObjectType, x: i32, y: i32) -> Color {
    let squared = squared_distance(x, y);

    match kind {
        ObjectType::Three => {
            if within(squared, TYPE_THREE_RED_RADIUS) {
                Color::RED
            } else {
                Color::YELLOW
            }
        }
        ObjectType::One => {
            // Tightest bound first
            if within(squared, TYPE_ONE_RED_RADIUS) {
                Color::RED
            } else if within(squared, TYPE_ONE_YELLOW_RADIUS) {
                Color::YELLOW
            } else {
                Color::GREEN
            }
        }
        ObjectType::Two => {
            if within(squared, TYPE_TWO_YELLOW_RADIUS) {
                Color::YELLOW
            } else {
                Color::GREEN
            }
        }
    }
}
