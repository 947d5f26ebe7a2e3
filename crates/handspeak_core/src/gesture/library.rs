//! Built-in library of static hand signs.

use super::description::GestureDescription;
use super::landmarks::Finger;
use super::pose::FingerCurl::{FullCurl, HalfCurl, NoCurl};
use super::pose::FingerDirection::*;

/// Minimum confidence (out of 10) for a sign to count as detected.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 6.5;

pub const THUMBS_UP: &str = "thumbs_up";
pub const VICTORY: &str = "victory";
pub const LETTER_A: &str = "A";
pub const LETTER_B: &str = "B";

const CURLED_FINGERS: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

/// Thumb pointing up out of a sideways fist.
pub fn thumbs_up() -> GestureDescription {
    let mut desc = GestureDescription::new(THUMBS_UP)
        .add_curl(Finger::Thumb, NoCurl, 1.0)
        .add_direction(Finger::Thumb, VerticalUp, 1.0)
        .add_direction(Finger::Thumb, DiagonalUpLeft, 0.25)
        .add_direction(Finger::Thumb, DiagonalUpRight, 0.25);
    for finger in CURLED_FINGERS {
        desc = desc
            .add_curl(finger, FullCurl, 1.0)
            .add_curl(finger, HalfCurl, 0.9)
            .add_direction(finger, HorizontalLeft, 1.0)
            .add_direction(finger, HorizontalRight, 1.0);
    }
    desc
}

/// Index and middle fingers raised in a V, ring and pinky folded.
pub fn victory() -> GestureDescription {
    let mut desc = GestureDescription::new(VICTORY)
        .add_curl(Finger::Thumb, HalfCurl, 0.5)
        .add_curl(Finger::Thumb, NoCurl, 0.5);
    for finger in [Finger::Index, Finger::Middle] {
        desc = desc
            .add_curl(finger, NoCurl, 1.0)
            .add_direction(finger, VerticalUp, 1.0)
            .add_direction(finger, DiagonalUpLeft, 1.0)
            .add_direction(finger, DiagonalUpRight, 1.0)
            .set_weight(finger, 2.0);
    }
    for finger in [Finger::Ring, Finger::Pinky] {
        desc = desc.add_curl(finger, FullCurl, 1.0);
    }
    desc
}

/// ASL letter A: upright fist with the thumb resting alongside the index finger.
pub fn letter_a() -> GestureDescription {
    let mut desc = GestureDescription::new(LETTER_A)
        .add_curl(Finger::Thumb, NoCurl, 1.0)
        .add_curl(Finger::Thumb, HalfCurl, 0.5)
        .add_direction(Finger::Thumb, VerticalUp, 1.0)
        .add_direction(Finger::Thumb, DiagonalUpLeft, 0.5)
        .add_direction(Finger::Thumb, DiagonalUpRight, 0.5);
    for finger in CURLED_FINGERS {
        desc = desc
            .add_curl(finger, FullCurl, 1.0)
            .add_direction(finger, VerticalDown, 1.0)
            .add_direction(finger, DiagonalDownLeft, 0.5)
            .add_direction(finger, DiagonalDownRight, 0.5);
    }
    desc
}

/// ASL letter B: flat hand, fingers up, thumb folded across the palm.
pub fn letter_b() -> GestureDescription {
    let mut desc = GestureDescription::new(LETTER_B)
        .add_curl(Finger::Thumb, HalfCurl, 1.0)
        .add_curl(Finger::Thumb, FullCurl, 0.9);
    for finger in CURLED_FINGERS {
        desc = desc
            .add_curl(finger, NoCurl, 1.0)
            .add_direction(finger, VerticalUp, 1.0)
            .add_direction(finger, DiagonalUpLeft, 0.25)
            .add_direction(finger, DiagonalUpRight, 0.25);
    }
    desc
}

/// Every built-in sign, in tie-breaking order.
pub fn default_signs() -> Vec<GestureDescription> {
    vec![thumbs_up(), victory(), letter_a(), letter_b()]
}
