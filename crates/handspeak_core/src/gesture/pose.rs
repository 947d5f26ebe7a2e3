//! Per-finger curl and direction estimation.

use super::landmarks::{distance, Finger, HandLandmarks};

/// Above this angle (degrees) at the proximal joint a finger is straight.
const NO_CURL_LIMIT_DEG: f32 = 130.0;
/// Above this angle a finger is half curled, below it fully curled.
const HALF_CURL_LIMIT_DEG: f32 = 60.0;
const THUMB_NO_CURL_LIMIT_DEG: f32 = 120.0;
const THUMB_HALF_CURL_LIMIT_DEG: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerCurl {
    NoCurl,
    HalfCurl,
    FullCurl,
}

impl FingerCurl {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCurl => "no-curl",
            Self::HalfCurl => "half-curl",
            Self::FullCurl => "full-curl",
        }
    }
}

/// Pointing direction of a finger, as seen by the viewer with y pointing up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerDirection {
    VerticalUp,
    VerticalDown,
    HorizontalLeft,
    HorizontalRight,
    DiagonalUpLeft,
    DiagonalUpRight,
    DiagonalDownLeft,
    DiagonalDownRight,
}

impl FingerDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VerticalUp => "vertical-up",
            Self::VerticalDown => "vertical-down",
            Self::HorizontalLeft => "horizontal-left",
            Self::HorizontalRight => "horizontal-right",
            Self::DiagonalUpLeft => "diagonal-up-left",
            Self::DiagonalUpRight => "diagonal-up-right",
            Self::DiagonalDownLeft => "diagonal-down-left",
            Self::DiagonalDownRight => "diagonal-down-right",
        }
    }

    /// Classify an angle in degrees, counter-clockwise from the positive x axis.
    fn from_angle(deg: f32) -> Self {
        match deg {
            d if (-22.5..22.5).contains(&d) => Self::HorizontalRight,
            d if (22.5..67.5).contains(&d) => Self::DiagonalUpRight,
            d if (67.5..112.5).contains(&d) => Self::VerticalUp,
            d if (112.5..157.5).contains(&d) => Self::DiagonalUpLeft,
            d if (-67.5..-22.5).contains(&d) => Self::DiagonalDownRight,
            d if (-112.5..-67.5).contains(&d) => Self::VerticalDown,
            d if (-157.5..-112.5).contains(&d) => Self::DiagonalDownLeft,
            _ => Self::HorizontalLeft,
        }
    }
}

/// Curl and direction of all five fingers of one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerPose {
    pub curls: [FingerCurl; 5],
    pub directions: [FingerDirection; 5],
}

impl FingerPose {
    pub fn estimate(hand: &HandLandmarks) -> Self {
        let mut curls = [FingerCurl::NoCurl; 5];
        let mut directions = [FingerDirection::VerticalUp; 5];
        for finger in Finger::ALL {
            let [base, mid, _, tip] = finger.joints().map(|i| hand.point(i));
            curls[finger.index()] = estimate_curl(finger, base, mid, tip);
            directions[finger.index()] = estimate_direction(base, tip);
        }
        Self { curls, directions }
    }

    pub fn curl(&self, finger: Finger) -> FingerCurl {
        self.curls[finger.index()]
    }

    pub fn direction(&self, finger: Finger) -> FingerDirection {
        self.directions[finger.index()]
    }
}

/// Angle (degrees) at `mid` of the triangle base, mid, tip.
fn joint_angle(base: [f32; 3], mid: [f32; 3], tip: [f32; 3]) -> f32 {
    let a = distance(base, mid);
    let b = distance(mid, tip);
    let c = distance(base, tip);
    if a * b <= f32::EPSILON {
        return 180.0;
    }
    let cos = ((a * a + b * b - c * c) / (2.0 * a * b)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

fn estimate_curl(finger: Finger, base: [f32; 3], mid: [f32; 3], tip: [f32; 3]) -> FingerCurl {
    let (no_curl, half_curl) = match finger {
        Finger::Thumb => (THUMB_NO_CURL_LIMIT_DEG, THUMB_HALF_CURL_LIMIT_DEG),
        _ => (NO_CURL_LIMIT_DEG, HALF_CURL_LIMIT_DEG),
    };
    let angle = joint_angle(base, mid, tip);
    if angle > no_curl {
        FingerCurl::NoCurl
    } else if angle > half_curl {
        FingerCurl::HalfCurl
    } else {
        FingerCurl::FullCurl
    }
}

fn estimate_direction(base: [f32; 3], tip: [f32; 3]) -> FingerDirection {
    let dx = tip[0] - base[0];
    // image y grows downward
    let dy = base[1] - tip[1];
    if dx.abs() <= f32::EPSILON && dy.abs() <= f32::EPSILON {
        return FingerDirection::VerticalUp;
    }
    FingerDirection::from_angle(dy.atan2(dx).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_segment_is_no_curl() {
        let curl = estimate_curl(Finger::Index, [0.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, -3.0, 0.0]);
        assert_eq!(curl, FingerCurl::NoCurl);
    }

    #[test]
    fn right_angle_is_half_curl() {
        let curl = estimate_curl(Finger::Index, [0.0, 0.0, 0.0], [0.0, -1.0, 0.0], [1.0, -1.0, 0.0]);
        assert_eq!(curl, FingerCurl::HalfCurl);
    }

    #[test]
    fn folded_finger_is_full_curl() {
        let curl = estimate_curl(Finger::Ring, [0.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.3, 0.0]);
        assert_eq!(curl, FingerCurl::FullCurl);
    }

    #[test]
    fn thumb_uses_lower_straight_limit() {
        // 125 degrees: straight for the thumb, half curled for other fingers
        let tip = {
            let rad = (180.0f32 - 125.0).to_radians();
            [rad.sin() * 2.0, -1.0 - rad.cos() * 2.0, 0.0]
        };
        let base = [0.0, 0.0, 0.0];
        let mid = [0.0, -1.0, 0.0];
        assert_eq!(estimate_curl(Finger::Thumb, base, mid, tip), FingerCurl::NoCurl);
        assert_eq!(estimate_curl(Finger::Index, base, mid, tip), FingerCurl::HalfCurl);
    }

    #[test]
    fn direction_flips_image_y() {
        let base = [0.0, 0.0, 0.0];
        assert_eq!(estimate_direction(base, [0.0, -1.0, 0.0]), FingerDirection::VerticalUp);
        assert_eq!(estimate_direction(base, [0.0, 1.0, 0.0]), FingerDirection::VerticalDown);
        assert_eq!(estimate_direction(base, [1.0, 0.0, 0.0]), FingerDirection::HorizontalRight);
        assert_eq!(estimate_direction(base, [-1.0, 0.0, 0.0]), FingerDirection::HorizontalLeft);
        assert_eq!(estimate_direction(base, [1.0, -1.0, 0.0]), FingerDirection::DiagonalUpRight);
        assert_eq!(estimate_direction(base, [-1.0, -1.0, 0.0]), FingerDirection::DiagonalUpLeft);
        assert_eq!(estimate_direction(base, [1.0, 1.0, 0.0]), FingerDirection::DiagonalDownRight);
        assert_eq!(estimate_direction(base, [-1.0, 1.0, 0.0]), FingerDirection::DiagonalDownLeft);
    }

    #[test]
    fn degenerate_vector_defaults_up() {
        assert_eq!(
            estimate_direction([1.0, 1.0, 0.0], [1.0, 1.0, 0.0]),
            FingerDirection::VerticalUp
        );
    }
}
