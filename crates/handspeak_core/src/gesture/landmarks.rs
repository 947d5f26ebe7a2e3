//! Hand landmark data as produced by a 21-point hand pose model.
//!
//! Coordinates are in image space: x grows to the right, y grows downward.
//! The z component is carried through but the finger-pose estimation only
//! looks at the image plane plus depth for curl angles.

/// Number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

/// Index of the wrist landmark.
pub const WRIST: usize = 0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LandmarkError {
    #[error("Expected {LANDMARK_COUNT} landmarks, got {0}")]
    WrongCount(usize),
    #[error("Landmark {0} has a non-finite coordinate")]
    NonFinite(usize),
}

/// The five fingers, thumb first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Convert finger enum to array index (0-4).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Landmark indices from the finger base to its tip.
    ///
    /// For the thumb this is CMC, MCP, IP, tip; for the other fingers
    /// MCP, PIP, DIP, tip.
    pub fn joints(&self) -> [usize; 4] {
        match self {
            Self::Thumb => [1, 2, 3, 4],
            Self::Index => [5, 6, 7, 8],
            Self::Middle => [9, 10, 11, 12],
            Self::Ring => [13, 14, 15, 16],
            Self::Pinky => [17, 18, 19, 20],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Pinky => "pinky",
        }
    }
}

/// A validated set of 21 hand landmarks.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [[f32; 3]; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: &[[f32; 3]]) -> Result<Self, LandmarkError> {
        let points: [[f32; 3]; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| LandmarkError::WrongCount(points.len()))?;

        if let Some(bad) = points
            .iter()
            .position(|p| p.iter().any(|c| !c.is_finite()))
        {
            return Err(LandmarkError::NonFinite(bad));
        }

        Ok(Self { points })
    }

    pub fn point(&self, index: usize) -> [f32; 3] {
        self.points[index]
    }

    pub fn points(&self) -> &[[f32; 3]; LANDMARK_COUNT] {
        &self.points
    }
}

pub(crate) fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let dz = b[2] - a[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_count() {
        let points = vec![[0.0; 3]; 20];
        assert_eq!(
            HandLandmarks::new(&points),
            Err(LandmarkError::WrongCount(20))
        );
    }

    #[test]
    fn rejects_non_finite() {
        let mut points = vec![[0.0; 3]; LANDMARK_COUNT];
        points[7][1] = f32::NAN;
        assert_eq!(HandLandmarks::new(&points), Err(LandmarkError::NonFinite(7)));
    }

    #[test]
    fn finger_joints_cover_all_non_wrist_landmarks() {
        let mut seen: Vec<usize> = Finger::ALL.iter().flat_map(|f| f.joints()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (1..LANDMARK_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn distance_is_euclidean() {
        assert!((distance([0.0, 0.0, 0.0], [3.0, 4.0, 0.0]) - 5.0).abs() < 1e-6);
    }
}
