//! Static hand-sign recognition from 21-point hand landmarks.
//!
//! Landmarks are reduced to a per-finger pose (curl and pointing direction),
//! which is scored against a list of [`GestureDescription`]s. The best match
//! at or above a confidence threshold is the detected sign.

pub mod description;
pub mod estimator;
pub mod landmarks;
pub mod library;
pub mod pose;

pub use description::{GestureDescription, MAX_SCORE};
pub use estimator::{Estimation, GestureEstimator, GestureMatch};
pub use landmarks::{Finger, HandLandmarks, LandmarkError, LANDMARK_COUNT};
pub use library::DEFAULT_MIN_CONFIDENCE;
pub use pose::{FingerCurl, FingerDirection, FingerPose};

#[cfg(any(test, feature = "test-util"))]
pub mod test_hands {
    //! Synthetic hands in image coordinates (y down), shared by the tests of
    //! this crate and, through the `test-util` feature, of the API service.

    use super::landmarks::{Finger, HandLandmarks, LANDMARK_COUNT, WRIST};

    fn set_finger(points: &mut [[f32; 3]], finger: Finger, base: [f32; 2], mid: [f32; 2], tip: [f32; 2]) {
        let [b, m, d, t] = finger.joints();
        points[b] = [base[0], base[1], 0.0];
        points[m] = [mid[0], mid[1], 0.0];
        points[d] = [(mid[0] + tip[0]) / 2.0, (mid[1] + tip[1]) / 2.0, 0.0];
        points[t] = [tip[0], tip[1], 0.0];
    }

    fn build(fill: impl FnOnce(&mut [[f32; 3]])) -> HandLandmarks {
        let mut points = vec![[0.0; 3]; LANDMARK_COUNT];
        points[WRIST] = [0.0, 5.0, 0.0];
        fill(&mut points);
        HandLandmarks::new(&points).unwrap()
    }

    const FOUR: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// Straight thumb pointing up; fingers folded back, knuckles stacked.
    pub fn thumbs_up() -> HandLandmarks {
        build(|p| {
            set_finger(p, Finger::Thumb, [0.0, 0.0], [0.0, -1.0], [0.0, -3.0]);
            for (i, f) in FOUR.into_iter().enumerate() {
                let y = 1.0 + i as f32;
                set_finger(p, f, [0.0, y], [1.0, y], [-0.3, y]);
            }
        })
    }

    /// Upright fist, fingertips folded below the knuckles, thumb up.
    pub fn fist_a() -> HandLandmarks {
        build(|p| {
            set_finger(p, Finger::Thumb, [-1.0, 0.0], [-1.0, -1.0], [-1.0, -2.5]);
            for (i, f) in FOUR.into_iter().enumerate() {
                let x = i as f32;
                set_finger(p, f, [x, 0.0], [x, -1.0], [x, 0.3]);
            }
        })
    }

    /// Flat hand with the thumb bent across the palm.
    pub fn flat_b() -> HandLandmarks {
        build(|p| {
            set_finger(p, Finger::Thumb, [0.0, 0.0], [0.5, -0.5], [1.0, 0.0]);
            for (i, f) in FOUR.into_iter().enumerate() {
                let x = i as f32;
                set_finger(p, f, [x, 0.0], [x, -1.0], [x, -3.0]);
            }
        })
    }

    /// Index and middle up, ring and pinky folded, thumb bent.
    pub fn victory() -> HandLandmarks {
        build(|p| {
            set_finger(p, Finger::Thumb, [0.0, 0.0], [0.5, -0.5], [1.0, 0.0]);
            set_finger(p, Finger::Index, [0.0, 0.0], [0.0, -1.0], [0.0, -3.0]);
            set_finger(p, Finger::Middle, [1.0, 0.0], [1.0, -1.0], [1.0, -3.0]);
            set_finger(p, Finger::Ring, [2.0, 0.0], [2.0, -1.0], [2.0, 0.3]);
            set_finger(p, Finger::Pinky, [3.0, 0.0], [3.0, -1.0], [3.0, 0.3]);
        })
    }
}
