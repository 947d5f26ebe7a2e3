//! Declarative gesture descriptions scored against an estimated finger pose.

use super::landmarks::Finger;
use super::pose::{FingerCurl, FingerDirection, FingerPose};

/// Highest score a description can award.
pub const MAX_SCORE: f32 = 10.0;

/// A named hand sign described as expected curls and directions per finger.
///
/// Each finger may list several acceptable curls and directions, each with
/// a contribution in `0..=1`. Fingers without entries do not affect the score.
#[derive(Debug, Clone)]
pub struct GestureDescription {
    name: String,
    curls: [Vec<(FingerCurl, f32)>; 5],
    directions: [Vec<(FingerDirection, f32)>; 5],
    weights: [f32; 5],
}

impl GestureDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            curls: Default::default(),
            directions: Default::default(),
            weights: [1.0; 5],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_curl(mut self, finger: Finger, curl: FingerCurl, contribution: f32) -> Self {
        self.curls[finger.index()].push((curl, contribution.clamp(0.0, 1.0)));
        self
    }

    pub fn add_direction(
        mut self,
        finger: Finger,
        direction: FingerDirection,
        contribution: f32,
    ) -> Self {
        self.directions[finger.index()].push((direction, contribution.clamp(0.0, 1.0)));
        self
    }

    /// Sets how much a finger counts relative to the others (default 1).
    pub fn set_weight(mut self, finger: Finger, weight: f32) -> Self {
        self.weights[finger.index()] = weight.max(0.0);
        self
    }

    /// Scores `pose` on a `0..=10` scale.
    pub fn score(&self, pose: &FingerPose) -> f32 {
        let mut score = 0.0;
        let mut total_weight = 0.0;

        for finger in Finger::ALL {
            let i = finger.index();
            let weight = self.weights[i];

            if !self.curls[i].is_empty() {
                total_weight += weight;
                score += weight * contribution_of(&self.curls[i], pose.curl(finger));
            }
            if !self.directions[i].is_empty() {
                total_weight += weight;
                score += weight * contribution_of(&self.directions[i], pose.direction(finger));
            }
        }

        if total_weight <= 0.0 {
            return 0.0;
        }
        score / total_weight * MAX_SCORE
    }
}

fn contribution_of<T: PartialEq>(expected: &[(T, f32)], detected: T) -> f32 {
    expected
        .iter()
        .filter(|(value, _)| *value == detected)
        .map(|(_, contribution)| *contribution)
        .fold(0.0, f32::max)
}
