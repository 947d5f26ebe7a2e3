//! Ranks gesture descriptions against a hand.

use super::description::GestureDescription;
use super::landmarks::HandLandmarks;
use super::pose::FingerPose;

#[derive(Debug, Clone, PartialEq)]
pub struct GestureMatch {
    pub name: String,
    pub confidence: f32,
}

/// Result of estimating one hand.
#[derive(Debug, Clone)]
pub struct Estimation {
    pub pose: FingerPose,
    /// Matches at or above the requested confidence, highest first.
    pub gestures: Vec<GestureMatch>,
}

impl Estimation {
    pub fn best(&self) -> Option<&GestureMatch> {
        self.gestures.first()
    }
}

pub struct GestureEstimator {
    descriptions: Vec<GestureDescription>,
}

impl GestureEstimator {
    pub fn new(descriptions: Vec<GestureDescription>) -> Self {
        Self { descriptions }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.descriptions.iter().map(|d| d.name())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptions.iter().any(|d| d.name() == name)
    }

    pub fn estimate(&self, hand: &HandLandmarks, min_confidence: f32) -> Estimation {
        let pose = FingerPose::estimate(hand);

        let mut gestures: Vec<GestureMatch> = self
            .descriptions
            .iter()
            .map(|d| GestureMatch {
                name: d.name().to_string(),
                confidence: d.score(&pose),
            })
            .filter(|m| m.confidence >= min_confidence)
            .collect();

        // stable sort keeps description order for ties
        gestures.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        Estimation { pose, gestures }
    }
}

impl Default for GestureEstimator {
    fn default() -> Self {
        Self::new(super::library::default_signs())
    }
}
