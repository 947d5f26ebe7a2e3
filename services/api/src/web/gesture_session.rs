//! services/api/src/web/gesture_session.rs
//!
//! The per-connection state of the gesture channel. `GestureSession` turns
//! each client message into the server messages it causes; it owns no I/O,
//! so the socket task drives it one message at a time.

use handspeak_core::gesture::{GestureEstimator, HandLandmarks};
use rand::seq::SliceRandom;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

use crate::web::protocol::{ClientMessage, ServerMessage};

struct Practice {
    targets: VecDeque<String>,
    matched: usize,
}

pub struct GestureSession {
    estimator: Arc<GestureEstimator>,
    min_confidence: f32,
    /// The sign last reported with `detected`.
    current: Option<String>,
    practice: Option<Practice>,
}

impl GestureSession {
    pub fn new(estimator: Arc<GestureEstimator>, min_confidence: f32) -> Self {
        Self {
            estimator,
            min_confidence,
            current: None,
            practice: None,
        }
    }

    /// Parses a raw text frame and handles it. Malformed JSON yields an
    /// `error` message instead of closing the channel.
    pub fn handle_text(&mut self, text: &str) -> Vec<ServerMessage> {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(msg) => self.handle(msg),
            Err(e) => vec![error(format!("Invalid message: {}", e))],
        }
    }

    pub fn handle(&mut self, msg: ClientMessage) -> Vec<ServerMessage> {
        match msg {
            ClientMessage::Frame { landmarks } => match HandLandmarks::new(&landmarks) {
                Ok(hand) => self.on_frame(&hand),
                Err(e) => vec![error(e.to_string())],
            },
            ClientMessage::NoHand => self.lose().into_iter().collect(),
            ClientMessage::StartPractice { targets } => self.start_practice(targets),
            ClientMessage::SkipTarget => match self.practice.as_mut() {
                Some(practice) => {
                    practice.targets.pop_front();
                    self.next_target()
                }
                None => vec![error("No practice in progress".to_string())],
            },
            ClientMessage::StopPractice => {
                self.practice = None;
                Vec::new()
            }
        }
    }

    fn on_frame(&mut self, hand: &HandLandmarks) -> Vec<ServerMessage> {
        let estimation = self.estimator.estimate(hand, self.min_confidence);
        let Some(best) = estimation.best() else {
            return self.lose().into_iter().collect();
        };

        let mut out = Vec::new();
        if self.current.as_deref() != Some(best.name.as_str()) {
            debug!("Detected {} ({:.2})", best.name, best.confidence);
            self.current = Some(best.name.clone());
            out.push(ServerMessage::Detected {
                name: best.name.clone(),
                confidence: best.confidence,
            });
        }

        let is_target = self
            .practice
            .as_ref()
            .and_then(|p| p.targets.front())
            .is_some_and(|target| *target == best.name);
        if is_target {
            if let Some(practice) = self.practice.as_mut() {
                practice.targets.pop_front();
                practice.matched += 1;
            }
            out.push(ServerMessage::TargetMatched {
                name: best.name.clone(),
                confidence: best.confidence,
            });
            out.extend(self.next_target());
        }
        out
    }

    fn lose(&mut self) -> Option<ServerMessage> {
        let previous = self.current.take()?;
        debug!("Lost {}", previous);
        Some(ServerMessage::Lost)
    }

    fn start_practice(&mut self, targets: Option<Vec<String>>) -> Vec<ServerMessage> {
        let mut targets: Vec<String> = match targets {
            Some(list) if !list.is_empty() => list,
            _ => self.estimator.names().map(str::to_string).collect(),
        };

        if let Some(unknown) = targets.iter().find(|t| !self.estimator.contains(t)) {
            return vec![error(format!("Unknown practice target: {}", unknown))];
        }

        targets.shuffle(&mut rand::thread_rng());
        self.practice = Some(Practice {
            targets: targets.into(),
            matched: 0,
        });
        self.next_target()
    }

    /// Announces the current target, or completes the round when none are left.
    fn next_target(&mut self) -> Vec<ServerMessage> {
        let Some(practice) = self.practice.as_ref() else {
            return Vec::new();
        };
        if let Some(name) = practice.targets.front() {
            return vec![ServerMessage::PracticeTarget {
                name: name.clone(),
                remaining: practice.targets.len(),
            }];
        }
        let matched = practice.matched;
        self.practice = None;
        vec![ServerMessage::PracticeComplete { matched }]
    }
}

fn error(message: String) -> ServerMessage {
    ServerMessage::Error { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handspeak_core::gesture::library::{LETTER_A, THUMBS_UP};
    use handspeak_core::gesture::{test_hands, DEFAULT_MIN_CONFIDENCE};

    fn thumbs_up() -> Vec<[f32; 3]> {
        test_hands::thumbs_up().points().to_vec()
    }

    fn fist() -> Vec<[f32; 3]> {
        test_hands::fist_a().points().to_vec()
    }

    fn session() -> GestureSession {
        GestureSession::new(Arc::new(GestureEstimator::default()), DEFAULT_MIN_CONFIDENCE)
    }

    fn frame(landmarks: Vec<[f32; 3]>) -> ClientMessage {
        ClientMessage::Frame { landmarks }
    }

    fn names(msgs: &[ServerMessage]) -> Vec<&'static str> {
        msgs.iter()
            .map(|m| match m {
                ServerMessage::Detected { .. } => "detected",
                ServerMessage::Lost => "lost",
                ServerMessage::PracticeTarget { .. } => "practice_target",
                ServerMessage::TargetMatched { .. } => "target_matched",
                ServerMessage::PracticeComplete { .. } => "practice_complete",
                ServerMessage::Error { .. } => "error",
            })
            .collect()
    }

    #[test]
    fn detection_is_reported_once_per_change() {
        let mut s = session();
        let first = s.handle(frame(thumbs_up()));
        assert!(matches!(
            first.as_slice(),
            [ServerMessage::Detected { name, confidence }] if name == THUMBS_UP && *confidence > 6.5
        ));
        assert!(s.handle(frame(thumbs_up())).is_empty());

        let changed = s.handle(frame(fist()));
        assert!(matches!(
            changed.as_slice(),
            [ServerMessage::Detected { name, .. }] if name == LETTER_A
        ));
    }

    #[test]
    fn no_hand_loses_only_after_detection() {
        let mut s = session();
        assert!(s.handle(ClientMessage::NoHand).is_empty());
        s.handle(frame(thumbs_up()));
        assert_eq!(s.handle(ClientMessage::NoHand), vec![ServerMessage::Lost]);
        assert!(s.handle(ClientMessage::NoHand).is_empty());
        // detected again after losing it
        assert_eq!(names(&s.handle(frame(thumbs_up()))), vec!["detected"]);
    }

    #[test]
    fn invalid_landmarks_report_error() {
        let mut s = session();
        let out = s.handle(frame(vec![[0.0; 3]; 5]));
        assert!(matches!(out.as_slice(), [ServerMessage::Error { message }] if message.contains("21")));
    }

    #[test]
    fn malformed_text_reports_error() {
        let mut s = session();
        assert_eq!(names(&s.handle_text("not json")), vec!["error"]);
        assert_eq!(names(&s.handle_text(r#"{"type":"wave"}"#)), vec!["error"]);
        assert!(s.handle_text(r#"{"type":"no_hand"}"#).is_empty());
    }

    #[test]
    fn single_target_practice_completes_on_match() {
        let mut s = session();
        let start = s.handle(ClientMessage::StartPractice {
            targets: Some(vec![THUMBS_UP.to_string()]),
        });
        assert_eq!(
            start,
            vec![ServerMessage::PracticeTarget {
                name: THUMBS_UP.to_string(),
                remaining: 1
            }]
        );

        // the fist is detected but is not the target
        assert_eq!(names(&s.handle(frame(fist()))), vec!["detected"]);

        let out = s.handle(frame(thumbs_up()));
        assert_eq!(names(&out), vec!["detected", "target_matched", "practice_complete"]);
        assert_eq!(out[2], ServerMessage::PracticeComplete { matched: 1 });
    }

    #[test]
    fn held_sign_matches_newly_announced_target() {
        let mut s = session();
        s.handle(frame(thumbs_up()));
        s.handle(ClientMessage::StartPractice {
            targets: Some(vec![THUMBS_UP.to_string()]),
        });
        let out = s.handle(frame(thumbs_up()));
        assert_eq!(names(&out), vec!["target_matched", "practice_complete"]);
    }

    #[test]
    fn default_practice_covers_every_sign() {
        let mut s = session();
        let out = s.handle(ClientMessage::StartPractice { targets: None });
        assert!(matches!(out.as_slice(), [ServerMessage::PracticeTarget { remaining: 4, .. }]));

        let mut seen = Vec::new();
        let mut last = out;
        loop {
            match last.as_slice() {
                [ServerMessage::PracticeTarget { name, .. }] => seen.push(name.clone()),
                [ServerMessage::PracticeComplete { matched }] => {
                    assert_eq!(*matched, 0);
                    break;
                }
                other => panic!("unexpected {:?}", other),
            }
            last = s.handle(ClientMessage::SkipTarget);
        }
        seen.sort();
        let mut all: Vec<String> = GestureEstimator::default().names().map(str::to_string).collect();
        all.sort();
        assert_eq!(seen, all);
    }

    #[test]
    fn unknown_target_is_rejected() {
        let mut s = session();
        let out = s.handle(ClientMessage::StartPractice {
            targets: Some(vec!["Z".to_string()]),
        });
        assert!(matches!(out.as_slice(), [ServerMessage::Error { message }] if message.contains("Z")));
        assert_eq!(names(&s.handle(ClientMessage::SkipTarget)), vec!["error"]);
    }

    #[test]
    fn stop_practice_keeps_detection() {
        let mut s = session();
        s.handle(ClientMessage::StartPractice {
            targets: Some(vec![THUMBS_UP.to_string()]),
        });
        assert!(s.handle(ClientMessage::StopPractice).is_empty());
        assert_eq!(names(&s.handle(frame(thumbs_up()))), vec!["detected"]);
    }
}
