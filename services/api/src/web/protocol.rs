//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the browser client and the
//! API server for live hand sign recognition and practice.

use serde::{Deserialize, Serialize};

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// Represents the structured text messages a client can send to the server.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// One frame of hand landmarks from the client's pose model.
    Frame { landmarks: Vec<[f32; 3]> },

    /// The pose model found no hand in the current frame.
    NoHand,

    /// Starts a practice round over the given sign names, or over every
    /// known sign when `targets` is absent or empty.
    StartPractice {
        #[serde(default)]
        targets: Option<Vec<String>>,
    },

    /// Gives up on the current target and moves to the next one.
    SkipTarget,

    /// Ends the practice round; detection continues.
    StopPractice,
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================
// NOTE: detection messages are only sent on a change, never once per frame.
//=========================================================================================

/// Represents the structured text messages the server can send to the client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The best matching sign changed to `name`.
    Detected { name: String, confidence: f32 },

    /// The previously detected sign is no longer matched.
    Lost,

    /// The sign the learner should make next. `remaining` counts the
    /// targets still to go, this one included.
    PracticeTarget { name: String, remaining: usize },

    /// The learner made the current target sign.
    TargetMatched { name: String, confidence: f32 },

    /// Every target of the round has been matched or skipped.
    PracticeComplete { matched: usize },

    /// Reports a recoverable error; the connection stays open.
    Error { message: String },
}
