pub mod auth;
pub mod dto;
pub mod gesture_session;
pub mod gesture_ws;
pub mod gestures;
pub mod middleware;
pub mod progress;
pub mod protocol;
pub mod rest;
pub mod router;
pub mod state;

// Re-export the router builder and state so the binary and the integration
// tests can assemble the server.
pub use router::app;
pub use state::AppState;
