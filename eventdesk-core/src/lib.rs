//! Core library for eventdesk.
//!
//! - `state`: the application state and every transition on it
//! - `capacity`, `registration`, `trigger`: the rules those transitions use
//! - `storage`: the key-value persistence side channel
//! - `export`, `public_link`, `stats`: read-only views over the state

pub mod capacity;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod ids;
pub mod notification;
pub mod public_link;
pub mod registration;
pub mod seed;
pub mod state;
pub mod stats;
pub mod storage;
pub mod trigger;
pub mod user;
pub mod validation;

pub use error::{EventDeskError, EventDeskResult};
pub use state::{Action, AppState, Outcome, Transition};
