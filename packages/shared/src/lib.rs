//! Utilities shared by the studyroom server and client.
//!
//! - `logger`: tracing subscriber setup for the binaries
//! - `time`: clock abstraction and timestamp formatting

pub mod logger;
pub mod time;
