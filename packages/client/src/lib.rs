//! Session client for studyroom video-call rooms.
//!
//! A [`SessionController`](controller::SessionController) joins a room through
//! the room API, keeps a polled snapshot of its participants and messages, and
//! leaves the room when it is torn down.

pub mod api;
pub mod controller;
pub mod domain;
pub mod error;
pub mod session;

mod formatter;
mod runner;
mod ui;

pub use runner::{ClientOptions, run_client};
