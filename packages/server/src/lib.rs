//! Room signaling server for studyroom video sessions.
//!
//! Keeps every live room in memory and exposes the room lifecycle
//! (create, join, leave, send-message, get-room-info) through a single
//! `POST /api/video` endpoint. Rooms past their expiry policy are swept
//! before each request.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
