//! HTTP handlers.

mod http;
mod video;

pub use http::{get_rooms, health_check};
pub use video::video_api;
