//! Room signaling server for video calls.
//!
//! Keeps rooms in memory and answers create/join/leave/send-message/get-room-info
//! on `POST /api/video`. Rooms older than the configured age are swept.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin studyroom-server
//! cargo run --bin studyroom-server -- --host 0.0.0.0 --port 3000 --expiry-policy idle
//! ```

use std::sync::Arc;

use clap::Parser;
use studyroom_server::{
    config::{ExpiryPolicyKind, ServerConfig},
    infrastructure::repository::InMemoryRoomRepository,
    ui::{AppState, Server},
};
use studyroom_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "studyroom-server")]
#[command(about = "Video-call room signaling server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Rooms older than this many seconds are removed
    #[arg(long, default_value = "86400")]
    room_max_age_secs: u64,

    /// Measure room age from creation (absolute) or from last activity (idle)
    #[arg(long, value_enum, default_value = "absolute")]
    expiry_policy: ExpiryPolicyKind,

    /// Background sweep interval in seconds (0 disables it)
    #[arg(long, default_value = "60")]
    sweep_interval_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = ServerConfig::from_parts(
        args.host,
        args.port,
        args.expiry_policy,
        args.room_max_age_secs,
        args.sweep_interval_secs,
    );
    tracing::debug!("Server config: {:?}", config);

    // 1. Repository (in-memory)
    let repository = Arc::new(InMemoryRoomRepository::empty());

    // 2. UseCases
    let app_state = Arc::new(AppState::new(
        repository,
        Arc::new(SystemClock),
        config.expiry_policy,
    ));

    // 3. Server
    let server = Server::new(app_state, config.sweep_interval);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
