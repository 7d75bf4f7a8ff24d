//! Interactive video-call session client.
//!
//! Joins a room (or creates one with `--create`), prints the roster and chat
//! messages as they are polled, and sends every line typed at the prompt as a
//! chat message. Ctrl+C or Ctrl+D leaves the room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin studyroom-client -- --user-id Alice --create --session-name "Intro"
//! cargo run --bin studyroom-client -- -u Bob --room-id abc123xyz
//! ```

use std::time::Duration;

use clap::Parser;

use studyroom_client::{ClientOptions, controller::ControllerConfig, run_client};
use studyroom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "studyroom-client")]
#[command(about = "Video-call session client with room polling", long_about = None)]
struct Args {
    /// Participant id (display name) used in the room
    #[arg(short = 'u', long)]
    user_id: String,

    /// Room (meeting) id to join
    #[arg(short = 'r', long, conflicts_with = "create")]
    room_id: Option<String>,

    /// Create a new session and join it as host
    #[arg(long, requires = "session_name")]
    create: bool,

    /// Name of the session to create
    #[arg(long)]
    session_name: Option<String>,

    /// Description of the session to create
    #[arg(long)]
    description: Option<String>,

    /// Server base URL
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    url: String,

    /// Seconds between room polls
    #[arg(long, default_value = "5")]
    poll_interval_secs: u64,

    /// Seconds before a request is abandoned
    #[arg(long, default_value = "10")]
    request_timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let options = ClientOptions {
        url: args.url,
        user_id: args.user_id,
        room_id: args.room_id,
        create: args.create,
        session_name: args.session_name,
        description: args.description,
        controller: ControllerConfig {
            poll_interval: Duration::from_secs(args.poll_interval_secs.max(1)),
            request_timeout: Duration::from_secs(args.request_timeout_secs.max(1)),
        },
    };

    if let Err(e) = run_client(options).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
