//! Interactive client: join (or create) a room and chat until Ctrl+C / Ctrl+D.

use std::sync::Arc;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    api::{HttpRoomApi, RoomApi},
    controller::{ControllerConfig, SessionController},
    domain::{SessionState, SessionView, new_messages, roster_diff},
    error::ClientError,
    formatter::MessageFormatter,
    session::{SessionMetadata, create_session},
    ui::redisplay_prompt,
};

/// Command-line options of the interactive client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Server base URL (e.g. `http://127.0.0.1:8080`)
    pub url: String,
    pub user_id: String,
    /// Room to join; ignored with `create`
    pub room_id: Option<String>,
    /// Create a new session and join it as host
    pub create: bool,
    pub session_name: Option<String>,
    pub description: Option<String>,
    pub controller: ControllerConfig,
}

/// Run the interactive client
pub async fn run_client(options: ClientOptions) -> Result<(), Box<dyn std::error::Error>> {
    let api: Arc<dyn RoomApi> = Arc::new(HttpRoomApi::new(&options.url));

    let room_id = resolve_room_id(api.as_ref(), &options).await?;
    let controller = SessionController::start(
        api,
        room_id.clone(),
        options.user_id.clone(),
        options.controller,
    );

    // 接続の結果（Connected / Failed）を待つ
    let mut rx = controller.subscribe();
    let view = rx
        .wait_for(|view| view.state != SessionState::Connecting)
        .await?
        .clone();
    if let SessionState::Failed(error) = view.state {
        print!("{}", MessageFormatter::format_connect_failed(&room_id, &error));
        controller.shutdown().await;
        return Err(Box::new(error));
    }

    print!(
        "{}",
        MessageFormatter::format_room_connected(&room_id, &view.snapshot, &options.user_id)
    );
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        options.user_id
    );

    let watcher = spawn_view_printer(rx, view, options.user_id.clone());
    let mut input_rx = spawn_readline(options.user_id.clone());

    while let Some(line) = input_rx.recv().await {
        controller.send_message(&line).await;
    }

    watcher.abort();
    controller.shutdown().await;
    tracing::info!("Client session ended normally");

    Ok(())
}

async fn resolve_room_id(api: &dyn RoomApi, options: &ClientOptions) -> Result<String, ClientError> {
    if options.create {
        let session_name = options.session_name.clone().ok_or_else(|| {
            ClientError::InvalidParameters("--session-name is required with --create".to_string())
        })?;
        let metadata = SessionMetadata {
            session_name,
            description: options.description.clone(),
        };
        let meeting_id = create_session(api, &options.user_id, &metadata).await?;
        print!(
            "{}",
            MessageFormatter::format_session_created(&meeting_id, &metadata.session_name)
        );
        return Ok(meeting_id);
    }

    options
        .room_id
        .clone()
        .ok_or_else(|| ClientError::InvalidParameters("--room-id or --create is required".to_string()))
}

/// Print roster changes and new messages as the view changes
fn spawn_view_printer(
    mut rx: tokio::sync::watch::Receiver<SessionView>,
    initial: SessionView,
    user_id: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut previous = initial;

        while rx.changed().await.is_ok() {
            let current = rx.borrow_and_update().clone();
            if current.state.is_terminal() {
                break;
            }

            let (joined, left) = roster_diff(
                &previous.snapshot.participants,
                &current.snapshot.participants,
            );
            for participant in joined {
                print!("{}", MessageFormatter::format_participant_joined(participant));
            }
            for participant in left {
                print!("{}", MessageFormatter::format_participant_left(participant));
            }
            for message in new_messages(&previous.snapshot.messages, &current.snapshot.messages) {
                if message.user_id == user_id {
                    print!("{}", MessageFormatter::format_sent_confirmation(message));
                } else {
                    print!("{}", MessageFormatter::format_chat_message(message));
                }
            }
            redisplay_prompt(&user_id);

            previous = current;
        }
    })
}

/// Read lines on a blocking thread (rustyline is synchronous)
fn spawn_readline(user_id: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", user_id);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
