//! Session controller: connects a participant to a room and keeps its view fresh.
//!
//! The controller owns a driver task that confirms the room, joins it and then
//! polls `get-room-info`. Everything it learns is turned into a
//! [`SessionEvent`] and applied to the [`SessionView`] held in a
//! `tokio::sync::watch` channel, so observers only ever see reducer output.
//!
//! Teardown (`shutdown().await`, or drop as a fallback) cancels the driver and
//! sends leave-room exactly once, whatever state the session is in.

use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};

use crate::{
    api::RoomApi,
    domain::{RoomSnapshot, SessionEvent, SessionState, SessionView, validate_parameters},
    error::ClientError,
};

/// Default interval between two `get-room-info` polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Default bound on every request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Identity and transport shared by the controller and its tasks
struct Session {
    api: Arc<dyn RoomApi>,
    room_id: String,
    user_id: String,
    config: ControllerConfig,
    view_tx: watch::Sender<SessionView>,
}

impl Session {
    fn dispatch(&self, event: SessionEvent) {
        self.view_tx.send_if_modified(|view| view.apply(event));
    }

    fn state(&self) -> SessionState {
        self.view_tx.borrow().state.clone()
    }

    async fn request<T, F>(&self, request: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        with_timeout(self.config.request_timeout, request).await
    }

    /// Confirm the room exists, then join it
    async fn connect(&self) -> Result<RoomSnapshot, ClientError> {
        self.request(self.api.get_room_info(&self.room_id, &self.user_id))
            .await?;
        let info = self
            .request(self.api.join_room(&self.room_id, &self.user_id))
            .await?;
        Ok(info.into())
    }

    async fn poll(&self) {
        match self
            .request(self.api.get_room_info(&self.room_id, &self.user_id))
            .await
        {
            Ok(info) => self.dispatch(SessionEvent::Snapshot(info.into())),
            Err(e) => tracing::warn!("Failed to poll room '{}': {}", self.room_id, e),
        }
    }

    async fn leave(&self) {
        // 空の ID ではサーバーに伝える相手がいないので送らない
        if validate_parameters(&self.room_id, &self.user_id).is_err() {
            return;
        }
        match self
            .request(self.api.leave_room(&self.room_id, &self.user_id))
            .await
        {
            Ok(()) => tracing::info!("'{}' left room '{}'", self.user_id, self.room_id),
            Err(e) => tracing::warn!("Failed to leave room '{}': {}", self.room_id, e),
        }
    }
}

/// Client-side session for one participant in one room
pub struct SessionController {
    session: Arc<Session>,
    driver: Option<JoinHandle<()>>,
    left: AtomicBool,
}

impl SessionController {
    /// Start a session; must be called inside a tokio runtime
    ///
    /// Empty ids fail the session immediately with `InvalidParameters`
    /// and no request is made.
    pub fn start(
        api: Arc<dyn RoomApi>,
        room_id: impl Into<String>,
        user_id: impl Into<String>,
        config: ControllerConfig,
    ) -> Self {
        let (view_tx, _) = watch::channel(SessionView::default());
        let session = Arc::new(Session {
            api,
            room_id: room_id.into(),
            user_id: user_id.into(),
            config,
            view_tx,
        });

        let driver = match validate_parameters(&session.room_id, &session.user_id) {
            Ok(()) => Some(tokio::spawn(drive(session.clone()))),
            Err(e) => {
                tracing::error!("Cannot start session: {}", e);
                session.dispatch(SessionEvent::Failed(e));
                None
            }
        };

        Self {
            session,
            driver,
            left: AtomicBool::new(false),
        }
    }

    pub fn room_id(&self) -> &str {
        &self.session.room_id
    }

    pub fn user_id(&self) -> &str {
        &self.session.user_id
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn view(&self) -> SessionView {
        self.session.view_tx.borrow().clone()
    }

    /// Receive every change of the view
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.session.view_tx.subscribe()
    }

    /// Send a chat message; ignored unless connected, failures are logged
    pub async fn send_message(&self, text: &str) {
        if self.session.state() != SessionState::Connected {
            tracing::debug!("Not connected, dropping message");
            return;
        }

        let session = &self.session;
        match session
            .request(session.api.send_message(&session.room_id, &session.user_id, text))
            .await
        {
            Ok(message) => session.dispatch(SessionEvent::MessageSent(message)),
            Err(e) => tracing::warn!("Failed to send message: {}", e),
        }
    }

    /// Tell the server this participant is gone
    ///
    /// Safe in every state, errors are logged, and the observed state is left
    /// unchanged.
    pub async fn leave_call(&self) {
        self.session.leave().await;
    }

    /// Cancel the driver, leave the room, and mark the session `Disconnected`
    /// (a `Failed` session stays `Failed`)
    pub async fn shutdown(mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
        if !self.left.swap(true, Ordering::SeqCst) {
            self.session.leave().await;
        }
        self.session.dispatch(SessionEvent::Disconnected);
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
        self.session.dispatch(SessionEvent::Disconnected);

        if self.left.swap(true, Ordering::SeqCst) {
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let session = self.session.clone();
                handle.spawn(async move { session.leave().await });
            }
            Err(_) => tracing::warn!(
                "No runtime to send leave-room for '{}' in '{}'",
                self.session.user_id,
                self.session.room_id
            ),
        }
    }
}

/// Connect, then poll until aborted
async fn drive(session: Arc<Session>) {
    tracing::info!(
        "Connecting '{}' to room '{}'",
        session.user_id,
        session.room_id
    );
    match session.connect().await {
        Ok(snapshot) => {
            tracing::info!("Connected to room '{}'", session.room_id);
            session.dispatch(SessionEvent::Connected(snapshot));
        }
        Err(e) => {
            tracing::error!("Failed to connect to room '{}': {}", session.room_id, e);
            session.dispatch(SessionEvent::Failed(e));
            return;
        }
    }

    let mut interval = tokio::time::interval(session.config.poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // 最初の tick は即座に完了するので読み捨てる
    interval.tick().await;

    loop {
        interval.tick().await;
        session.poll().await;
    }
}

async fn with_timeout<T, F>(timeout: Duration, request: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    tokio::time::timeout(timeout, request)
        .await
        .map_err(|_| ClientError::Timeout(timeout))?
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, atomic::AtomicUsize};

    use async_trait::async_trait;
    use studyroom_server::infrastructure::dto::http::{MessageDto, RoomInfoResponse};

    use super::*;
    use crate::api::MockRoomApi;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - SessionController の状態遷移（Connecting → Connected → Disconnected / Failed）
    // - ポーリング・メッセージ送信・退出の副作用
    //
    // 【なぜこのテストが必要か】
    // - 退出通知がどの状態からでも必ず 1 回だけ送られることを保証する
    // - ポーリング失敗やタイムアウトで状態が壊れないことを保証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. パラメータ不正（通信なし）
    // 2. 接続成功・ルーム不在・タイムアウト
    // 3. ポーリングによる更新と失敗時の継続
    // 4. shutdown / drop での退出
    // ========================================

    /// Hand-written fake: hanging requests and call counting need async control
    struct FakeRoomApi {
        room_exists: bool,
        hang: bool,
        fail_polls: bool,
        participants: Mutex<Vec<String>>,
        get_info_calls: AtomicUsize,
        join_calls: AtomicUsize,
        leave_calls: AtomicUsize,
        send_calls: AtomicUsize,
    }

    impl FakeRoomApi {
        fn new() -> Self {
            Self {
                room_exists: true,
                hang: false,
                fail_polls: false,
                participants: Mutex::new(vec!["Alice".to_string(), "Bob".to_string()]),
                get_info_calls: AtomicUsize::new(0),
                join_calls: AtomicUsize::new(0),
                leave_calls: AtomicUsize::new(0),
                send_calls: AtomicUsize::new(0),
            }
        }

        fn room_info(&self) -> RoomInfoResponse {
            RoomInfoResponse {
                room_id: None,
                participants: self.participants.lock().unwrap().clone(),
                messages: vec![],
                data: None,
                host_id: "Alice".to_string(),
            }
        }
    }

    #[async_trait]
    impl RoomApi for FakeRoomApi {
        async fn create_room(
            &self,
            _room_id: &str,
            _user_id: &str,
            _data: Option<serde_json::Map<String, serde_json::Value>>,
        ) -> Result<RoomInfoResponse, ClientError> {
            Ok(self.room_info())
        }

        async fn join_room(
            &self,
            _room_id: &str,
            _user_id: &str,
        ) -> Result<RoomInfoResponse, ClientError> {
            self.join_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.room_info())
        }

        async fn leave_room(&self, _room_id: &str, _user_id: &str) -> Result<(), ClientError> {
            self.leave_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn send_message(
            &self,
            _room_id: &str,
            user_id: &str,
            text: &str,
        ) -> Result<MessageDto, ClientError> {
            let n = self.send_calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(MessageDto {
                id: format!("m-{}", n),
                user_id: user_id.to_string(),
                text: text.to_string(),
                timestamp: "2023-01-01T00:00:00.000Z".to_string(),
            })
        }

        async fn get_room_info(
            &self,
            room_id: &str,
            _user_id: &str,
        ) -> Result<RoomInfoResponse, ClientError> {
            let n = self.get_info_calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.hang {
                std::future::pending::<()>().await;
            }
            if !self.room_exists {
                return Err(ClientError::NotFound(room_id.to_string()));
            }
            if self.fail_polls && n > 1 {
                return Err(ClientError::Internal("poll failed".to_string()));
            }
            Ok(self.room_info())
        }
    }

    fn fast_config() -> ControllerConfig {
        ControllerConfig {
            poll_interval: Duration::from_millis(20),
            request_timeout: Duration::from_millis(200),
        }
    }

    async fn wait_for_view(
        controller: &SessionController,
        predicate: impl Fn(&SessionView) -> bool,
    ) -> SessionView {
        let mut rx = controller.subscribe();
        tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|view| predicate(view)))
            .await
            .expect("timed out waiting for view")
            .expect("view channel closed")
            .clone()
    }

    async fn wait_until(condition: impl Fn() -> bool) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while !condition() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("timed out waiting for condition");
    }

    #[tokio::test]
    async fn test_empty_participant_id_fails_without_requests() {
        // テスト項目: 参加者 ID が空なら通信せずに Failed(InvalidParameters) になる
        // given (前提条件):
        // 期待値を設定しないモックは呼ばれた時点でパニックする
        let api = Arc::new(MockRoomApi::new());

        // when (操作):
        let controller = SessionController::start(api, "abc123xyz", "", fast_config());
        let state = controller.state();
        controller.shutdown().await;

        // then (期待する結果):
        assert!(matches!(
            state,
            SessionState::Failed(ClientError::InvalidParameters(_))
        ));
    }

    #[tokio::test]
    async fn test_connects_with_own_id_in_participants() {
        // テスト項目: 接続に成功すると自分の ID を含む参加者一覧とホストを持つ
        // given (前提条件):
        let api = Arc::new(FakeRoomApi::new());

        // when (操作):
        let controller = SessionController::start(api.clone(), "abc123xyz", "Bob", fast_config());
        let view = wait_for_view(&controller, |v| v.state != SessionState::Connecting).await;

        // then (期待する結果):
        assert_eq!(view.state, SessionState::Connected);
        assert!(view.snapshot.participants.contains(&"Bob".to_string()));
        assert_eq!(view.snapshot.host_id.as_deref(), Some("Alice"));
        assert_eq!(api.join_calls.load(Ordering::SeqCst), 1);

        controller.shutdown().await;
    }

    #[tokio::test]
    async fn test_missing_room_fails_without_join() {
        // テスト項目: ルームが存在しなければ join せずに Failed(NotFound) になる
        // given (前提条件):
        let api = Arc::new(FakeRoomApi {
            room_exists: false,
            ..FakeRoomApi::new()
        });

        // when (操作):
        let controller = SessionController::start(api.clone(), "nope", "Bob", fast_config());
        let view = wait_for_view(&controller, |v| v.state.is_terminal()).await;

        // then (期待する結果):
        assert_eq!(
            view.state,
            SessionState::Failed(ClientError::NotFound("nope".to_string()))
        );
        assert_eq!(api.join_calls.load(Ordering::SeqCst), 0);

        controller.shutdown().await;
    }

    #[tokio::test]
    async fn test_hanging_connect_times_out() {
        // テスト項目: 応答の無い接続はタイムアウトで Failed(Timeout) になる
        // given (前提条件):
        let api = Arc::new(FakeRoomApi {
            hang: true,
            ..FakeRoomApi::new()
        });
        let config = ControllerConfig {
            poll_interval: Duration::from_millis(20),
            request_timeout: Duration::from_millis(50),
        };

        // when (操作):
        let controller = SessionController::start(api, "abc123xyz", "Bob", config);
        let view = wait_for_view(&controller, |v| v.state.is_terminal()).await;

        // then (期待する結果):
        assert_eq!(
            view.state,
            SessionState::Failed(ClientError::Timeout(Duration::from_millis(50)))
        );

        controller.shutdown().await;
    }

    #[tokio::test]
    async fn test_poll_replaces_participants() {
        // テスト項目: ポーリングでサーバー側の参加者一覧が反映される
        // given (前提条件):
        let api = Arc::new(FakeRoomApi::new());
        let controller = SessionController::start(api.clone(), "abc123xyz", "Bob", fast_config());
        wait_for_view(&controller, |v| v.state == SessionState::Connected).await;

        // when (操作):
        *api.participants.lock().unwrap() = vec!["Bob".to_string()];
        let view = wait_for_view(&controller, |v| {
            v.snapshot.participants == vec!["Bob".to_string()]
        })
        .await;

        // then (期待する結果):
        assert_eq!(view.state, SessionState::Connected);

        controller.shutdown().await;
    }

    #[tokio::test]
    async fn test_poll_failures_keep_connected() {
        // テスト項目: ポーリングが失敗し続けても Connected のまま
        // given (前提条件):
        let api = Arc::new(FakeRoomApi {
            fail_polls: true,
            ..FakeRoomApi::new()
        });
        let controller = SessionController::start(api.clone(), "abc123xyz", "Bob", fast_config());
        wait_for_view(&controller, |v| v.state == SessionState::Connected).await;

        // when (操作):
        wait_until(|| api.get_info_calls.load(Ordering::SeqCst) >= 4).await;

        // then (期待する結果):
        assert_eq!(controller.state(), SessionState::Connected);

        controller.shutdown().await;
    }

    #[tokio::test]
    async fn test_send_message_only_when_connected() {
        // テスト項目: 接続前の送信は無視され、接続後の送信はスナップショットに追加される
        // given (前提条件):
        let api = Arc::new(FakeRoomApi {
            hang: true,
            ..FakeRoomApi::new()
        });
        let connecting = SessionController::start(api.clone(), "abc123xyz", "Bob", fast_config());
        let connected_api = Arc::new(FakeRoomApi::new());
        let connected =
            SessionController::start(connected_api.clone(), "abc123xyz", "Bob", fast_config());
        wait_for_view(&connected, |v| v.state == SessionState::Connected).await;

        // when (操作):
        connecting.send_message("too early").await;
        connected.send_message("hello").await;

        // then (期待する結果):
        assert_eq!(api.send_calls.load(Ordering::SeqCst), 0);
        let messages = connected.view().snapshot.messages;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "hello");
        assert_eq!(messages[0].user_id, "Bob");

        connecting.shutdown().await;
        connected.shutdown().await;
    }

    #[tokio::test]
    async fn test_leave_call_keeps_state() {
        // テスト項目: leave_call は退出を送るが観測される状態は変えない
        // given (前提条件):
        let api = Arc::new(FakeRoomApi::new());
        let controller = SessionController::start(api.clone(), "abc123xyz", "Bob", fast_config());
        wait_for_view(&controller, |v| v.state == SessionState::Connected).await;

        // when (操作):
        controller.leave_call().await;

        // then (期待する結果):
        assert_eq!(api.leave_calls.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state(), SessionState::Connected);

        controller.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_leaves_once_and_disconnects() {
        // テスト項目: shutdown で退出が 1 回だけ送られ Disconnected になる
        // given (前提条件):
        let api = Arc::new(FakeRoomApi::new());
        let controller = SessionController::start(api.clone(), "abc123xyz", "Bob", fast_config());
        wait_for_view(&controller, |v| v.state == SessionState::Connected).await;
        let mut rx = controller.subscribe();

        // when (操作):
        controller.shutdown().await;

        // then (期待する結果):
        assert_eq!(api.leave_calls.load(Ordering::SeqCst), 1);
        assert_eq!(rx.borrow_and_update().state, SessionState::Disconnected);
    }

    #[tokio::test]
    async fn test_whitespace_participant_id_connects_and_leaves() {
        // テスト項目: 空白だけの参加者 ID でも接続でき、shutdown で退出が送られる
        // given (前提条件):
        let api = Arc::new(FakeRoomApi::new());
        *api.participants.lock().unwrap() = vec!["  ".to_string()];

        // when (操作):
        let controller = SessionController::start(api.clone(), "roomws", "  ", fast_config());
        let view = wait_for_view(&controller, |v| v.state != SessionState::Connecting).await;
        controller.shutdown().await;

        // then (期待する結果):
        assert_eq!(view.state, SessionState::Connected);
        assert_eq!(api.join_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.leave_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shutdown_after_failure_still_leaves() {
        // テスト項目: 接続に失敗していても退出は送られ、状態は Failed のまま
        // given (前提条件):
        let api = Arc::new(FakeRoomApi {
            room_exists: false,
            ..FakeRoomApi::new()
        });
        let controller = SessionController::start(api.clone(), "nope", "Bob", fast_config());
        wait_for_view(&controller, |v| v.state.is_terminal()).await;
        let rx = controller.subscribe();

        // when (操作):
        controller.shutdown().await;

        // then (期待する結果):
        assert_eq!(api.leave_calls.load(Ordering::SeqCst), 1);
        assert!(matches!(rx.borrow().state, SessionState::Failed(_)));
    }

    #[tokio::test]
    async fn test_drop_sends_leave_once() {
        // テスト項目: shutdown せずに破棄しても退出が 1 回だけ送られる
        // given (前提条件):
        let api = Arc::new(FakeRoomApi::new());
        let controller = SessionController::start(api.clone(), "abc123xyz", "Bob", fast_config());
        wait_for_view(&controller, |v| v.state == SessionState::Connected).await;

        // when (操作):
        drop(controller);
        wait_until(|| api.leave_calls.load(Ordering::SeqCst) >= 1).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        // then (期待する結果):
        assert_eq!(api.leave_calls.load(Ordering::SeqCst), 1);
    }
}
