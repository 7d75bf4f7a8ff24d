//! Server state shared by the handlers.

use std::sync::Arc;

use studyroom_shared::time::Clock;

use crate::{
    domain::{ExpiryPolicy, RoomRepository},
    usecase::{
        CreateRoomUseCase, GetRoomInfoUseCase, GetRoomsUseCase, JoinRoomUseCase,
        LeaveRoomUseCase, SendMessageUseCase, SweepExpiredRoomsUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// Creates rooms
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// Adds participants
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// Removes participants
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// Appends chat messages
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// Reads one room
    pub get_room_info_usecase: Arc<GetRoomInfoUseCase>,
    /// Lists live rooms
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// Removes expired rooms
    pub sweep_expired_rooms_usecase: Arc<SweepExpiredRoomsUseCase>,
}

impl AppState {
    /// Wire every usecase to the same repository and clock
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        clock: Arc<dyn Clock>,
        expiry_policy: ExpiryPolicy,
    ) -> Self {
        Self {
            create_room_usecase: Arc::new(CreateRoomUseCase::new(
                repository.clone(),
                clock.clone(),
            )),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(repository.clone(), clock.clone())),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(
                repository.clone(),
                clock.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                repository.clone(),
                clock.clone(),
            )),
            get_room_info_usecase: Arc::new(GetRoomInfoUseCase::new(repository.clone())),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(repository.clone())),
            sweep_expired_rooms_usecase: Arc::new(SweepExpiredRoomsUseCase::new(
                repository,
                clock,
                expiry_policy,
            )),
        }
    }
}
