use crate::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use voxmesh_core::{Identity, RoomId, RoomInfo};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: String,
    /// Authenticated identity of the creator, supplied by the session
    /// layer in front of this service.
    pub identity: Identity,
}

#[derive(Debug, Deserialize)]
pub struct ListRoomsQuery {
    pub identity: Option<String>,
}

/// `POST /rooms`
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRoomRequest>,
) -> Json<RoomInfo> {
    let info = state.directory.create(req.name, req.identity);
    info!(room_id = %info.id, "room created");
    Json(info)
}

/// `GET /rooms`, optionally filtered with `?identity=`.
pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListRoomsQuery>,
) -> Json<Vec<RoomInfo>> {
    let rooms = match query.identity {
        Some(identity) => state.directory.list_for(&Identity::from(identity)),
        None => state.directory.list(),
    };
    Json(rooms)
}

/// `GET /rooms/{id}`
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RoomInfo>, StatusCode> {
    let id = RoomId::parse(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    state
        .directory
        .get(&id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
