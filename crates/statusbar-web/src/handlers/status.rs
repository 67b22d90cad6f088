//! 상태 조회 API 핸들러.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use statusbar_core::models::color::STATE_COLOR_MAP;
use statusbar_core::models::status::{StatusSnapshot, TaskState};
use statusbar_network::connectivity::ConnectionStatus;
use statusbar_view::{render, Segment};

use crate::error::ApiError;
use crate::AppState;

/// 세그먼트 응답 DTO
#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    /// 상태 키 ("running")
    pub state: TaskState,
    /// 원시 비율
    pub percentage: f64,
    /// CSS 색상 값
    pub color: String,
    /// 보이는 라벨
    pub label: String,
    /// 툴팁 텍스트
    pub tooltip: String,
}

impl From<Segment> for SegmentResponse {
    fn from(segment: Segment) -> Self {
        Self {
            state: segment.state,
            percentage: segment.percentage,
            color: segment.color.css.to_string(),
            label: segment.label,
            tooltip: segment.tooltip,
        }
    }
}

/// 현재 상태 응답 DTO
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// 연결 상태
    pub connection: ConnectionStatus,
    /// 실시간 여부
    pub live: bool,
    /// 현재 스냅샷 (원시 값)
    pub snapshot: StatusSnapshot,
    /// 렌더링된 세그먼트 (표준 순서)
    pub segments: Vec<SegmentResponse>,
}

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let snapshot = state.snapshot_rx.borrow().clone();
    let connection = *state.status_rx.borrow();

    let segments = render(&snapshot, &STATE_COLOR_MAP)
        .into_iter()
        .map(SegmentResponse::from)
        .collect();

    Json(StatusResponse {
        connection,
        live: connection.is_live(),
        snapshot,
        segments,
    })
}

/// GET /api/status/{state}
pub async fn get_segment(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SegmentResponse>, ApiError> {
    let task_state = TaskState::from_key(&key)
        .ok_or_else(|| ApiError::NotFound(format!("상태 {key}")))?;

    let snapshot = state.snapshot_rx.borrow().clone();
    render(&snapshot, &STATE_COLOR_MAP)
        .into_iter()
        .find(|segment| segment.state == task_state)
        .map(|segment| Json(segment.into()))
        .ok_or_else(|| ApiError::NotFound(format!("색상 맵에 없는 상태 {key}")))
}
