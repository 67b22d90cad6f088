//! API 라우트 정의.

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 생성
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // 현재 상태 (JSON)
        .route("/status", get(handlers::status::get_status))
        .route("/status/{state}", get(handlers::status::get_segment))
        // 현재 바 (HTML 조각)
        .route("/widget", get(handlers::widget::get_widget))
        // 실시간 스트림 (SSE)
        .route("/stream", get(handlers::stream::bar_stream))
}
