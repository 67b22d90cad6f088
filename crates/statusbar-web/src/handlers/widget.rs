//! 위젯 HTML 조각 핸들러.

use axum::extract::State;
use axum::response::Html;
use statusbar_core::models::color::STATE_COLOR_MAP;
use statusbar_view::{html, render};

use crate::AppState;

/// GET /api/widget
///
/// 현재 스냅샷의 바를 임베드 가능한 HTML 조각으로 반환.
pub async fn get_widget(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.snapshot_rx.borrow().clone();
    Html(html::render_bar(&render(&snapshot, &STATE_COLOR_MAP)))
}
