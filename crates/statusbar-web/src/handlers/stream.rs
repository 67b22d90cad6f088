//! SSE 실시간 스트림 핸들러.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use statusbar_core::models::color::STATE_COLOR_MAP;
use statusbar_core::models::status::StatusSnapshot;
use statusbar_view::{html, render};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

use crate::AppState;

/// SSE 이벤트 이름
pub const BAR_EVENT: &str = "bar";

/// SSE 스트림 엔드포인트
///
/// GET /api/stream
///
/// 연결 즉시 현재 바를 한 번 보내고, 이후 스냅샷이 발행될 때마다
/// 다시 렌더링한 HTML 조각을 `bar` 이벤트로 전송한다.
pub async fn bar_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = WatchStream::new(state.snapshot_rx.clone()).map(|snapshot| Ok(bar_event(&snapshot)));

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn bar_event(snapshot: &StatusSnapshot) -> Event {
    Event::default()
        .event(BAR_EVENT)
        .data(html::render_bar(&render(snapshot, &STATE_COLOR_MAP)))
}
