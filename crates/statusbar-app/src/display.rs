//! 터미널 표시 태스크.
//!
//! 스냅샷이 발행될 때마다 바를 다시 렌더링해 표준 출력에 쓴다.

use statusbar_core::models::color::STATE_COLOR_MAP;
use statusbar_core::models::status::StatusSnapshot;
use statusbar_view::{render, terminal};
use tokio::sync::watch;
use tracing::debug;

/// 스냅샷 한 장의 터미널 출력
pub fn frame(snapshot: &StatusSnapshot, width: usize) -> String {
    terminal::render_bar(&render(snapshot, &STATE_COLOR_MAP), width)
}

/// 표시 루프
///
/// 현재 스냅샷을 바로 출력하고, 이후 변경마다 다시 출력한다.
/// 종료 신호를 받거나 발행자가 사라지면 끝난다.
pub async fn run(
    mut snapshot_rx: watch::Receiver<StatusSnapshot>,
    width: usize,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        let snapshot = snapshot_rx.borrow_and_update().clone();
        println!("{}", frame(&snapshot, width));

        tokio::select! {
            changed = snapshot_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }
    debug!("터미널 표시 종료");
}
