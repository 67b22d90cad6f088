//! 상태 스트림 연결 관리자.
//!
//! 라이브 연결을 소유하고, 수신 메시지를 현재 스냅샷에 병합해 구독자에게 발행한다.
//! 연결이 끊기면 고정 지연 후 무한히 재연결한다 (backoff 증가 없음, 횟수 제한 없음).
//!
//! 연결 시도는 단일 루프 태스크에서만 일어나므로 재연결 타이머가 겹쳐 쌓이지 않는다.
//! 재연결 대기와 연결 시도는 종료 신호로 취소할 수 있다.

use statusbar_core::config::ServerConfig;
use statusbar_core::error::CoreError;
use statusbar_core::models::status::StatusSnapshot;
use statusbar_core::ports::status_stream::{StatusStream, StreamMessage};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::connectivity::ConnectionStatus;
use crate::endpoint::status_stream_url;

/// 연결 관리자
pub struct ConnectionManager {
    /// 상태 스트림 URL
    url: String,
    /// 스트림 어댑터
    stream: Arc<dyn StatusStream>,
    /// 재연결 고정 지연
    reconnect_delay: Duration,
    /// 현재 스냅샷 (유일한 소유자, 구독자는 읽기만)
    snapshot_tx: watch::Sender<StatusSnapshot>,
    /// 연결 상태 브로드캐스트
    status_tx: watch::Sender<ConnectionStatus>,
    /// 연결 루프 실행 여부
    running: AtomicBool,
    /// 누적 연결 시도 횟수
    attempts: AtomicU64,
}

impl ConnectionManager {
    /// 새 연결 관리자 생성
    ///
    /// 현재 스냅샷은 [`StatusSnapshot::initial`]로 시작한다.
    pub fn new(url: impl Into<String>, stream: Arc<dyn StatusStream>, reconnect_delay: Duration) -> Self {
        let (snapshot_tx, _) = watch::channel(StatusSnapshot::initial());
        let (status_tx, _) = watch::channel(ConnectionStatus::Disconnected);
        Self {
            url: url.into(),
            stream,
            reconnect_delay,
            snapshot_tx,
            status_tx,
            running: AtomicBool::new(false),
            attempts: AtomicU64::new(0),
        }
    }

    /// 서버 설정으로 생성 (origin → 스트림 URL 유도)
    pub fn from_config(config: &ServerConfig, stream: Arc<dyn StatusStream>) -> Result<Self, CoreError> {
        let url = status_stream_url(&config.origin, &config.status_path)?;
        Ok(Self::new(url, stream, config.reconnect_delay()))
    }

    /// 상태 스트림 URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// 스냅샷 업데이트 구독
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// 연결 상태 구독
    pub fn subscribe_status(&self) -> watch::Receiver<ConnectionStatus> {
        self.status_tx.subscribe()
    }

    /// 현재 스냅샷 (복제본)
    pub fn current(&self) -> StatusSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// 현재 연결 상태
    pub fn status(&self) -> ConnectionStatus {
        *self.status_tx.borrow()
    }

    /// 누적 연결 시도 횟수
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// 수신 메시지 처리
    ///
    /// 디코딩에 성공하면 현재 스냅샷에 병합하고 구독자에게 알린다.
    /// 잘못된 메시지는 조용히 버리고 이전 스냅샷을 유지한다.
    /// 병합했으면 `true`.
    pub fn on_message(&self, raw: &str) -> bool {
        match StatusSnapshot::decode(raw) {
            Ok(update) => {
                self.snapshot_tx.send_modify(|current| current.merge(&update));
                debug!("상태 스냅샷 갱신 ({}개 필드)", update.len());
                true
            }
            Err(e) => {
                debug!("잘못된 상태 메시지 폐기: {e}");
                false
            }
        }
    }

    /// 연결 종료 처리
    ///
    /// 정상 종료와 에러 종료를 구분하지 않는다. 재연결 대기 상태로 바꾸고
    /// 다음 시도까지의 지연을 돌려준다.
    pub fn on_close(&self) -> Duration {
        warn!(
            "상태 스트림 연결 끊김, {}초 후 재연결 시도",
            self.reconnect_delay.as_secs_f64()
        );
        self.status_tx.send_replace(ConnectionStatus::Reconnecting);
        self.reconnect_delay
    }

    /// 연결 루프 시작
    ///
    /// 인스턴스당 하나의 루프만 실행된다. `shutdown_rx`가 `true`가 되거나
    /// 송신측이 사라지면 루프가 끝난다.
    ///
    /// # Errors
    /// 루프가 이미 실행 중이면 `CoreError::InvalidState`
    pub fn start(self: &Arc<Self>, shutdown_rx: watch::Receiver<bool>) -> Result<JoinHandle<()>, CoreError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(CoreError::InvalidState(
                "상태 스트림 연결 루프가 이미 실행 중".to_string(),
            ));
        }

        info!("상태 스트림 연결 시작: {}", self.url);
        let guard = RunningGuard(Arc::clone(self));
        Ok(tokio::spawn(async move { guard.0.run(shutdown_rx).await }))
    }

    /// 연결 → 수신 → 종료 → 고정 지연 → 재연결 루프
    async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            self.attempts.fetch_add(1, Ordering::Relaxed);
            self.status_tx.send_replace(ConnectionStatus::Connecting);

            // 멈춘 연결 시도에는 타임아웃이 없다. 종료 신호로만 중단된다.
            let connected = tokio::select! {
                result = self.stream.connect(&self.url) => result,
                _ = wait_for_shutdown(&mut shutdown_rx) => break,
            };

            match connected {
                Ok(rx) => {
                    info!("상태 스트림 연결됨: {}", self.url);
                    self.status_tx.send_replace(ConnectionStatus::Connected);
                    if self.receive(rx, &mut shutdown_rx).await {
                        break;
                    }
                }
                Err(e) => debug!("상태 스트림 연결 실패: {e}"),
            }

            let delay = self.on_close();
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = wait_for_shutdown(&mut shutdown_rx) => break,
            }
        }

        info!("상태 스트림 연결 루프 종료");
    }

    /// 연결이 끊길 때까지 메시지 처리. 종료 신호로 중단되면 `true`.
    async fn receive(
        &self,
        mut rx: mpsc::Receiver<StreamMessage>,
        shutdown_rx: &mut watch::Receiver<bool>,
    ) -> bool {
        loop {
            let message = tokio::select! {
                message = rx.recv() => message,
                _ = wait_for_shutdown(shutdown_rx) => return true,
            };

            match message {
                Some(StreamMessage::Text(text)) => {
                    self.on_message(&text);
                }
                Some(StreamMessage::Binary(data)) => match String::from_utf8(data) {
                    Ok(text) => {
                        self.on_message(&text);
                    }
                    Err(_) => debug!("UTF-8이 아닌 바이너리 메시지 폐기"),
                },
                Some(StreamMessage::Close) | None => return false,
            }
        }
    }
}

/// 루프 태스크가 끝나거나 중단(abort, panic)되면 실행 플래그를 해제한다.
struct RunningGuard(Arc<ConnectionManager>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.status_tx.send_replace(ConnectionStatus::Disconnected);
        self.0.running.store(false, Ordering::SeqCst);
    }
}

/// 종료 신호 대기
///
/// 송신측이 사라진 경우도 종료로 본다.
async fn wait_for_shutdown(shutdown_rx: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown_rx.borrow() {
            return;
        }
        if shutdown_rx.changed().await.is_err() {
            return;
        }
    }
}
