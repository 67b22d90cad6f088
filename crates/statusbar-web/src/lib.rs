//! # statusbar-web
//!
//! 상태 바 위젯 로컬 웹 서버.
//! Axum 기반. 연결 관리자가 발행하는 스냅샷을 구독해 위젯으로 노출한다.
//!
//! ## 엔드포인트
//! - `GET /` 위젯 페이지 (임베드)
//! - `GET /api/status` 현재 스냅샷 + 연결 상태 (JSON)
//! - `GET /api/status/{state}` 단일 상태 세그먼트 (JSON)
//! - `GET /api/widget` 현재 바 HTML 조각
//! - `GET /api/stream` 스냅샷마다 `bar` 이벤트 (SSE)

pub mod embedded;
pub mod error;
pub mod handlers;
pub mod routes;

use axum::Router;
use statusbar_core::config::WebConfig;
use statusbar_core::models::status::StatusSnapshot;
use statusbar_network::connectivity::ConnectionStatus;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// 포트 바인드 최대 시도 횟수
const MAX_PORT_ATTEMPTS: u16 = 10;

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// 스냅샷 구독
    pub snapshot_rx: watch::Receiver<StatusSnapshot>,
    /// 연결 상태 구독
    pub status_rx: watch::Receiver<ConnectionStatus>,
}

/// 위젯 웹 서버
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(
        config: WebConfig,
        snapshot_rx: watch::Receiver<StatusSnapshot>,
        status_rx: watch::Receiver<ConnectionStatus>,
    ) -> Self {
        Self {
            config,
            state: AppState {
                snapshot_rx,
                status_rx,
            },
        }
    }

    /// 라우터 구성
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .nest("/api", routes::api_routes())
            .fallback(embedded::serve_static)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// 서버 실행
    ///
    /// 설정 포트가 사용 중이면 다음 포트를 시도한다 (최대 10개).
    ///
    /// # Errors
    /// 모든 포트 바인드 실패 또는 서버 I/O 에러
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let host = if self.config.allow_external {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let app = self.router();
        let base_port = self.config.port;
        let mut last_error = None;

        for attempt in 0..MAX_PORT_ATTEMPTS {
            let Some(port) = base_port.checked_add(attempt) else {
                break;
            };

            let addr: SocketAddr = match format!("{host}:{port}").parse() {
                Ok(a) => a,
                Err(e) => {
                    error!("잘못된 주소 {host}:{port}: {e}");
                    continue;
                }
            };

            match TcpListener::bind(addr).await {
                Ok(listener) => {
                    if attempt > 0 {
                        warn!("포트 {base_port} 사용 불가, 대체 포트 {port} 사용");
                    }
                    info!("상태 위젯 서버 시작: http://{addr}");

                    axum::serve(listener, app)
                        .with_graceful_shutdown(async move {
                            loop {
                                if *shutdown_rx.borrow() {
                                    info!("웹 서버 종료 신호 수신");
                                    break;
                                }
                                if shutdown_rx.changed().await.is_err() {
                                    break;
                                }
                            }
                        })
                        .await?;

                    info!("상태 위젯 서버 종료");
                    return Ok(());
                }
                Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                    warn!("포트 {port} 이미 사용 중, 다음 포트 시도...");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrInUse,
                format!(
                    "포트 {}-{} 모두 사용 불가",
                    base_port,
                    base_port.saturating_add(MAX_PORT_ATTEMPTS - 1)
                ),
            )
        }))
    }

    /// 서버 URL
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn server() -> (
        WebServer,
        watch::Sender<StatusSnapshot>,
        watch::Sender<ConnectionStatus>,
    ) {
        let (snapshot_tx, snapshot_rx) = watch::channel(StatusSnapshot::initial());
        let (status_tx, status_rx) = watch::channel(ConnectionStatus::Connecting);
        (
            WebServer::new(WebConfig::default(), snapshot_rx, status_rx),
            snapshot_tx,
            status_tx,
        )
    }

    #[test]
    fn web_server_url() {
        let (server, _, _) = server();
        assert_eq!(server.url(), "http://localhost:9091");
    }

    #[tokio::test]
    async fn index_page_is_served() {
        let (server, _, _) = server();
        let response = server
            .router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("/api/stream"));
    }

    #[tokio::test]
    async fn widget_follows_published_snapshot() {
        let (server, snapshot_tx, _) = server();
        let router = server.router();

        snapshot_tx.send_replace(
            StatusSnapshot::decode(r#"{"running":50,"paused":25,"killed":15,"done":10}"#).unwrap(),
        );

        let response = router
            .oneshot(Request::get("/api/widget").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains(r#"<span class="bartext">25%</span>"#));
        assert!(html.contains("background-color: darkorange"));
    }

    #[tokio::test]
    async fn unknown_asset_is_not_found() {
        let (server, _, _) = server();
        let response = server
            .router()
            .oneshot(Request::get("/missing.png").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown() {
        let (snapshot_tx, snapshot_rx) = watch::channel(StatusSnapshot::initial());
        let (_status_tx, status_rx) = watch::channel(ConnectionStatus::Disconnected);
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = WebConfig {
            port,
            ..WebConfig::default()
        };
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(WebServer::new(config, snapshot_rx, status_rx).run(shutdown_rx));

        shutdown_tx.send(true).unwrap();
        assert!(handle.await.unwrap().is_ok());
        drop(snapshot_tx);
    }

    #[tokio::test]
    async fn busy_port_falls_back_to_next() {
        let (_snapshot_tx, snapshot_rx) = watch::channel(StatusSnapshot::initial());
        let (_status_tx, status_rx) = watch::channel(ConnectionStatus::Disconnected);
        // 설정 포트를 점유한 채로 실행
        let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = occupied.local_addr().unwrap().port();

        let config = WebConfig {
            port,
            ..WebConfig::default()
        };
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(WebServer::new(config, snapshot_rx, status_rx).run(shutdown_rx));

        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        assert!(!handle.is_finished());

        shutdown_tx.send(true).unwrap();
        assert!(handle.await.unwrap().is_ok());
        drop(occupied);
    }
}
