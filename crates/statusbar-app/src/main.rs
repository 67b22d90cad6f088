//! # statusbar-app
//!
//! 상태 바 바이너리 진입점.
//! 설정 로드, 어댑터 와이어링, 연결 관리자/터미널 표시/웹 위젯 서버 실행.

mod display;
mod lifecycle;

use anyhow::{Context, Result};
use clap::Parser;
use statusbar_core::config::AppConfig;
use statusbar_core::config_manager::ConfigManager;
use statusbar_core::ports::status_source::StatusSource;
use statusbar_core::ports::status_stream::StatusStream;
use statusbar_network::connection_manager::ConnectionManager;
use statusbar_network::http_client::HttpStatusClient;
use statusbar_network::ws_client::WsClient;
use statusbar_web::WebServer;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleManager;

/// 라이브 프로세스 상태 바
///
/// 상태 서버의 스트림을 구독해 running/paused/killed/done 비율을 표시한다.
#[derive(Parser, Debug)]
#[command(name = "statusbar")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 상태 서버 origin (기본: http://localhost:5000)
    #[arg(long, short = 's')]
    server: Option<String>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// HTTP 폴백으로 한 번 조회해 출력하고 종료
    #[arg(long)]
    once: bool,

    /// 웹 위젯 서버 비활성화
    #[arg(long)]
    no_web: bool,

    /// 웹 위젯 서버 포트
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// 터미널 표시 비활성화
    #[arg(long)]
    no_display: bool,
}

/// 설정 로드 (파일 + 환경변수)
///
/// 기본 위치의 설정 관리자를 만들 수 없으면 기본 설정으로 계속한다.
fn load_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path).context("설정 파일 로드 실패")?,
        None => match ConfigManager::new() {
            Ok(manager) => manager,
            Err(e) => {
                warn!("설정 관리자 초기화 실패, 기본 설정 사용: {e}");
                return Ok(AppConfig::default_config());
            }
        },
    };
    info!("설정 파일: {}", manager.config_path().display());
    Ok(manager.get())
}

/// CLI 인자로 설정 오버라이드
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(ref origin) = args.server {
        config.server.origin = origin.clone();
    }
    if let Some(port) = args.port {
        config.web.port = port;
    }
    if args.no_web {
        config.web.enabled = false;
    }
    if args.no_display {
        config.display.enabled = false;
    }
}

/// HTTP 폴백 단일 조회
async fn fetch_once(config: &AppConfig) -> Result<()> {
    let client = HttpStatusClient::from_config(&config.server)?;
    info!("상태 단일 조회: {}", client.url());

    let snapshot = client
        .fetch_status()
        .await
        .with_context(|| format!("상태 조회 실패: {}", client.url()))?;
    println!("{}", display::frame(&snapshot, config.display.bar_width));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "statusbar={level},statusbar_app={level},statusbar_core={level},statusbar_network={level},statusbar_view={level},statusbar_web={level}",
        level = args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(args.config.clone())?;
    apply_overrides(&mut config, &args);
    info!("상태 서버: {}", config.server.origin);

    if args.once {
        return fetch_once(&config).await;
    }

    let lifecycle = LifecycleManager::new();

    // ── 어댑터 생성 (DI 와이어링) ──
    let stream: Arc<dyn StatusStream> = Arc::new(WsClient::new());
    let manager = Arc::new(ConnectionManager::from_config(&config.server, stream)?);
    let connection = manager.start(lifecycle.subscribe())?;

    // ── 터미널 표시 ──
    if config.display.enabled {
        tokio::spawn(display::run(
            manager.subscribe(),
            config.display.bar_width,
            lifecycle.subscribe(),
        ));
    }

    // ── 웹 위젯 서버 ──
    if config.web.enabled {
        let web_server = WebServer::new(
            config.web.clone(),
            manager.subscribe(),
            manager.subscribe_status(),
        );
        let web_shutdown_rx = lifecycle.subscribe();
        info!("웹 위젯: {}", web_server.url());
        tokio::spawn(async move {
            if let Err(e) = web_server.run(web_shutdown_rx).await {
                error!("웹 서버 오류: {e}");
            }
        });
    }

    info!("상태 바 실행 중 (Ctrl+C로 종료)");

    if let Err(e) = lifecycle.wait_for_signal().await {
        error!("시그널 핸들러 등록 실패: {e}");
    }

    if let Err(e) = connection.await {
        error!("연결 루프 비정상 종료: {e}");
    }

    info!("상태 바 종료");
    Ok(())
}
