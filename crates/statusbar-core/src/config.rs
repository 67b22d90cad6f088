//! 애플리케이션 설정 구조체.
//!
//! 상태 서버 origin, 재연결 지연, 웹 위젯 서버, 터미널 표시 설정을 정의한다.
//! `config` crate를 통해 파일/환경변수에서 로드 (`config_manager` 참조).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 상태 서버 연결 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 웹 위젯 서버 설정
    #[serde(default)]
    pub web: WebConfig,
    /// 터미널 표시 설정
    #[serde(default)]
    pub display: DisplayConfig,
}

// ============================================================
// 서버 연결 설정
// ============================================================

/// 상태 서버 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 상태 서버 origin (예: "https://procs.example.com")
    ///
    /// 스트림 스킴은 origin의 보안 여부를 따른다 (https → wss, http → ws).
    #[serde(default = "default_origin")]
    pub origin: String,
    /// 상태 스트림 경로
    #[serde(default = "default_status_path")]
    pub status_path: String,
    /// HTTP 폴백 경로
    #[serde(default = "default_fallback_path")]
    pub fallback_path: String,
    /// HTTP 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// 연결 종료 후 재연결까지 고정 지연 (밀리초)
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            status_path: default_status_path(),
            fallback_path: default_fallback_path(),
            request_timeout_ms: default_request_timeout_ms(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
        }
    }
}

impl ServerConfig {
    /// HTTP 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// 재연결 지연을 Duration으로 반환
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

fn default_origin() -> String {
    "http://localhost:5000".to_string()
}

fn default_status_path() -> String {
    "/ws/status".to_string()
}

fn default_fallback_path() -> String {
    "/status".to_string()
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

fn default_reconnect_delay_ms() -> u64 {
    10_000
}

// ============================================================
// 웹 위젯 서버 설정
// ============================================================

/// 웹 위젯 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 위젯 서버 활성화 여부
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// 위젯 서버 포트 (기본: 9091)
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접근 허용 여부 (false: 127.0.0.1 only)
    #[serde(default)]
    pub allow_external: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_web_port(),
            allow_external: false,
        }
    }
}

fn default_web_port() -> u16 {
    9091
}

// ============================================================
// 터미널 표시 설정
// ============================================================

/// 터미널 표시 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// 스냅샷 갱신마다 터미널에 막대 출력
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// 막대 너비 (문자 수)
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bar_width: default_bar_width(),
        }
    }
}

fn default_bar_width() -> usize {
    50
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// 기본 설정
    pub fn default_config() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_conversions() {
        let config = AppConfig::default_config();
        assert_eq!(config.server.reconnect_delay(), Duration::from_secs(10));
        assert_eq!(config.server.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"server":{"origin":"https://procs.example.com"}}"#).unwrap();
        assert_eq!(config.server.origin, "https://procs.example.com");
        assert_eq!(config.server.status_path, "/ws/status");
        assert!(config.web.enabled);
        assert_eq!(config.display.bar_width, 50);
    }

    #[test]
    fn empty_json_is_default() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.server.origin, "http://localhost:5000");
        assert_eq!(config.server.reconnect_delay_ms, 10_000);
    }
}
