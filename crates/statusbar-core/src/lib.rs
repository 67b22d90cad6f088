//! # statusbar-core
//!
//! 상태 바 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 상태 스냅샷, 상태 종류, 색상 테이블
//! - [`ports`]: 상태 스트림/폴백 소스 포트 인터페이스 (async_trait)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체
//! - [`config_manager`]: 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::color::STATE_COLOR_MAP;
    use crate::models::status::{StatusSnapshot, TaskState};

    #[test]
    fn color_map_covers_every_state() {
        for state in TaskState::ALL {
            assert!(STATE_COLOR_MAP.color(state).is_some());
        }
        assert_eq!(STATE_COLOR_MAP.len(), TaskState::ALL.len());
    }

    #[test]
    fn snapshot_serde_roundtrip() {
        let snapshot = StatusSnapshot::from_pairs([(TaskState::Running, 40.0), (TaskState::Done, 60.0)]);

        let json = serde_json::to_string(&snapshot).unwrap();
        let deserialized: StatusSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, snapshot);
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert_eq!(config.server.reconnect_delay_ms, 10_000);
        assert_eq!(config.server.status_path, "/ws/status");
        assert_eq!(config.web.port, 9091);
        assert!(!config.web.allow_external);
    }
}
