//! 연결 상태.
//!
//! 상태 스트림 연결의 현재 단계. `ConnectionManager`가 `watch` 채널로 발행한다.

use serde::Serialize;

/// 연결 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// 연결 시도 중
    Connecting,
    /// 연결됨
    Connected,
    /// 연결 끊김, 재연결 대기 중
    Reconnecting,
    /// 연결 루프 정지 (시작 전 또는 종료 후)
    Disconnected,
}

impl ConnectionStatus {
    /// 현재 표시 중인 스냅샷이 실시간인지 여부
    pub fn is_live(self) -> bool {
        self == ConnectionStatus::Connected
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Connecting => write!(f, "Connecting"),
            ConnectionStatus::Connected => write!(f, "Connected"),
            ConnectionStatus::Reconnecting => write!(f, "Reconnecting"),
            ConnectionStatus::Disconnected => write!(f, "Disconnected"),
        }
    }
}
