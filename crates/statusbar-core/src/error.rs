//! 상태 바 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 외부 에러를 `map_err`로 `CoreError`에 매핑한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 메시지 디코딩, 설정, 네트워크 등 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 상태 메시지 디코딩 실패 (JSON 객체가 아님 등)
    #[error("디코딩 에러: {0}")]
    Decode(String),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 URL (지원하지 않는 스킴 등)
    #[error("잘못된 URL: {0}")]
    InvalidUrl(String),

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 허용되지 않는 상태 전이 (이미 시작된 연결 루프 등)
    #[error("잘못된 상태: {0}")]
    InvalidState(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CoreError::InvalidUrl("ftp://host".to_string());
        assert!(err.to_string().contains("ftp://host"));
    }

    #[test]
    fn serde_error_converts() {
        let err: CoreError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}
