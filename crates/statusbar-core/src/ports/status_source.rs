//! 폴백 상태 소스 포트.
//!
//! 구현: `statusbar-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::status::StatusSnapshot;

/// 요청-응답 방식의 상태 소스 (`GET /status`)
///
/// 라이브 스트림과 같은 스키마의 스냅샷을 한 번 조회한다.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// 현재 스냅샷 조회
    async fn fetch_status(&self) -> Result<StatusSnapshot, CoreError>;
}
