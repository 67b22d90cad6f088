//! HTTP 폴백 상태 클라이언트.
//!
//! `StatusSource` 포트 구현. `GET /status` 한 번 조회 (폴링 루프 없음).

use async_trait::async_trait;
use statusbar_core::config::ServerConfig;
use statusbar_core::error::CoreError;
use statusbar_core::models::status::StatusSnapshot;
use statusbar_core::ports::status_source::StatusSource;
use std::time::Duration;
use tracing::debug;

use crate::endpoint::fallback_url;

/// HTTP 상태 클라이언트. `StatusSource` 포트 구현
pub struct HttpStatusClient {
    client: reqwest::Client,
    url: String,
}

impl HttpStatusClient {
    /// 새 HTTP 상태 클라이언트 생성
    pub fn new(origin: &str, path: &str, timeout: Duration) -> Result<Self, CoreError> {
        let url = fallback_url(origin, path)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// 서버 설정으로 생성
    pub fn from_config(config: &ServerConfig) -> Result<Self, CoreError> {
        Self::new(&config.origin, &config.fallback_path, config.request_timeout())
    }

    /// 조회 URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StatusSource for HttpStatusClient {
    async fn fetch_status(&self) -> Result<StatusSnapshot, CoreError> {
        debug!("상태 조회: GET {}", self.url);

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("상태 조회 실패: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("응답 본문 읽기 실패: {e}")))?;

        if !status.is_success() {
            return Err(CoreError::Network(format!("상태 조회 에러 ({status}): {body}")));
        }

        StatusSnapshot::decode(&body)
    }
}
