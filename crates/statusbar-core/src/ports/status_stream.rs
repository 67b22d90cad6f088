//! 상태 스트림 포트.
//!
//! 구현: `statusbar-network` crate (tokio-tungstenite)

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::CoreError;

/// 스트림으로 수신한 메시지
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamMessage {
    /// 텍스트 메시지 (JSON)
    Text(String),
    /// 바이너리 메시지
    Binary(Vec<u8>),
    /// 연결 종료
    Close,
}

/// 서버 푸시 상태 스트림
#[async_trait]
pub trait StatusStream: Send + Sync {
    /// 스트림 연결 수립
    ///
    /// 수신 메시지는 반환된 채널로 전달된다. 채널이 닫히면(또는 `Close` 수신 시)
    /// 연결이 끊긴 것으로 본다. 정상 종료와 에러 종료를 구분하지 않는다.
    async fn connect(&self, url: &str) -> Result<mpsc::Receiver<StreamMessage>, CoreError>;
}
