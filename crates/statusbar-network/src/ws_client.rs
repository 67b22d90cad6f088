//! WebSocket 클라이언트.
//!
//! `tokio-tungstenite` 기반 `StatusStream` 포트 구현. 수신 전용.

use async_trait::async_trait;
use futures::StreamExt;
use statusbar_core::error::CoreError;
use statusbar_core::ports::status_stream::{StatusStream, StreamMessage};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// 수신 채널 용량
const CHANNEL_CAPACITY: usize = 64;

/// WebSocket 클라이언트. `StatusStream` 포트 구현
#[derive(Debug, Clone, Default)]
pub struct WsClient;

impl WsClient {
    /// 새 WebSocket 클라이언트 생성
    pub fn new() -> Self {
        Self
    }

    /// 수신 루프
    ///
    /// Ping/Pong은 tungstenite가 읽기 중에 자동 응답한다. 수신측이 사라지면
    /// 서버에 종료 프레임을 보내고 끝난다.
    async fn read_loop(mut ws: WsStream, tx: mpsc::Sender<StreamMessage>) {
        loop {
            let next = tokio::select! {
                next = ws.next() => next,
                _ = tx.closed() => break,
            };
            let Some(msg) = next else { break };

            match msg {
                Ok(Message::Text(text)) => {
                    if tx.send(StreamMessage::Text(text.to_string())).await.is_err() {
                        break;
                    }
                }
                Ok(Message::Binary(data)) => {
                    if tx.send(StreamMessage::Binary(data.to_vec())).await.is_err() {
                        break;
                    }
                }
                Ok(Message::Close(frame)) => {
                    debug!("서버 종료 프레임 수신: {frame:?}");
                    let _ = tx.send(StreamMessage::Close).await;
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("WebSocket 수신 에러: {e}");
                    break;
                }
            }
        }

        if tx.is_closed() {
            debug!("수신측 종료, WebSocket 닫기");
            if let Err(e) = ws.close(None).await {
                debug!("WebSocket 닫기 실패: {e}");
            }
        }
        debug!("WebSocket 수신 루프 종료");
    }
}

#[async_trait]
impl StatusStream for WsClient {
    async fn connect(&self, url: &str) -> Result<mpsc::Receiver<StreamMessage>, CoreError> {
        info!("WebSocket 연결: {url}");

        let (ws_stream, _) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| CoreError::Network(format!("WebSocket 연결 실패: {e}")))?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        // 수신 태스크
        tokio::spawn(Self::read_loop(ws_stream, tx));

        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::SinkExt;
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn connect_refused_is_network_error() {
        // 바인드 후 즉시 해제한 포트 → 연결 거부
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = WsClient::new().connect(&format!("ws://{addr}/ws/status")).await;
        assert!(matches!(result, Err(CoreError::Network(_))));
    }

    #[tokio::test]
    async fn forwards_text_binary_and_close() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
            ws.send(Message::text(r#"{"running":50}"#)).await.unwrap();
            ws.send(Message::binary(br#"{"done":10}"#.to_vec())).await.unwrap();
            ws.close(None).await.unwrap();
        });

        let mut rx = WsClient::new()
            .connect(&format!("ws://{addr}/ws/status"))
            .await
            .unwrap();

        assert_eq!(
            rx.recv().await,
            Some(StreamMessage::Text(r#"{"running":50}"#.to_string()))
        );
        assert_eq!(
            rx.recv().await,
            Some(StreamMessage::Binary(br#"{"done":10}"#.to_vec()))
        );
        assert_eq!(rx.recv().await, Some(StreamMessage::Close));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn dropping_receiver_closes_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (closed_tx, closed_rx) = oneshot::channel();

        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
            ws.send(Message::text(r#"{"running":50}"#)).await.unwrap();

            // 서버는 먼저 닫지 않는다. 클라이언트 쪽 종료만 기다린다.
            let closed = matches!(
                timeout(Duration::from_secs(5), ws.next()).await,
                Ok(None) | Ok(Some(Ok(Message::Close(_)))) | Ok(Some(Err(_)))
            );
            let _ = closed_tx.send(closed);
        });

        let mut rx = WsClient::new()
            .connect(&format!("ws://{addr}/ws/status"))
            .await
            .unwrap();
        assert_eq!(
            rx.recv().await,
            Some(StreamMessage::Text(r#"{"running":50}"#.to_string()))
        );
        drop(rx);

        assert!(closed_rx.await.unwrap());
    }
}
