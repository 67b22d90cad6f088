//! # statusbar-network
//!
//! 상태 스트림 네트워크 어댑터.
//! WebSocket 상태 스트림 연결/재연결, HTTP 폴백 조회, 스트림 URL 유도를 담당한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use statusbar_network::connection_manager::ConnectionManager;
//! use statusbar_network::ws_client::WsClient;
//!
//! let manager = Arc::new(ConnectionManager::from_config(&config.server, Arc::new(WsClient::new()))?);
//! let mut snapshots = manager.subscribe();
//! manager.start(shutdown_rx)?;
//! ```

pub mod connection_manager;
pub mod connectivity;
pub mod endpoint;
pub mod http_client;
pub mod ws_client;
