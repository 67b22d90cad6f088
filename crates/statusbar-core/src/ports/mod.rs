//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! `statusbar-network`가 이 trait들을 구현하며,
//! `statusbar-app`에서 `Arc<dyn T>`로 와이어링한다.

pub mod status_source;
pub mod status_stream;
