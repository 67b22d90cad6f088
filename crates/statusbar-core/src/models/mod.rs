//! 상태 바 도메인 모델.
//!
//! 스트림 메시지로부터 만들어지는 스냅샷과, 이를 그리기 위한 고정 색상 테이블.

pub mod color;
pub mod status;
