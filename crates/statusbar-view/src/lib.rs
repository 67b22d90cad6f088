//! # statusbar-view
//!
//! 상태 바 렌더링.
//! 스냅샷과 색상 맵으로 세그먼트 목록을 계산하는 순수 함수와,
//! 세그먼트를 HTML 조각/터미널 출력으로 바꾸는 프레젠터를 제공한다.
//! 연결을 만들지 않으며 호출 사이에 상태를 갖지 않는다.

pub mod html;
pub mod presenter;
pub mod terminal;

pub use presenter::{render, Segment};
