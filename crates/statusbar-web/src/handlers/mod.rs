//! API 핸들러.

pub mod status;
pub mod stream;
pub mod widget;
