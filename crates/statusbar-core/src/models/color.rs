//! 상태 → 표시 색상 테이블.
//!
//! 프로세스 전역, 읽기 전용. 시작 시 한 번 정의되고 변경되지 않는다.

use super::status::TaskState;

/// 표시 색상
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// 사람이 읽는 이름
    pub name: &'static str,
    /// CSS 색상 값
    pub css: &'static str,
    /// RGB 값 (터미널 출력용)
    pub rgb: (u8, u8, u8),
}

impl Color {
    pub const fn new(name: &'static str, css: &'static str, rgb: (u8, u8, u8)) -> Self {
        Self { name, css, rgb }
    }
}

/// 순서가 있는 상태 → 색상 매핑
///
/// 항목 순서가 곧 세그먼트 표시 순서다.
#[derive(Debug, Clone, Copy)]
pub struct StateColorMap {
    entries: &'static [(TaskState, Color)],
}

impl StateColorMap {
    pub const fn new(entries: &'static [(TaskState, Color)]) -> Self {
        Self { entries }
    }

    /// 선언 순서로 (상태, 색상) 순회
    pub fn iter(&self) -> impl Iterator<Item = (TaskState, Color)> + '_ {
        self.entries.iter().copied()
    }

    /// 상태의 색상 조회
    pub fn color(&self, state: TaskState) -> Option<Color> {
        self.iter()
            .find(|(entry_state, _)| *entry_state == state)
            .map(|(_, color)| color)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub const DARK_GREEN: Color = Color::new("darkgreen", "darkgreen", (0, 100, 0));
pub const DARK_ORANGE: Color = Color::new("darkorange", "darkorange", (255, 140, 0));
pub const DARK_RED: Color = Color::new("darkred", "darkred", (139, 0, 0));
pub const NEAR_BLACK: Color = Color::new("near-black", "rgb(39, 28, 28)", (39, 28, 28));

/// 표준 상태 색상 테이블
pub static STATE_COLOR_MAP: StateColorMap = StateColorMap::new(&[
    (TaskState::Running, DARK_GREEN),
    (TaskState::Paused, DARK_ORANGE),
    (TaskState::Killed, DARK_RED),
    (TaskState::Done, NEAR_BLACK),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_states() {
        let states: Vec<TaskState> = STATE_COLOR_MAP.iter().map(|(state, _)| state).collect();
        assert_eq!(states, TaskState::ALL.to_vec());
    }

    #[test]
    fn canonical_colors() {
        assert_eq!(STATE_COLOR_MAP.color(TaskState::Running), Some(DARK_GREEN));
        assert_eq!(STATE_COLOR_MAP.color(TaskState::Done).map(|c| c.css), Some("rgb(39, 28, 28)"));
    }

    #[test]
    fn partial_map_lookup() {
        static ONLY_DONE: StateColorMap = StateColorMap::new(&[(TaskState::Done, NEAR_BLACK)]);
        assert_eq!(ONLY_DONE.len(), 1);
        assert!(ONLY_DONE.color(TaskState::Running).is_none());
    }
}
