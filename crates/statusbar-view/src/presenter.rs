//! 세그먼트 프레젠터.
//!
//! StatusSnapshot + StateColorMap → 표시용 세그먼트 목록 변환.

use statusbar_core::models::color::{Color, StateColorMap};
use statusbar_core::models::status::{StatusSnapshot, TaskState};

/// 바 한 칸 (렌더링마다 새로 계산)
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// 상태
    pub state: TaskState,
    /// 원시 비율 (정규화/클램핑 없음)
    pub percentage: f64,
    /// 표시 색상
    pub color: Color,
    /// 보이는 라벨 ("50%")
    pub label: String,
    /// 툴팁 텍스트 (상태 이름)
    pub tooltip: String,
}

/// 스냅샷 → 세그먼트 목록
///
/// 색상 맵 항목마다 하나씩, 맵의 선언 순서로 만든다.
/// 스냅샷에 없는 상태는 0%로 표시한다.
pub fn render(snapshot: &StatusSnapshot, color_map: &StateColorMap) -> Vec<Segment> {
    color_map
        .iter()
        .map(|(state, color)| segment(state, snapshot.percentage(state), color))
        .collect()
}

fn segment(state: TaskState, percentage: f64, color: Color) -> Segment {
    Segment {
        state,
        percentage,
        color,
        label: format_percentage(percentage),
        tooltip: state.label().to_string(),
    }
}

/// 비율 라벨 ("50%", "12.5%", "-5%")
pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use statusbar_core::models::color::{
        DARK_GREEN, DARK_ORANGE, DARK_RED, NEAR_BLACK, STATE_COLOR_MAP,
    };

    fn snapshot(pairs: &[(TaskState, f64)]) -> StatusSnapshot {
        StatusSnapshot::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn full_snapshot_renders_in_canonical_order() {
        let snapshot = StatusSnapshot::decode(
            r#"{"running":50,"paused":25,"killed":15,"done":10}"#,
        )
        .unwrap();

        let segments = render(&snapshot, &STATE_COLOR_MAP);

        let labels: Vec<&str> = segments.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["50%", "25%", "15%", "10%"]);
        let colors: Vec<Color> = segments.iter().map(|s| s.color).collect();
        assert_eq!(colors, vec![DARK_GREEN, DARK_ORANGE, DARK_RED, NEAR_BLACK]);
    }

    #[test]
    fn key_order_in_message_is_irrelevant() {
        let snapshot = StatusSnapshot::decode(
            r#"{"done":10,"killed":15,"running":50,"paused":25}"#,
        )
        .unwrap();

        let states: Vec<TaskState> = render(&snapshot, &STATE_COLOR_MAP)
            .iter()
            .map(|s| s.state)
            .collect();
        assert_eq!(states, TaskState::ALL.to_vec());
    }

    #[test]
    fn missing_state_renders_zero() {
        let segments = render(
            &snapshot(&[(TaskState::Running, 60.0), (TaskState::Done, 40.0)]),
            &STATE_COLOR_MAP,
        );

        assert_eq!(segments.len(), 4);
        assert_eq!(segments[1].state, TaskState::Paused);
        assert_eq!(segments[1].percentage, 0.0);
        assert_eq!(segments[1].label, "0%");
        assert_eq!(segments[2].label, "0%");
    }

    #[test]
    fn empty_snapshot_renders_all_zero() {
        let segments = render(&StatusSnapshot::new(), &STATE_COLOR_MAP);
        assert_eq!(segments.len(), STATE_COLOR_MAP.len());
        assert!(segments.iter().all(|s| s.label == "0%"));
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let segments = render(
            &snapshot(&[(TaskState::Running, 120.0), (TaskState::Killed, -5.0)]),
            &STATE_COLOR_MAP,
        );
        assert_eq!(segments[0].label, "120%");
        assert_eq!(segments[0].percentage, 120.0);
        assert_eq!(segments[2].label, "-5%");
    }

    #[test]
    fn fractional_label() {
        assert_eq!(format_percentage(12.5), "12.5%");
        assert_eq!(format_percentage(33.0), "33%");
    }

    #[test]
    fn tooltips_name_the_state() {
        let segments = render(&StatusSnapshot::initial(), &STATE_COLOR_MAP);
        let tooltips: Vec<&str> = segments.iter().map(|s| s.tooltip.as_str()).collect();
        assert_eq!(tooltips, vec!["Running", "Paused", "Killed/Exited", "Done"]);
    }

    #[test]
    fn render_is_idempotent() {
        let snapshot = snapshot(&[(TaskState::Paused, 30.0), (TaskState::Done, 70.0)]);
        assert_eq!(
            render(&snapshot, &STATE_COLOR_MAP),
            render(&snapshot, &STATE_COLOR_MAP)
        );
    }

    #[test]
    fn custom_map_controls_order_and_count() {
        static REVERSED: StateColorMap = StateColorMap::new(&[
            (TaskState::Done, NEAR_BLACK),
            (TaskState::Running, DARK_GREEN),
        ]);

        let segments = render(&StatusSnapshot::initial(), &REVERSED);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].state, TaskState::Done);
        assert_eq!(segments[1].state, TaskState::Running);
    }
}
