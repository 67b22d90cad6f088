//! HTML 프레젠터.
//!
//! 세그먼트 → 임베드 가능한 HTML 조각. 각 세그먼트는 배경색이 칠해진
//! `barsegment tooltip` 블록이고, 보이는 라벨(`bartext`)과
//! 호버 툴팁(`tooltiptext`)을 가진다. 폭은 원시 비율을 그대로 쓴다.

use crate::presenter::Segment;
use std::fmt::Write;

/// 바 전체 HTML 조각
pub fn render_bar(segments: &[Segment]) -> String {
    let mut html = String::from(r#"<div class="statusbar">"#);
    for segment in segments {
        let _ = write!(
            html,
            r#"<div class="barsegment tooltip" data-state="{state}" style="background-color: {color}; width: {width}%;"><span class="bartext">{label}</span><span class="tooltiptext">{tooltip}</span></div>"#,
            state = segment.state.key(),
            color = segment.color.css,
            width = segment.percentage,
            label = escape(&segment.label),
            tooltip = escape(&segment.tooltip),
        );
    }
    html.push_str("</div>");
    html
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
