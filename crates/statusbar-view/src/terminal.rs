//! 터미널 프레젠터.
//!
//! 세그먼트 → ANSI 24비트 색상 바. 한 줄은 색칠된 바, 다음 줄은 범례다.
//! 칸 수 계산에만 비율을 [0, 100]으로 제한하고 라벨은 원시 값을 유지한다.

use crate::presenter::Segment;

const RESET: &str = "\x1b[0m";

/// 바 + 범례 두 줄
pub fn render_bar(segments: &[Segment], width: usize) -> String {
    let cells = allocate_cells(segments, width);

    let mut bar = String::new();
    for (segment, count) in segments.iter().zip(&cells) {
        if *count == 0 {
            continue;
        }
        let (r, g, b) = segment.color.rgb;
        bar.push_str(&format!(
            "\x1b[48;2;{r};{g};{b}m\x1b[38;2;255;255;255m{}{RESET}",
            fit_label(&segment.label, *count)
        ));
    }
    // 어떤 세그먼트도 칸을 얻지 못하면 빈 자리를 채운다
    let used: usize = cells.iter().sum();
    if used < width {
        bar.push_str(&" ".repeat(width - used));
    }

    let legend = segments
        .iter()
        .map(|segment| {
            let (r, g, b) = segment.color.rgb;
            format!(
                "\x1b[38;2;{r};{g};{b}m■{RESET} {} {}",
                segment.tooltip, segment.label
            )
        })
        .collect::<Vec<_>>()
        .join("  ");

    format!("{bar}\n{legend}")
}

/// 세그먼트별 칸 수
///
/// 반올림 누적 방식이라 합계가 `width`를 넘지 않는다.
pub fn allocate_cells(segments: &[Segment], width: usize) -> Vec<usize> {
    let mut cells = Vec::with_capacity(segments.len());
    let mut cumulative = 0.0;
    let mut assigned = 0usize;

    for segment in segments {
        cumulative += segment.percentage.clamp(0.0, 100.0);
        let boundary = ((cumulative.min(100.0) / 100.0) * width as f64).round() as usize;
        let count = boundary.saturating_sub(assigned).min(width - assigned);
        cells.push(count);
        assigned += count;
    }
    cells
}

/// 라벨을 칸 수에 맞춰 가운데 정렬하거나 공백으로 대체
fn fit_label(label: &str, cells: usize) -> String {
    let len = label.chars().count();
    if len > cells {
        return " ".repeat(cells);
    }
    let left = (cells - len) / 2;
    let right = cells - len - left;
    format!("{}{label}{}", " ".repeat(left), " ".repeat(right))
}
