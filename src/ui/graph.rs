use crate::ui::theme::Theme;
use crate::util::history::History;
use crate::util::human::fmt_speed;
use ratatui::{
    layout::Rect,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Chart, Dataset, GraphType},
    Frame,
};

/// Polyline points for the graph: sample index on x, speed clamped to
/// `0..=max_speed` on y.
pub fn graph_points(history: &History, max_speed: f64) -> Vec<(f64, f64)> {
    history.iter()
        .enumerate()
        .map(|(x, v)| (x as f64, v.clamp(0.0, max_speed)))
        .collect()
}

pub fn render_speed_graph(f: &mut Frame, area: Rect, history: &History, max_speed: f64, theme: &Theme) {
    let max_speed = if max_speed > 0.0 { max_speed } else { 30.0 };
    let points = graph_points(history, max_speed);

    let title = match history.max() {
        Some(peak) => format!(" avg {}  max {} ", fmt_speed(history.mean()), fmt_speed(peak)),
        None       => " avg - ".to_string(),
    };
    let block = Block::default()
        .style(theme.background)
        .title(Span::styled(title, theme.inactive));

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.graph)
        .data(&points);

    let x_max = history.capacity().saturating_sub(1).max(1) as f64;
    let chart = Chart::new(vec![dataset])
        .block(block)
        .style(theme.background)
        .x_axis(Axis::default().bounds([0.0, x_max]))
        .y_axis(Axis::default().bounds([0.0, max_speed]));

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_follow_chronological_order() {
        let mut h = History::new(3).unwrap();
        for v in [5.0, 10.0, 15.0, 20.0] {
            h.add(v);
        }
        assert_eq!(graph_points(&h, 30.0), vec![(0.0, 10.0), (1.0, 15.0), (2.0, 20.0)]);
    }

    #[test]
    fn points_are_clamped_to_the_axis() {
        let mut h = History::new(4).unwrap();
        h.add(45.0);
        h.add(-1.0);
        assert_eq!(graph_points(&h, 30.0), vec![(0.0, 30.0), (1.0, 0.0)]);
    }

    #[test]
    fn empty_history_has_no_points() {
        let h = History::new(100).unwrap();
        assert!(graph_points(&h, 30.0).is_empty());
    }
}
