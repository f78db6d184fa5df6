use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Lay `text` over `mask`, right-aligned. Each cell is `(char, lit)`: lit
/// cells come from `text`, the rest show the unlit mask segment.
pub fn overlay(mask: &str, text: &str) -> Vec<(char, bool)> {
    let mask: Vec<char> = mask.chars().collect();
    let text: Vec<char> = text.chars().collect();
    if text.len() > mask.len() {
        return text.into_iter().map(|c| (c, c != ' ')).collect();
    }
    let pad = mask.len() - text.len();
    mask.iter().enumerate().map(|(i, &m)| {
        match i.checked_sub(pad).map(|j| text[j]) {
            Some(c) if c != ' ' => (c, true),
            _                   => (m, false),
        }
    }).collect()
}

pub fn lcd_line(mask: &str, text: &str, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_lit: Option<bool> = None;
    for (c, lit) in overlay(mask, text) {
        if run_lit.is_some_and(|l| l != lit) {
            spans.push(styled(std::mem::take(&mut run), run_lit == Some(true), theme));
        }
        run.push(c);
        run_lit = Some(lit);
    }
    if !run.is_empty() {
        spans.push(styled(run, run_lit == Some(true), theme));
    }
    Line::from(spans)
}

fn styled(s: String, lit: bool, theme: &Theme) -> Span<'static> {
    Span::styled(s, if lit { theme.active } else { theme.inactive })
}

/// A labelled number panel: 14-segment style caption over a 7-segment value.
pub fn render_panel(f: &mut Frame, area: Rect, label: &str, mask: &str, value: &str, theme: &Theme) {
    let block = Block::default().style(theme.background);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let caption_mask = "~".repeat(label.chars().count());
    f.render_widget(
        Paragraph::new(lcd_line(&caption_mask, label, theme)).alignment(Alignment::Center),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(lcd_line(mask, value, theme)).alignment(Alignment::Center),
        rows[1],
    );
}

/// Columns a panel needs for its widest line, plus a cell of padding each side.
pub fn panel_width(label: &str, mask: &str) -> u16 {
    label.chars().count().max(mask.chars().count()) as u16 + 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeVariant;

    fn render(cells: &[(char, bool)]) -> (String, String) {
        let text: String = cells.iter().map(|(c, _)| *c).collect();
        let lit:  String = cells.iter().map(|(_, l)| if *l { '#' } else { '.' }).collect();
        (text, lit)
    }

    #[test]
    fn short_values_are_right_aligned_on_the_mask() {
        let (text, lit) = render(&overlay("88.8", "5.2"));
        assert_eq!(text, "85.2");
        assert_eq!(lit,  ".###");
    }

    #[test]
    fn spaces_show_the_mask() {
        let (text, lit) = render(&overlay("88:88", "03 07"));
        assert_eq!(text, "03:07");
        assert_eq!(lit,  "##.##");
    }

    #[test]
    fn empty_value_is_all_mask() {
        let (text, lit) = render(&overlay("888", ""));
        assert_eq!(text, "888");
        assert_eq!(lit, "...");
    }

    #[test]
    fn overlong_values_are_not_truncated() {
        let (text, _) = render(&overlay("888", "12345"));
        assert_eq!(text, "12345");
    }

    #[test]
    fn lcd_line_groups_runs_by_style() {
        let theme = Theme::for_variant(ThemeVariant::Orange);
        let line = lcd_line("8888", "42", &theme);
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, "88");
        assert_eq!(line.spans[0].style, theme.inactive);
        assert_eq!(line.spans[1].content, "42");
        assert_eq!(line.spans[1].style, theme.active);
    }

    #[test]
    fn width_fits_label_and_mask() {
        assert_eq!(panel_width("SPEED", "88.8"), 7);
        assert_eq!(panel_width("RPM", "888"), 5);
    }
}
