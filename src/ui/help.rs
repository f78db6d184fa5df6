use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(46, 14, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.active)
        .style(theme.background)
        .title(Span::styled(" ridetop keys (? to close) ", theme.active));

    let lines = vec![
        key_line(theme, "  q / Ctrl-C", "Quit"),
        key_line(theme, "  t",          "Show / hide ride time"),
        key_line(theme, "  s",          "Show / hide speed"),
        key_line(theme, "  r",          "Show / hide RPM"),
        key_line(theme, "  v",          "Show / hide revolutions"),
        key_line(theme, "  c",          "Cycle color theme"),
        key_line(theme, "  ? / F1",     "Toggle this help"),
        Line::from(""),
        key_line(theme, "Config  ~/.config/ridetop/ridetop.toml", ""),
        key_line(theme, "Log     ~/.cache/ridetop/ridetop.log", ""),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn key_line<'a>(theme: &Theme, key: &'a str, desc: &'a str) -> Line<'a> {
    if desc.is_empty() {
        // Section header
        Line::from(vec![
            Span::styled(key, theme.inactive),
        ])
    } else {
        Line::from(vec![
            Span::styled(format!("{:<14}", key), theme.active),
            Span::styled(desc, theme.footer_text),
        ])
    }
}

/// Centered Rect of the given size, capped at the available area.
fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    let x = r.x + (r.width.saturating_sub(w)) / 2;
    let y = r.y + (r.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_capped_and_centered() {
        let r = centered_rect(46, 14, Rect::new(0, 0, 100, 10));
        assert_eq!(r, Rect::new(27, 0, 46, 10));
        let r = centered_rect(46, 14, Rect::new(0, 0, 20, 40));
        assert_eq!(r, Rect::new(0, 13, 20, 14));
    }
}
