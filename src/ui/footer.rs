use crate::app::Panels;
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_footer(f: &mut Frame, area: Rect, panels: Panels, theme: &Theme) {
    let keys: [(&str, &str, bool); 4] = [
        ("t", "Time",  panels.time),
        ("s", "Speed", panels.speed),
        ("r", "RPM",   panels.rpm),
        ("v", "Revs",  panels.revolutions),
    ];

    let mut spans: Vec<Span> = vec![Span::styled(" ", theme.footer_text)];

    for (key, desc, shown) in keys {
        spans.push(Span::styled(format!(" {} ", key), theme.footer_key));
        let mark = if shown { "" } else { " (hidden)" };
        spans.push(Span::styled(format!("{}{}  ", desc, mark), theme.footer_text));
    }
    for (key, desc) in [("c", "Theme"), ("?", "Help"), ("q", "Quit")] {
        spans.push(Span::styled(format!(" {} ", key), theme.footer_key));
        spans.push(Span::styled(format!("{}  ", desc), theme.footer_text));
    }

    let para = Paragraph::new(Line::from(spans)).style(theme.background);
    f.render_widget(para, area);
}
