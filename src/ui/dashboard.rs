use crate::app::App;
use crate::ui::{footer::render_footer, graph::render_speed_graph, lcd};
use crate::util::human::{fmt_clock, fmt_revs, fmt_rpm, fmt_speed};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Block,
    Frame,
};

/// One number panel as it appears left to right on the strip.
struct NumberPanel {
    label: &'static str,
    mask:  &'static str,
    value: String,
}

pub fn render(f: &mut Frame, app: &App) {
    let area  = f.area();
    let theme = &app.theme;
    f.render_widget(Block::default().style(theme.background), area);

    // ── Root: panel strip | footer ──────────────────────────────────
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(area);

    let m = &app.metrics;
    let mut panels: Vec<NumberPanel> = Vec::new();
    if app.panels.time {
        panels.push(NumberPanel {
            label: "TIME",
            mask:  "88:88",
            value: fmt_clock(app.cycle.ride_time(), &app.config.display.time_format, app.colon),
        });
    }
    if app.panels.speed {
        panels.push(NumberPanel { label: "SPEED", mask: "88.8", value: fmt_speed(m.speed) });
    }
    if app.panels.rpm {
        panels.push(NumberPanel { label: "RPM", mask: "888", value: fmt_rpm(m.rpm) });
    }
    if app.panels.revolutions {
        panels.push(NumberPanel { label: "REVS", mask: "8888", value: fmt_revs(m.revolutions) });
    }

    // Fixed-width number panels, graph takes the rest
    let mut constraints: Vec<Constraint> = panels.iter()
        .map(|p| Constraint::Length(lcd::panel_width(p.label, p.mask).max(p.value.chars().count() as u16 + 2)))
        .collect();
    constraints.push(Constraint::Min(10));

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(root[0]);

    for (p, col) in panels.iter().zip(cols.iter()) {
        lcd::render_panel(f, *col, p.label, p.mask, &p.value, theme);
    }

    if let Some(graph_area) = cols.last() {
        render_speed_graph(f, *graph_area, &app.speed_graph, app.config.display.graph_max_speed, theme);
    }

    render_footer(f, root[1], app.panels, theme);
}
