use ratatui::style::{Color, Modifier, Style};

// ── Helper: build an Rgb Color from a hex literal ──────────────────────

const fn rgb(hex: u32) -> Color {
    Color::Rgb(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >>  8) & 0xFF) as u8,
        ( hex        & 0xFF) as u8,
    )
}

// ── Theme variant selector ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeVariant {
    WhiteOnBlack,
    Orange,
}

impl ThemeVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::WhiteOnBlack => "white-on-black",
            Self::Orange       => "orange",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::WhiteOnBlack => Self::Orange,
            Self::Orange       => Self::WhiteOnBlack,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().replace('_', "-").as_str() {
            "orange" => Self::Orange,
            _        => Self::WhiteOnBlack,
        }
    }
}

// ── Theme struct ────────────────────────────────────────────────────────

/// Colours for the fake LCD: unlit segments, lit segments, panel background.
#[derive(Debug, Clone)]
pub struct Theme {
    pub inactive:    Style,
    pub active:      Style,
    pub background:  Style,
    pub graph:       Style,
    pub footer_key:  Style,
    pub footer_text: Style,
}

impl Theme {
    pub fn for_variant(v: ThemeVariant) -> Self {
        match v {
            ThemeVariant::WhiteOnBlack => Self::white_on_black(),
            ThemeVariant::Orange       => Self::orange(),
        }
    }

    fn white_on_black() -> Self {
        Self::from_palette(rgb(0x333333), rgb(0xeeeeee), rgb(0x000000))
    }

    fn orange() -> Self {
        // backlit amber LCD
        Self::from_palette(rgb(0xe27206), rgb(0x222222), rgb(0xfb7c00))
    }

    fn from_palette(inactive: Color, active: Color, bg: Color) -> Self {
        Self {
            inactive:    Style::default().fg(inactive).bg(bg).add_modifier(Modifier::ITALIC),
            active:      Style::default().fg(active).bg(bg).add_modifier(Modifier::BOLD | Modifier::ITALIC),
            background:  Style::default().bg(bg),
            graph:       Style::default().fg(active).bg(bg),
            footer_key:  Style::default().fg(bg).bg(active).add_modifier(Modifier::BOLD),
            footer_text: Style::default().fg(inactive).bg(bg),
        }
    }
}
