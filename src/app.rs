use crate::collectors::TelemetrySource;
use crate::config::Config;
use crate::input::{handle_key, Action};
use crate::models::cycle::{Cycle, Metrics};
use crate::ui::theme::{Theme, ThemeVariant};
use crate::ui::{dashboard, help};
use crate::util::history::History;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use std::time::{Duration, Instant};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

// ── Panel visibility ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panels {
    pub time:        bool,
    pub speed:       bool,
    pub rpm:         bool,
    pub revolutions: bool,
}

impl Default for Panels {
    fn default() -> Self {
        Self { time: true, speed: true, rpm: true, revolutions: true }
    }
}

// ── App ───────────────────────────────────────────────────────────────

pub struct App {
    pub config: Config,

    // Theme
    pub theme:         Theme,
    pub theme_variant: ThemeVariant,

    pub panels:    Panels,
    pub show_help: bool,

    // Clock colon blinks once per tick
    pub colon: bool,

    // Core data
    pub cycle:       Cycle,
    pub metrics:     Metrics,
    pub speed_graph: History,

    source:    Box<dyn TelemetrySource>,
    tick:      Duration,
    last_tick: Option<Instant>,

    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, source: Box<dyn TelemetrySource>) -> Result<Self> {
        let theme_variant = ThemeVariant::from_name(&config.display.theme);
        let divisor = config.cycle.speed_divisor;
        if !(divisor.is_finite() && divisor > 0.0) {
            anyhow::bail!("invalid [cycle] speed_divisor {}: must be a positive number", divisor);
        }
        let cycle = Cycle::new(&config.cycle).context("invalid [cycle] speed_smoothing")?;
        let speed_graph = History::new(config.display.graph_samples)
            .context("invalid [display] graph_samples")?;
        let metrics = cycle.metrics(&config.display.time_format);

        Ok(Self {
            theme:         Theme::for_variant(theme_variant),
            theme_variant,
            panels:        Panels::default(),
            show_help:     false,
            colon:         true,
            tick:          Duration::from_millis(config.display.tick_ms.max(100)),
            last_tick:     None,
            cycle,
            metrics,
            speed_graph,
            source,
            config,
            should_quit:   false,
        })
    }

    /// Pull whatever telemetry arrived since the last call into the model.
    pub fn poll_source(&mut self) {
        let updates = self.source.poll();
        self.cycle.apply_all(updates);
    }

    pub fn source_exhausted(&self) -> bool {
        self.source.exhausted()
    }

    /// One sampling step: refresh metrics, extend the speed graph, blink the colon.
    pub fn tick(&mut self) -> &Metrics {
        self.poll_source();
        self.metrics = self.cycle.sample(&self.config.display.time_format);
        self.speed_graph.add(self.metrics.speed);
        self.colon = !self.colon;
        self.last_tick = Some(Instant::now());
        &self.metrics
    }

    pub fn tick_due(&self) -> bool {
        self.last_tick.map_or(true, |t| t.elapsed() >= self.tick)
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit              => self.should_quit = true,
            Action::ToggleTime        => self.panels.time = !self.panels.time,
            Action::ToggleSpeed       => self.panels.speed = !self.panels.speed,
            Action::ToggleRpm         => self.panels.rpm = !self.panels.rpm,
            Action::ToggleRevolutions => self.panels.revolutions = !self.panels.revolutions,
            Action::CycleTheme => {
                self.theme_variant = self.theme_variant.next();
                self.theme = Theme::for_variant(self.theme_variant);
                tracing::debug!(theme = self.theme_variant.name(), "theme changed");
            }
            Action::ShowHelp => self.show_help = !self.show_help,
            Action::Back     => self.show_help = false,
            Action::None     => {}
        }
    }

    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        loop {
            if self.tick_due() {
                self.tick();
            } else {
                self.poll_source();
            }

            terminal.draw(|f| {
                dashboard::render(f, self);
                if self.show_help {
                    help::render(f, &self.theme);
                }
            })?;

            if event::poll(POLL_TIMEOUT)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_action(handle_key(key));
                    }
                }
            }

            if self.should_quit { break; }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::protocol::Update;

    /// Hands out one scripted batch per poll.
    struct Scripted(Vec<Vec<Update>>);

    impl TelemetrySource for Scripted {
        fn poll(&mut self) -> Vec<Update> {
            if self.0.is_empty() { Vec::new() } else { self.0.remove(0) }
        }

        fn exhausted(&self) -> bool {
            self.0.is_empty()
        }
    }

    fn app(batches: Vec<Vec<Update>>, graph_samples: usize) -> App {
        let mut cfg = Config::default();
        cfg.display.graph_samples = graph_samples;
        App::new(cfg, Box::new(Scripted(batches))).unwrap()
    }

    #[test]
    fn ticks_feed_the_speed_graph() {
        let mut a = app(vec![
            vec![Update::Delta(1000), Update::RideTime(1000)],
            vec![Update::Delta(500), Update::Revolutions(2)],
            vec![],
        ], 2);
        assert!(a.speed_graph.is_empty());

        assert_eq!(a.tick().rpm, 60.0);
        assert_eq!(a.tick().revolutions, 2);
        let speed = a.tick().speed;
        assert!((speed - 120.0 / 3.5).abs() < 1e-9);

        // Graph keeps only the newest two samples.
        assert_eq!(a.speed_graph.len(), 2);
        assert_eq!(a.speed_graph.snapshot(), vec![120.0 / 3.5, 120.0 / 3.5]);
        assert!(a.source_exhausted());
    }

    #[test]
    fn colon_blinks_every_tick() {
        let mut a = app(vec![], 10);
        let start = a.colon;
        a.tick();
        assert_ne!(a.colon, start);
        a.tick();
        assert_eq!(a.colon, start);
    }

    #[test]
    fn first_tick_is_due_immediately() {
        let mut a = app(vec![], 10);
        assert!(a.tick_due());
        a.tick();
        assert!(!a.tick_due());
    }

    #[test]
    fn toggles_and_theme_cycle() {
        let mut a = app(vec![], 10);
        a.handle_action(Action::ToggleRpm);
        a.handle_action(Action::ToggleRpm);
        a.handle_action(Action::ToggleSpeed);
        assert_eq!(a.panels, Panels { speed: false, ..Panels::default() });

        assert_eq!(a.theme_variant, ThemeVariant::WhiteOnBlack);
        a.handle_action(Action::CycleTheme);
        assert_eq!(a.theme_variant, ThemeVariant::Orange);

        a.handle_action(Action::Quit);
        assert!(a.should_quit);
    }

    #[test]
    fn non_positive_speed_divisor_is_a_config_error() {
        for divisor in [0.0, -3.5, f64::NAN, f64::INFINITY] {
            let mut cfg = Config::default();
            cfg.cycle.speed_divisor = divisor;
            let err = App::new(cfg, Box::new(Scripted(vec![]))).err().unwrap();
            assert!(err.to_string().contains("speed_divisor"), "{err}");
        }
    }

    #[test]
    fn zero_graph_samples_is_a_config_error() {
        let mut cfg = Config::default();
        cfg.display.graph_samples = 0;
        assert!(App::new(cfg, Box::new(Scripted(vec![]))).is_err());
    }
}
