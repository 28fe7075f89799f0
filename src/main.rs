use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};
use tracing::info;

use stitchcount::{
    app::{Action, App},
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore, PatternPreset},
    logging::setup_logging,
    pattern::{Pattern, PatternField},
    runtime::{CounterEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    session::ConfigState,
    ui::ui,
};

/// stitch counter for repeating crochet rows
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal stitch counter for repeating crochet rows. Track standard, increased and decreased stitches per repetition, see row progress at a glance, and keep your round number across resets."
)]
pub struct Cli {
    /// standard stitches per repetition
    #[clap(short = 's', long, allow_negative_numbers = true)]
    standard: Option<i64>,

    /// increases per repetition (each one makes two stitches)
    #[clap(short = 'i', long, allow_negative_numbers = true)]
    increased: Option<i64>,

    /// decreases per repetition
    #[clap(short = 'd', long, allow_negative_numbers = true)]
    decreased: Option<i64>,

    /// repetitions in the row
    #[clap(short = 'r', long, allow_negative_numbers = true)]
    reps: Option<i64>,

    /// round to start on
    #[clap(long, default_value_t = 1, allow_negative_numbers = true)]
    round: i64,

    /// log level for the log file (trace, debug, info, warn, error)
    #[clap(long)]
    log_level: Option<String>,

    /// remember this row shape as the starting pattern for future launches
    #[clap(long)]
    save_preset: bool,
}

impl Cli {
    fn value(&self, field: PatternField) -> Option<i64> {
        match field {
            PatternField::Round => Some(self.round),
            PatternField::Standard => self.standard,
            PatternField::Increased => self.increased,
            PatternField::Decreased => self.decreased,
            PatternField::Reps => self.reps,
        }
    }

    /// Starting pattern: CLI flags, then the saved preset, then built-in defaults.
    /// Every value is clamped the same way an in-app edit would be.
    fn start_pattern(&self, preset: &PatternPreset) -> Pattern {
        let mut state = ConfigState::default();
        for field in PatternField::ALL {
            let value = self
                .value(field)
                .or_else(|| preset.value(field).map(i64::from));
            if let Some(v) = value {
                state.set(field, v);
            }
        }
        *state.pattern()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut cfg = store.load();
    setup_logging(
        &AppDirs::log_path(),
        cli.log_level.as_deref(),
        cfg.log_level.as_deref(),
    )?;

    let start = cli.start_pattern(&cfg.pattern);
    if cli.save_preset {
        cfg.pattern = start.into();
        store.save(&cfg)?;
        info!(path = %store.path().display(), "saved starting pattern");
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(start);
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    info!(pattern = ?app.pattern(), "session started");
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            CounterEvent::Tick => {
                if app.on_tick() {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            CounterEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            CounterEvent::Key(key) => {
                if app.on_key(key) == Action::Quit {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    info!(
        round = app.summary.round,
        done = app.summary.total_done,
        total = app.summary.total_stitches,
        "session ended"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::sync::mpsc;
    use std::time::Duration;
    use stitchcount::runtime::TestEventSource;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["stitchcount"]);

        assert_eq!(cli.standard, None);
        assert_eq!(cli.increased, None);
        assert_eq!(cli.decreased, None);
        assert_eq!(cli.reps, None);
        assert_eq!(cli.round, 1);
        assert_eq!(cli.log_level, None);
        assert!(!cli.save_preset);
    }

    #[test]
    fn test_cli_short_and_long_flags() {
        let cli = Cli::parse_from(["stitchcount", "-s", "3", "-i", "2", "-d", "1", "-r", "8"]);
        assert_eq!(cli.standard, Some(3));
        assert_eq!(cli.increased, Some(2));
        assert_eq!(cli.decreased, Some(1));
        assert_eq!(cli.reps, Some(8));

        let cli = Cli::parse_from([
            "stitchcount",
            "--standard",
            "4",
            "--reps",
            "12",
            "--round",
            "5",
            "--log-level",
            "debug",
            "--save-preset",
        ]);
        assert_eq!(cli.standard, Some(4));
        assert_eq!(cli.reps, Some(12));
        assert_eq!(cli.round, 5);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.save_preset);
    }

    #[test]
    fn test_start_pattern_defaults() {
        let cli = Cli::parse_from(["stitchcount"]);
        assert_eq!(cli.start_pattern(&PatternPreset::default()), Pattern::default());
    }

    #[test]
    fn test_start_pattern_prefers_cli_over_preset() {
        let preset = PatternPreset {
            standard_per_rep: 7,
            increased_per_rep: 0,
            decreased_per_rep: 2,
            reps_count: 9,
        };
        let cli = Cli::parse_from(["stitchcount", "-r", "4", "--round", "3"]);
        let p = cli.start_pattern(&preset);
        assert_eq!(p.round, 3);
        assert_eq!(p.standard_per_rep, 7);
        assert_eq!(p.increased_per_rep, 0);
        assert_eq!(p.decreased_per_rep, 2);
        assert_eq!(p.reps_count, 4);
    }

    #[test]
    fn test_start_pattern_clamps_cli_values() {
        let cli = Cli::parse_from(["stitchcount", "-s", "-3", "-r", "0", "--round", "-1"]);
        let p = cli.start_pattern(&PatternPreset::default());
        assert_eq!(p.standard_per_rep, 0);
        assert_eq!(p.reps_count, 1);
        assert_eq!(p.round, 1);
    }

    #[test]
    fn test_start_pattern_bounds_huge_cli_values() {
        let cli = Cli::parse_from(["stitchcount", "-r", "4294967295", "-i", "4294967295"]);
        let p = cli.start_pattern(&PatternPreset::default());
        assert_eq!(p.reps_count, stitchcount::pattern::MAX_REPS_COUNT);
        assert_eq!(p.increased_per_rep, stitchcount::pattern::MAX_INCREASED_PER_REP);
    }

    #[test]
    fn test_start_tui_headless_session() {
        let (tx, rx) = mpsc::channel();
        for c in ['f', 'j', '+', 'R', 'q'] {
            tx.send(CounterEvent::Key(KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::NONE,
            )))
            .unwrap();
        }
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(5)),
        );
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = App::new(Pattern {
            round: 2,
            ..Pattern::default()
        });

        start_tui(&mut terminal, &mut app, &runner).unwrap();

        assert_eq!(app.pattern(), Pattern::default().with_round(2));
        assert_eq!(app.summary.total_done, 0);
    }
}
