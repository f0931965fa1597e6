use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, Registry,
};

use connect_four::ai::Priority;
use connect_four::config::{AppConfig, GameMode, LogConfig};
use connect_four::console::{self, TextConsole};
use connect_four::ui::App;

/// Play Connect Four at the console or in a terminal UI.
#[derive(Parser)]
#[command(name = "connect_four", about = "Play Connect Four against a friend or the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Who plays O; asked at the console when neither this nor the config sets it
    #[arg(long, value_enum)]
    mode: Option<GameMode>,

    /// Seed the computer's random fallback
    #[arg(long)]
    seed: Option<u64>,

    /// Let the computer take any winning column before blocking
    #[arg(long)]
    prefer_win: bool,

    /// Override the log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Play in the full-screen terminal UI instead of the line console
    #[arg(long)]
    tui: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    // The subscriber goes in before the config is read so loading can log;
    // the configured level is applied once it is known.
    let logging = if cli.tui {
        // No subscriber here: log lines would draw over the alternate screen
        None
    } else {
        let level = cli.log_level.clone().unwrap_or_else(|| LogConfig::default().level);
        Some(init_logging(&level)?)
    };

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(mode) = cli.mode {
        config.game.mode = Some(mode);
    }
    if let Some(seed) = cli.seed {
        config.ai.seed = Some(seed);
    }
    if cli.prefer_win {
        config.ai.priority = Priority::PreferWin;
    }
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }
    config.validate().context("validating command line overrides")?;

    if let Some(handle) = &logging {
        handle
            .reload(parse_level(&config.log.level)?)
            .context("applying configured log level")?;
    }

    if cli.tui {
        let mode = config.game.mode.unwrap_or(GameMode::VsComputer);
        run_tui(App::new(config, mode)).context("running terminal UI")?;
        return Ok(());
    }

    let mut console = TextConsole::stdio();
    console::play(&config, &mut console).context("playing console game")?;
    Ok(())
}

fn parse_level(level: &str) -> Result<LevelFilter> {
    let level: tracing::Level = level
        .parse()
        .with_context(|| format!("parsing log level '{level}'"))?;
    Ok(LevelFilter::from_level(level))
}

/// Install the stderr subscriber; the handle changes its level later.
fn init_logging(level: &str) -> Result<reload::Handle<LevelFilter, Registry>> {
    let (filter, handle) = reload::Layer::new(parse_level(level)?);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
    Ok(handle)
}

fn run_tui(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
