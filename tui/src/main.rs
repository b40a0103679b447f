//! SIMRS Regu-AI: interactive Ratatui dashboard
//!
//! Three views share a sidebar: Overview, BLU Accounting, and Clinical AI.
//! Advisory calls run on a tokio runtime in the background; their results come
//! back to the event loop over a channel, so the UI never blocks on the network.
//!
//! Logs go to a file (`--log-file`) because the terminal is in raw mode.

mod app;
mod ui;

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    time::Duration,
};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use simrs_advisory::{Advisor, AdvisoryConfig, GeminiClient};
use simrs_ref_hospital::MockStore;

use crate::app::{Action, AppState, Command};

#[derive(Parser)]
#[command(name = "simrs-tui", about = "SIMRS Regu-AI interactive dashboard")]
struct Args {
    /// Optional TOML configuration file with an [advisory] table.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the Gemini model identifier.
    #[arg(long)]
    model: Option<String>,

    /// Write logs to this file. Without it, logging is off.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn build_advisor(args: &Args) -> io::Result<Advisor<GeminiClient>> {
    let config = match &args.config {
        Some(path) => AdvisoryConfig::from_file(path).map_err(io::Error::other)?,
        None => AdvisoryConfig::from_env(),
    };
    let config = match &args.model {
        Some(model) => config.with_model(model.clone()),
        None => config,
    };
    Ok(Advisor::new(GeminiClient::new(config)))
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let advisor = Arc::new(build_advisor(&args)?);
    let runtime = tokio::runtime::Runtime::new()?;
    let (tx, rx) = mpsc::channel::<Action>();

    let mut app = AppState::new(MockStore::seeded(), advisor.is_configured());
    info!(
        configured = app.advisory_configured,
        model = %advisor.service().config().settings.model,
        "dashboard starting"
    );

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    const POLL_MS: u64 = 100;

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = app::key_to_action(&app, key) {
                        if let Some(command) = app.dispatch(action) {
                            execute_command(&runtime, &advisor, &tx, command);
                        }
                    }
                }
            }
        }

        // Results from finished background calls.
        while let Ok(action) = rx.try_recv() {
            if let Some(command) = app.dispatch(action) {
                execute_command(&runtime, &advisor, &tx, command);
            }
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}

fn execute_command(
    runtime: &tokio::runtime::Runtime,
    advisor: &Arc<Advisor<GeminiClient>>,
    tx: &mpsc::Sender<Action>,
    command: Command,
) {
    match command {
        Command::Advise(request) => {
            debug!(kind = request.kind().name(), "spawning advisory call");
            let advisor = Arc::clone(advisor);
            let tx = tx.clone();
            runtime.spawn(async move {
                let advisory = advisor.advise(&request).await;
                // The receiver is gone only after the loop exits.
                let _ = tx.send(Action::AdvisoryFinished(advisory));
            });
        }
    }
}
