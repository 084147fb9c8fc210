//! Nanotale terminal application.
//!
//! Pick a few words, a theme and a length; Claude writes a very short story
//! that uses them.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line protocol suitable for scripts:
//!
//! ```bash
//! cargo run -p nanotale -- --headless --theme horror --words crypt,wraith
//! ```

mod app;
mod clipboard;
mod events;
mod headless;
mod ui;
mod worker;

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use claude::Claude;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use nanotale_core::config::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use nanotale_core::{ClaudeModel, GeneratorConfig, StoryGenerator};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use app::App;
use events::{handle_event, EventResult};
use headless::HeadlessConfig;
use ui::render::render;
use worker::{spawn_worker, GenerationDone, GenerationJob};

const DEFAULT_LOG_FILTER: &str = "nanotale=info,nanotale_core=info,claude=warn";

/// Short stories from a handful of words.
#[derive(Debug, Parser)]
#[command(name = "nanotale", version, about)]
struct Args {
    /// Claude model to use
    #[arg(long, env = "NANOTALE_MODEL")]
    model: Option<String>,

    /// Maximum tokens in the model's answer
    #[arg(long, env = "NANOTALE_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: usize,

    /// Sampling temperature
    #[arg(long, env = "NANOTALE_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Override the Anthropic API base URL
    #[arg(long, env = "ANTHROPIC_BASE_URL")]
    api_base: Option<String>,

    /// Write logs to this file
    #[arg(long, env = "NANOTALE_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Run the line protocol on stdin/stdout instead of the TUI
    #[arg(long)]
    headless: bool,

    /// Starting theme (headless)
    #[arg(long, requires = "headless")]
    theme: Option<String>,

    /// Starting words, comma separated (headless)
    #[arg(long, value_delimiter = ',', requires = "headless")]
    words: Vec<String>,

    /// Starting length in words (headless)
    #[arg(long, requires = "headless")]
    length: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Check for API key
    if std::env::var("ANTHROPIC_API_KEY").is_err() {
        eprintln!("Error: ANTHROPIC_API_KEY environment variable not set.");
        eprintln!("Please set it in .env file or with: export ANTHROPIC_API_KEY=your_key_here");
        std::process::exit(1);
    }

    init_logging(&args)?;
    let generator = build_generator(&args)?;

    if args.headless {
        let config = HeadlessConfig {
            theme: args.theme,
            words: args.words,
            length: args.length,
        };
        return headless::run_headless(generator, config).await;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (job_tx, done_rx) = spawn_worker(generator);
    let result = run_app(&mut terminal, App::new(), job_tx, done_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result.context("terminal UI failed")
}

/// Install the tracing subscriber.
///
/// Headless mode logs to stderr. The TUI owns the terminal, so it only logs
/// when a file is given.
fn init_logging(args: &Args) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("could not open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if args.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn build_generator(args: &Args) -> anyhow::Result<StoryGenerator> {
    let mut config = GeneratorConfig::new()
        .with_max_tokens(args.max_tokens)
        .with_temperature(args.temperature);
    if let Some(model) = &args.model {
        config = config.with_model(model.as_str());
    }

    let mut client = Claude::from_env().context("could not create the Claude client")?;
    if let Some(api_base) = &args.api_base {
        client = client.with_base_url(api_base.as_str());
    }

    info!(model = ?args.model, max_tokens = args.max_tokens, "generator ready");
    Ok(StoryGenerator::new(ClaudeModel::new(client, config)))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    job_tx: mpsc::Sender<GenerationJob>,
    mut done_rx: mpsc::Receiver<GenerationDone>,
) -> io::Result<()> {
    loop {
        // Render
        let mut story_scroll_limit = 0;
        terminal.draw(|f| story_scroll_limit = render(f, &app))?;
        app.set_story_scroll_limit(story_scroll_limit);

        // Process any pending save operation
        if let Some(path) = app.pending_save.take() {
            if let Some(contents) = app.save_contents() {
                let result = tokio::fs::write(&path, contents).await;
                app.finish_save(&path, result);
            }
        }

        // Copy to the clipboard through the terminal
        if let Some(text) = app.take_clipboard() {
            if let Err(e) = clipboard::copy_to_clipboard(&mut io::stdout(), &text) {
                app.set_error(format!("Copy failed: {e}"));
            }
        }

        // Pick up finished stories
        while let Ok(done) = done_rx.try_recv() {
            app.apply_outcome(done);
        }

        // Poll for events with timeout for animations
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;

            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::Submit(job) => {
                    let id = job.id;
                    if job_tx.send(job).await.is_err() {
                        warn!(id, "generation worker is gone");
                        app.abandon_job(id);
                    }
                }
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        } else {
            // Tick animations
            app.tick();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
