//! Contributions TUI - terminal dashboard for an account's contributions.
//!
//! Main entry point and event loop for the application.

mod app;
mod browser;
mod cli;
mod columns;
mod config;
mod contributions;
mod filters;
mod input;
mod logging;
mod session;
mod ui;

use app::{App, FetchOutcome, FetchTicket, ListViewParams};
use clap::Parser;
use cli::Args;
use config::Config;
use contributions::ContributionsClient;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use input::Effect;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
};
use session::Session;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

const HELP_TEXT: &str = "q quit · Tab/1-3 tabs · / search · n/p page · j/k move · a actions · o profile · r reload";

/// Main application entry point.
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Loads configuration and the stored location, initializes the terminal and
/// runs the event loop. Requests run on spawned tasks and report back over a
/// channel so the UI never blocks on the network.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    args.apply(&mut config);

    if config.account_slug.trim().is_empty() {
        let config_path = match &args.config {
            Some(path) => path.clone(),
            None => Config::default_config_path()?,
        };
        if !config_path.exists() {
            Config::default().save(Some(config_path.as_path()))?;
            eprintln!("Wrote a default config to: {}", config_path.display());
        }
        eprintln!("Set account_slug in the config file or pass --account <slug>.");
    }
    config.validate()?;

    logging::init(&config.log_file_path()?, &config.log_level)?;
    tracing::info!(
        account = %config.account_slug,
        direction = %config.direction,
        "starting"
    );

    let session_path = config.session_file_path()?;
    let mut session = Session::load(&session_path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable session file");
        Session::default()
    });
    if args.reset {
        session.forget(&config.account_slug, config.direction);
    }

    let mut location = session.location_for(&config.account_slug, config.direction);
    if let Some(query) = &args.query {
        location = location.with_query(query);
    }

    let client = ContributionsClient::new(&config)?;

    let (width, _) = crossterm::terminal::size().unwrap_or((config.table_breakpoint, 24));
    let params = ListViewParams {
        account_slug: config.account_slug.clone(),
        direction: config.direction,
        page_size: config.page_size,
        table_breakpoint: config.table_breakpoint,
    };
    let mut app = App::new(params, location, width);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut ctx = LoopContext {
        client,
        config: &config,
        session,
        session_path,
    };
    let result = run_app(&mut terminal, &mut app, &mut ctx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "event loop failed");
    }
    result
}

/// Everything the event loop needs besides the view state.
struct LoopContext<'a> {
    client: ContributionsClient,
    config: &'a Config,
    session: Session,
    session_path: PathBuf,
}

/// Render the complete UI.
///
/// # Details
/// Tabs, search bar, list body, pagination and status line from top to
/// bottom, with the action menu or edit drawer drawn on top when open.
fn render_ui(f: &mut ratatui::Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // Contributions
            Constraint::Length(3), // Pagination
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    ui::render_tabs(app, chunks[0], f.buffer_mut());
    ui::render_search(app, chunks[1], f.buffer_mut());
    ui::render_body(app, chunks[2], f.buffer_mut());
    ui::render_pagination(app, chunks[3], f.buffer_mut());

    let status_text = app.status_message.as_deref().unwrap_or(HELP_TEXT);
    let status = Paragraph::new(Line::from(status_text)).style(Style::default().fg(Color::Gray));
    f.render_widget(status, chunks[4]);

    ui::render_overlays(app, f.area(), f.buffer_mut());
}

/// Main event loop.
///
/// # Arguments
/// * `terminal` - Terminal instance
/// * `app` - Application state
/// * `ctx` - Client, configuration and session
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Issues the initial request, then alternates between drawing, applying
/// finished requests and handling terminal events.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ctx: &mut LoopContext<'_>,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();

    spawn_fetch(&ctx.client, &tx, app.refresh());

    loop {
        drain_outcomes(app, &mut rx);

        terminal.draw(|f| render_ui(f, app))?;

        // Use non-blocking event polling with timeout to keep UI responsive
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        let effect = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
            Event::Mouse(mouse) => {
                input::handle_mouse(app, mouse);
                None
            }
            Event::Resize(width, _) => {
                app.resize(width);
                None
            }
            _ => None,
        };

        match effect {
            Some(Effect::Quit) => break,
            Some(effect) => run_effect(app, ctx, &tx, effect),
            None => {}
        }
    }

    Ok(())
}

/// Carry out an input side effect.
fn run_effect(
    app: &mut App,
    ctx: &mut LoopContext<'_>,
    tx: &UnboundedSender<FetchOutcome>,
    effect: Effect,
) {
    match effect {
        Effect::Fetch(ticket) => {
            spawn_fetch(&ctx.client, tx, ticket);
            ctx.session
                .remember(app.account_slug(), app.direction(), &app.location);
            if let Err(e) = ctx.session.save(&ctx.session_path) {
                tracing::warn!(error = %e, "failed to save session");
                app.set_status(format!("Failed to save session: {}", e));
            }
        }
        Effect::OpenProfile(account) => {
            let url = browser::profile_url(&ctx.config.website_url, &account);
            open_url(app, &url, account.display_name());
        }
        Effect::LaunchWorkflow(intent) => {
            let url = browser::edit_workflow_url(&ctx.config.website_url, &intent);
            let what = format!("{} for #{}", intent.action.label(), intent.order.legacy_id);
            open_url(app, &url, &what);
        }
        Effect::Quit => {}
    }
}

fn open_url(app: &mut App, url: &str, what: &str) {
    match browser::open_in_browser(url) {
        Ok(()) => app.set_status(format!("Opened {} in browser", what)),
        Err(e) => {
            tracing::warn!(url, error = %e, "failed to open browser");
            app.set_status(format!("Failed to open browser: {}", e));
        }
    }
}

/// Run a request on its own task and report the outcome on `tx`.
fn spawn_fetch(client: &ContributionsClient, tx: &UnboundedSender<FetchOutcome>, ticket: FetchTicket) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.fetch_orders(&ticket.variables).await;
        let outcome = FetchOutcome {
            generation: ticket.generation,
            tab: ticket.tab,
            result,
        };
        // The receiver only goes away when the UI is shutting down.
        let _ = tx.send(outcome);
    });
}

fn drain_outcomes(app: &mut App, rx: &mut UnboundedReceiver<FetchOutcome>) {
    while let Ok(outcome) = rx.try_recv() {
        app.apply_fetch(outcome);
    }
}
