use std::io;

use color_eyre::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::{interval, Duration};
use tracing::info;

use trendpost::app::{App, Screen};
use trendpost::ui;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log to a file under `~/.trendpost/`; stdout belongs to the TUI.
fn init_tracing() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let dir = home.join(".trendpost");
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(dir.join("trendpost.log")) else {
        return;
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();
    info!(version = VERSION, "starting trendpost");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let mut app = App::new()?;
    // A stored session skips the login screen straight into the combined
    // load.
    if app.screen == Screen::Main {
        app.start_initial_load();
    }

    let Some(mut message_rx) = app.message_rx.take() else {
        return Ok(());
    };
    let mut events = EventStream::new();
    let mut ticker = interval(Duration::from_millis(250));

    while !app.should_quit {
        terminal.draw(|f| ui::render(f, &app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if key.kind == KeyEventKind::Press {
                            app.handle_key(key);
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }
            Some(msg) = message_rx.recv() => {
                app.handle_message(msg);
                // Drain anything else queued before the next draw.
                while let Ok(msg) = message_rx.try_recv() {
                    app.handle_message(msg);
                }
            }
            _ = ticker.tick() => {
                app.tick();
            }
        }
    }

    info!("shutting down");
    Ok(())
}
