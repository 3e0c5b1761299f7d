use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, MouseButton, MouseEventKind};
use crossterm::execute;
use frosttop::action::Action;
use frosttop::app::App;
use frosttop::config;
use frosttop::event::{Event, EventHandler};
use frosttop::metrics::MetricsProvider;
use frosttop::metrics::mock::MockProvider;
use frosttop::metrics::system::SystemProvider;
use frosttop::system::control::SysControl;
use frosttop::ui;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "frosttop",
    about = "TUI system-telemetry dashboard with GPU metrics and process control"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh interval in milliseconds
    #[arg(long)]
    refresh_interval: Option<u64>,

    /// Use the deterministic mock metrics provider
    #[arg(long, default_value_t = false)]
    mock: bool,

    /// Seed for the mock provider and tick jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Append diagnostics to this file (the terminal belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut config = match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };
    if let Some(interval) = cli.refresh_interval {
        config.general.refresh_interval_ms = interval;
    }

    let mut provider: Box<dyn MetricsProvider> = if cli.mock {
        Box::new(MockProvider::new(
            cli.seed.unwrap_or(0),
            config.general.gpu_history_length,
            config.general.max_processes.min(50),
        ))
    } else {
        Box::new(SystemProvider::new(config.general.max_processes))
    };
    provider.init()?;

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config, provider, cli.seed).await;

    execute!(stdout(), DisableMouseCapture)?;
    ratatui::restore();

    result
}

async fn run(
    terminal: &mut ratatui::DefaultTerminal,
    config: config::ProfileConfiguration,
    provider: Box<dyn MetricsProvider>,
    seed: Option<u64>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(config.general.refresh_interval_ms);
    let mut app = App::new(config, provider, Box::new(SysControl::new()));
    let mut events = EventHandler::new(tick_rate, seed);

    // First frame before the first tick lands.
    app.on_tick();
    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Moved => {
                        app.dispatch(Action::PointerMove(mouse.column, mouse.row));
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        app.dispatch(Action::PointerClick(mouse.column, mouse.row));
                    }
                    _ => {}
                },
                Event::Tick => {
                    app.on_tick();
                }
                Event::Resize => {
                    let size = terminal.size()?;
                    app.on_resize(size.width, size.height);
                }
            }
            terminal.draw(|frame| ui::draw(frame, &mut app))?;
        }
    }

    app.shutdown();
    Ok(())
}

fn init_logging(path: &std::path::Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
