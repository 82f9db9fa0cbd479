mod app;
mod cli;
mod infra;
mod modules;
mod state;
mod ui;

use std::io;
use std::path::Path;
use std::process::ExitCode;

use crossterm::{
    ExecutableCommand,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::{error, info};

use pc_base::PromptClient;
use pc_base::config::{ConsoleConfig, default_config_path};
use pc_base::constants::{ERRORS_DIR, STORE_DIR};
use pc_base::{prompt, theme};

use app::App;
use state::State;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match cli::parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, cli::USAGE);
            return ExitCode::from(2);
        }
    };
    if args.help {
        println!("{}", cli::USAGE);
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    // `/greet` and `greet` name the same route
    let start_path = args.path.as_deref().map(|p| p.trim_start_matches('/').to_string());
    if let Some(path) = &start_path
        && let Err(e) = prompt::validate_path(path)
    {
        eprintln!("{}: {}", path, e);
        return ExitCode::from(2);
    }

    theme::set_active_theme(&config.theme);

    if let Err(e) = infra::logging::init(&config.log_filter) {
        eprintln!("Logging disabled: {}", e);
    }

    let client = match PromptClient::new(&config.base_url, config.timeout()) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to build HTTP client");
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    install_panic_hook();

    match run_tui(client, &config, start_path.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "terminal error");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Defaults, then the YAML file, then `.env` and the environment, then `--url`
fn load_config(args: &cli::CliArgs) -> Result<ConsoleConfig, pc_base::config::ConfigError> {
    let path = args.config.clone().unwrap_or_else(default_config_path);
    let mut config = ConsoleConfig::load(&path)?;

    let _ = dotenvy::dotenv();
    config.apply_env(|key| std::env::var(key).ok())?;

    if let Some(url) = &args.url {
        config.base_url = url.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Restore the terminal and log the panic to disk before the default hook runs
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();

        let error_dir = Path::new(STORE_DIR).join(ERRORS_DIR);
        let _ = std::fs::create_dir_all(&error_dir);
        let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let backtrace = std::backtrace::Backtrace::force_capture();
        let msg = format!("[{}] {}\n\n{}\n\n---\n", ts, info, backtrace);
        let log_path = error_dir.join("panic.log");
        let _ = std::fs::OpenOptions::new().create(true).append(true).open(&log_path).and_then(|mut f| {
            use std::io::Write;
            f.write_all(msg.as_bytes())
        });

        default_hook(info);
    }));
}

fn run_tui(client: PromptClient, config: &ConsoleConfig, start_path: Option<&str>) -> io::Result<()> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    info!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "starting console");
    let mut app = App::new(State::new(config.base_url.clone()), client);
    app.start(start_path);
    let result = app.run(&mut terminal);

    // Cleanup
    restore_terminal()?;
    result
}

/// Undo every terminal mode even when one step fails; reports the first failure
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let paste = io::stdout().execute(DisableBracketedPaste).map(|_| ());
    let screen = io::stdout().execute(LeaveAlternateScreen).map(|_| ());
    raw.and(paste).and(screen)
}
