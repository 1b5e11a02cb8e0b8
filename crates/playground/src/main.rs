//! Playground - terminal portfolio
//!
//! Boot animation, a one-line command prompt, project cards and a detail panel.

mod app;
mod boot;
mod logging;
mod panel;
mod reload;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use playground_core::{Config, Paths, Registry, SourceFetcher};
use ratatui::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use app::App;
use boot::BootSequence;
use reload::Reloader;

#[derive(Parser)]
#[command(name = "playground")]
#[command(about = "Terminal portfolio playground with a command prompt and project panel")]
#[command(version)]
#[command(after_help = r#"EXAMPLES:
    playground                                  # Boot animation, then the prompt
    playground --no-boot                        # Straight to the prompt
    playground --data https://host/projects.json
    playground --data ./data/projects.json --dump

COMMANDS (typed at the prompt):
    help            List commands
    fun             Jump to Fun Builds
    playground      Jump to the top
    open <key>      Show a project in the detail panel
    repos           Reload project data
    clear           Clear feedback and prompt
    sudo make fun   Try it

KEY BINDINGS:
    Enter           Run the prompt / open the focused card
    Tab, Shift+Tab  Move focus (cycles inside the panel while it is open)
    PgUp, PgDn      Scroll the page
    Esc             Close the panel, or quit
    Ctrl+C          Quit

DATA:
    The data source is an http(s) URL or a local path holding either a JSON
    array of projects or {"projects": [...], "source": "...", "generated_at": "..."}.
    Any failure falls back to the built-in project table.
    Precedence: --data, then $PLAYGROUND_DATA, then the config file."#)]
struct Args {
    /// Project data source (http(s) URL, file:// URL or path)
    #[arg(short, long)]
    data: Option<String>,

    /// Config file (default: ~/.config/playground/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the boot animation
    #[arg(long)]
    no_boot: bool,

    /// Load project data once, print it as JSON and exit
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let paths = Paths::new();

    let config = load_config(&args, &paths.config_file())?;

    if args.dump {
        logging::init_stderr();
        return dump(&config);
    }

    logging::init_file(&paths.log_file())?;
    info!(source = %config.data_source, "starting playground");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let reloader = Reloader::new(
        runtime.handle().clone(),
        Arc::new(SourceFetcher::new()),
        config.data_source.clone(),
    );
    let boot = if args.no_boot || !config.boot_animation {
        BootSequence::finished()
    } else {
        BootSequence::new()
    };
    let mut app = App::new(reloader, boot);
    app.start_reload(false);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(config.tick_rate_ms.max(1));
    let result = run_app(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }

    // In-flight fetches have nothing left to report to
    runtime.shutdown_background();
    Ok(())
}

/// Config file, then environment, then flags
fn load_config(args: &Args, default_path: &Path) -> Result<Config> {
    let path = args.config.as_deref().unwrap_or(default_path);
    let mut config = Config::load(path)?.with_env();
    if let Some(data) = &args.data {
        config.data_source = data.clone();
    }
    Ok(config)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, tick_rate: Duration) -> Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Print the resolved registry for scripting and debugging
fn dump(config: &Config) -> Result<()> {
    let mut registry = Registry::new();
    let outcome = registry.reload(&SourceFetcher::new(), &config.data_source);
    info!(?outcome, "dump reload finished");

    let json = serde_json::to_string_pretty(&registry).context("Failed to serialize registry")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["playground", "--data", "x.json", "--no-boot"]);
        assert_eq!(args.data.as_deref(), Some("x.json"));
        assert!(args.no_boot);
        assert!(!args.dump);
    }

    #[test]
    fn test_data_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "data_source": "from-file.json", "boot_animation": false }"#)
            .unwrap();

        let args = Args::parse_from(["playground", "--config", path.to_str().unwrap()]);
        let config = load_config(&args, Path::new("/nonexistent")).unwrap();
        assert!(!config.boot_animation);

        let args = Args::parse_from([
            "playground",
            "--config",
            path.to_str().unwrap(),
            "--data",
            "https://example.com/p.json",
        ]);
        let config = load_config(&args, Path::new("/nonexistent")).unwrap();
        assert_eq!(config.data_source, "https://example.com/p.json");
    }

    // The only test in this binary that sets the environment
    #[test]
    fn test_data_flag_overrides_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "data_source": "from-file.json" }"#).unwrap();
        let config_arg = path.to_str().unwrap();

        std::env::set_var(playground_core::config::DATA_ENV, "from-env.json");
        let env_only = load_config(
            &Args::parse_from(["playground", "--config", config_arg]),
            Path::new("/nonexistent"),
        );
        let with_flag = load_config(
            &Args::parse_from(["playground", "--config", config_arg, "--data", "from-flag.json"]),
            Path::new("/nonexistent"),
        );
        std::env::remove_var(playground_core::config::DATA_ENV);

        assert_eq!(env_only.unwrap().data_source, "from-env.json");
        assert_eq!(with_flag.unwrap().data_source, "from-flag.json");
    }

    #[test]
    fn test_args_verify() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
