//! MatrixTerm - An interactive portfolio shell over a live digital rain
//!
//! Parses the command line, sets up logging, loads the configuration and
//! opens the window.

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Context};
use eframe::egui;
use tracing::{debug, error, info, warn};

use matrixterm::config::{Config, CONFIG_ENV_VAR};
use matrixterm::models::Theme;
use matrixterm::ui::MatrixTermApp;

/// Enables debug logging when set to `1` or `true`
const DEBUG_ENV_VAR: &str = "MATRIXTERM_DEBUG";

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug logging
    debug: bool,
    /// Window width
    width: Option<f32>,
    /// Window height
    height: Option<f32>,
    /// Initial theme
    theme: Option<String>,
    help: bool,
    version: bool,
}

impl AppArgs {
    /// Parse the process arguments
    fn parse() -> anyhow::Result<Self> {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse arguments, excluding the program name
    fn parse_from<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut app_args = AppArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().context("Missing config file path")?;
                    app_args.config_path = Some(PathBuf::from(path));
                }
                "--debug" | "-d" => app_args.debug = true,
                "--width" | "-w" => {
                    app_args.width = Some(parse_size(&arg, args.next())?);
                }
                "--height" | "-h" => {
                    app_args.height = Some(parse_size(&arg, args.next())?);
                }
                "--theme" | "-t" => {
                    app_args.theme = Some(args.next().context("Missing theme name")?);
                }
                "--help" | "-?" => app_args.help = true,
                "--version" | "-v" => app_args.version = true,
                other if other.starts_with('-') => {
                    return Err(anyhow!("Unknown option: {}", other));
                }
                other => warn!("Ignoring positional argument: {}", other),
            }
        }

        Ok(app_args)
    }
}

fn parse_size(option: &str, value: Option<String>) -> anyhow::Result<f32> {
    let value = value.with_context(|| format!("Missing value for {}", option))?;
    value
        .parse::<f32>()
        .ok()
        .filter(|size| *size > 0.0)
        .with_context(|| format!("Invalid value for {}: {}", option, value))
}

/// Print help information
fn print_help() {
    println!("MatrixTerm - An interactive portfolio shell over a live digital rain");
    println!();
    println!("USAGE:");
    println!("    matrixterm [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Path to configuration file (TOML or JSON)");
    println!("    -d, --debug            Enable debug logging");
    println!("    -w, --width <WIDTH>    Initial window width");
    println!("    -h, --height <HEIGHT>  Initial window height");
    println!("    -t, --theme <THEME>    Initial theme (dark, light)");
    println!("    -?, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    MatrixTerm looks for configuration files in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. ${}", CONFIG_ENV_VAR);
    println!("    3. <config dir>/matrixterm/config.toml (or config.json)");
    println!("    4. ~/.matrixterm/config.toml (or config.json)");
    println!("    5. Built-in defaults");
    println!();
    println!("KEYS:");
    println!("    Enter / Up / Down / Tab    Run, recall, complete");
    println!("    Ctrl+C / Ctrl+L            Clear input / clear screen");
    println!("    Ctrl+Shift+T               Toggle theme");
    println!("    Ctrl+Shift+E               Export session to JSON");
    println!();
    println!("ENVIRONMENT:");
    println!("    {}      Path to configuration file", CONFIG_ENV_VAR);
    println!("    {}       Enable debug mode (1 or true)", DEBUG_ENV_VAR);
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

fn init_logging(debug: bool) {
    let debug = debug
        || env::var(DEBUG_ENV_VAR).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let log_level = if debug { "debug" } else { "info" };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = match AppArgs::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_help();
            process::exit(1);
        }
    };

    if args.help {
        print_help();
        return Ok(());
    }
    if args.version {
        println!("MatrixTerm v{}", matrixterm::VERSION);
        return Ok(());
    }

    init_logging(args.debug);
    info!("🚀 Starting MatrixTerm v{}", matrixterm::VERSION);
    debug!("Debug mode enabled");

    let config = load_configuration(&args)?;
    let native_options = create_native_options(&config);

    info!("🎨 Initializing GUI...");
    eframe::run_native(
        "MatrixTerm",
        native_options,
        Box::new(move |cc| create_application(cc, config)),
    )
    .map_err(|e| {
        error!("💥 Application failed: {}", e);
        anyhow!("Application failed: {}", e)
    })?;

    info!("👋 MatrixTerm shutdown complete");
    Ok(())
}

/// Load configuration and apply command line overrides
fn load_configuration(args: &AppArgs) -> anyhow::Result<Config> {
    info!("⚙️  Loading configuration...");

    let mut config = match &args.config_path {
        Some(path) => matrixterm::init_with_config(path).map_err(|e| {
            let message = matrixterm::handle_startup_error(&e);
            error!("{}", message);
            anyhow!(message)
        })?,
        None => matrixterm::init()?,
    };

    apply_overrides(&mut config, args);
    debug!("Configuration loaded successfully");
    Ok(config)
}

fn apply_overrides(config: &mut Config, args: &AppArgs) {
    if let Some(theme_name) = &args.theme {
        match Theme::parse(theme_name) {
            Some(theme) => {
                debug!("Applying theme override: {}", theme_name);
                config.terminal.default_theme = theme;
            }
            None => warn!(
                "Unknown theme '{}', keeping {}",
                theme_name,
                config.terminal.default_theme.as_str()
            ),
        }
    }
    if let Some(width) = args.width {
        config.ui.window_width = width;
    }
    if let Some(height) = args.height {
        config.ui.window_height = height;
    }
}

/// Create the application once the window exists
fn create_application(
    cc: &eframe::CreationContext<'_>,
    config: Config,
) -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
    info!("🏗️  Creating application...");
    let app = MatrixTermApp::new(cc, config)?;
    Ok(Box::new(app))
}

/// Create native options for the application window
fn create_native_options(config: &Config) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("MatrixTerm")
            .with_app_id("matrixterm")
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([400.0, 300.0])
            .with_resizable(true),
        renderer: eframe::Renderer::Glow,
        ..Default::default()
    }
}
