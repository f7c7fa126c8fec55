//! Command-line entry point.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{
    Args,
    Parser,
    Subcommand,
};
use menu_kit::config::{
    ConfigManager,
    Settings,
};
use menu_kit::locale;
use menu_kit::menu::MenuFetcher;
use tracing_subscriber::EnvFilter;

/// Locale aggregation and menu fetching.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to `.menu-kit.json` in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Merge the translation files and print them as JSON
    Locales(LocalesArgs),
    /// Fetch the priced menu and print it as JSON
    Menu(MenuArgs),
}

/// Merge the translation files and print them as JSON
#[derive(Debug, Args)]
struct LocalesArgs {
    /// Locales directory
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Include subdirectories
    #[arg(long)]
    recursive: bool,

    /// Print only the available locale keys, one per line
    #[arg(long)]
    keys_only: bool,
}

/// Fetch the priced menu and print it as JSON
#[derive(Debug, Args)]
struct MenuArgs {
    /// Always go to the network and leave the store untouched
    #[arg(long)]
    no_cache: bool,

    /// JSON file backing the cache
    #[arg(long)]
    store: Option<PathBuf>,

    /// Recipe API endpoint
    #[arg(long)]
    endpoint: Option<String>,
}

/// Parse flags, set up logging, load settings and run the subcommand.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).init();

    let mut config_manager = ConfigManager::new();
    match &cli.config {
        Some(path) => config_manager
            .load_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("resolving the working directory")?;
            config_manager.load_settings(Some(&cwd)).context("loading settings")?;
        }
    }

    match cli.command {
        Command::Locales(args) => run_locales(&mut config_manager, args),
        Command::Menu(args) => run_menu(&mut config_manager, args).await,
    }
}

/// `locales`: build the process-wide table and print it.
fn run_locales(config_manager: &mut ConfigManager, args: LocalesArgs) -> anyhow::Result<()> {
    let mut settings: Settings = config_manager.get_settings().clone();
    if let Some(dir) = args.dir {
        settings.locales.dir = dir;
    }
    settings.locales.recursive |= args.recursive;
    config_manager.update_settings(settings).context("invalid locale options")?;

    let locale_settings = &config_manager.get_settings().locales;
    let messages = locale::init(locale_settings)
        .with_context(|| format!("aggregating locales in {}", locale_settings.dir.display()))?;

    let mut stdout = std::io::stdout().lock();
    if args.keys_only {
        for key in locale::available_locales() {
            writeln!(stdout, "{key}")?;
        }
    } else {
        serde_json::to_writer_pretty(&mut stdout, messages)?;
        writeln!(stdout)?;
    }

    Ok(())
}

/// `menu`: fetch the menu as configured and print it.
async fn run_menu(config_manager: &mut ConfigManager, args: MenuArgs) -> anyhow::Result<()> {
    let mut settings: Settings = config_manager.get_settings().clone();
    if args.no_cache {
        settings.menu.cache_enabled = false;
    }
    if let Some(store) = args.store {
        settings.menu.store_path = store;
    }
    if let Some(endpoint) = args.endpoint {
        settings.menu.endpoint = endpoint;
    }
    config_manager.update_settings(settings).context("invalid menu options")?;

    let fetcher = MenuFetcher::from_settings(&config_manager.get_settings().menu)
        .context("building the HTTP client")?;
    let items = fetcher.fetch_menu_items().await;
    tracing::info!(count = items.len(), cached = fetcher.cache_enabled(), "Menu ready");

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &items)?;
    writeln!(stdout)?;

    Ok(())
}
