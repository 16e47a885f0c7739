//! AlphaScreen CLI: technical stock screener.
//!
//! Commands:
//! - `screen`: score and rank tickers (arguments, `--tickers-list`, favorites, or config)
//! - `favorites list|add|remove`: manage the favorites file
//! - `config`: print the effective screen configuration as TOML

mod logging;
mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use alphascreen_core::data::{CircuitBreaker, DataProvider, SyntheticProvider, YahooProvider};
use alphascreen_runner::{
    add_favorite, export_json, parse_tickers, remove_favorite, run_screen, write_export,
    FavoritesStore, JsonFavoritesStore, ScreenConfig, ScreenError,
};

use crate::logging::{init_logging, LogFormat};

#[derive(Parser)]
#[command(
    name = "alphascreen",
    version,
    about = "AlphaScreen: score and rank stocks by technical indicators"
)]
struct Cli {
    /// Log output format (logs go to stderr).
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen tickers and print the ranked table.
    Screen {
        /// Tickers to screen (e.g. AAPL MSFT). Commas are accepted too.
        tickers: Vec<String>,

        /// Comma-separated ticker list, e.g. "aapl, msft".
        #[arg(long)]
        tickers_list: Option<String>,

        /// Screen the saved favorites instead of explicit tickers.
        ///
        /// Favorites are stored as a set and screened in alphabetical order,
        /// so equal scores rank alphabetically.
        #[arg(long, default_value_t = false, conflicts_with_all = ["tickers", "tickers_list"])]
        favorites: bool,

        /// Favorites file. Defaults to the user config directory.
        #[arg(long)]
        favorites_file: Option<PathBuf>,

        /// Path to a TOML screen config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Use deterministic synthetic data instead of Yahoo Finance.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Write the ranked table to a .csv or .json file.
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print the ranked table as JSON instead of text tables.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Maximum tickers fetched concurrently.
        #[arg(long)]
        concurrency: Option<usize>,

        /// Rows in the strong-buy and strong-sell views.
        #[arg(long)]
        top_n: Option<usize>,

        /// Minimum number of complete daily bars.
        #[arg(long)]
        min_bars: Option<usize>,

        /// Minimum latest close.
        #[arg(long)]
        price_floor: Option<f64>,
    },
    /// Manage favorite tickers.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,

        /// Favorites file. Defaults to the user config directory.
        #[arg(long, global = true)]
        file: Option<PathBuf>,
    },
    /// Print the effective screen configuration as TOML.
    Config {
        /// Path to a TOML screen config.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List saved favorites.
    List,
    /// Add a ticker.
    Add { ticker: String },
    /// Remove a ticker.
    Remove { ticker: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    match cli.command {
        Commands::Screen {
            tickers,
            tickers_list,
            favorites,
            favorites_file,
            config,
            synthetic,
            export,
            json,
            concurrency,
            top_n,
            min_bars,
            price_floor,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(n) = concurrency {
                config.max_concurrency = n;
            }
            if let Some(n) = top_n {
                config.top_n = n;
            }
            if let Some(n) = min_bars {
                config.min_bars = n;
            }
            if let Some(floor) = price_floor {
                config.price_floor = floor;
            }
            config.validate()?;

            let requested = if favorites {
                let store = favorites_store(favorites_file)?;
                store.load()?.into_iter().collect()
            } else if !tickers.is_empty() || tickers_list.is_some() {
                let mut joined = tickers.join(",");
                if let Some(list) = tickers_list {
                    joined.push(',');
                    joined.push_str(&list);
                }
                parse_tickers(&joined)
            } else {
                config.tickers.clone()
            };

            run_screen_cmd(&requested, &config, synthetic, export.as_deref(), json)
        }
        Commands::Favorites { action, file } => {
            let store = favorites_store(file)?;
            run_favorites_cmd(&store, action)
        }
        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ScreenConfig> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            ScreenConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(ScreenConfig::default()),
    }
}

fn favorites_store(file: Option<PathBuf>) -> Result<JsonFavoritesStore> {
    let path = match file {
        Some(path) => path,
        None => dirs::config_dir()
            .context("no user config directory; pass --file")?
            .join("alphascreen")
            .join("favorites.json"),
    };
    Ok(JsonFavoritesStore::new(path))
}

fn run_screen_cmd(
    tickers: &[String],
    config: &ScreenConfig,
    synthetic: bool,
    export: Option<&Path>,
    json: bool,
) -> Result<()> {
    let provider: Box<dyn DataProvider> = if synthetic {
        Box::new(SyntheticProvider::new())
    } else {
        Box::new(YahooProvider::new(Arc::new(
            CircuitBreaker::default_provider(),
        ))?)
    };

    let report = match run_screen(tickers, provider.as_ref(), config) {
        Ok(report) => report,
        Err(ScreenError::EmptyRequest) => {
            bail!("no tickers to screen; pass tickers, --tickers-list, or --favorites")
        }
        Err(ScreenError::NoValidData { rejected }) => {
            println!("No valid data: none of the {} ticker(s) could be screened.", rejected.len());
            report::print_rejections(&rejected);
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", export_json(&report.ranking)?);
    } else {
        report::print_report(&report);
    }

    if let Some(path) = export {
        let format = write_export(path, &report.ranking)?;
        tracing::info!(
            rows = report.ranking.len(),
            path = %path.display(),
            ?format,
            "exported ranking"
        );
    }

    Ok(())
}

fn run_favorites_cmd(store: &JsonFavoritesStore, action: FavoritesAction) -> Result<()> {
    match action {
        FavoritesAction::List => {
            let favorites = store.load()?;
            if favorites.is_empty() {
                println!("No favorites saved ({}).", store.path().display());
            }
            for ticker in favorites {
                println!("{ticker}");
            }
        }
        FavoritesAction::Add { ticker } => {
            if add_favorite(store, &ticker)? {
                println!("Added {} to favorites.", ticker.trim().to_uppercase());
            } else {
                println!("{} is already a favorite.", ticker.trim().to_uppercase());
            }
        }
        FavoritesAction::Remove { ticker } => {
            if remove_favorite(store, &ticker)? {
                println!("Removed {} from favorites.", ticker.trim().to_uppercase());
            } else {
                println!("{} is not a favorite.", ticker.trim().to_uppercase());
            }
        }
    }
    Ok(())
}
