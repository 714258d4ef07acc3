//! gameshelf - Find, organize and launch the games installed on this machine.
//!
//! Usage:
//!   gameshelf scan               Discover games and list them
//!   gameshelf add-dir DIR        Scan one directory for games
//!   gameshelf favorites          List favorites
//!   gameshelf deleted            List hidden games
//!   gameshelf favorite PATH      Star or unstar a game
//!   gameshelf hide PATH          Hide a game from future scans
//!   gameshelf restore PATH       Un-hide a game
//!   gameshelf launch PATH        Launch a game
//!   gameshelf roots              Show the directories a scan visits
//!   gameshelf --help             Show help

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, bail};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use gameshelf_core::resolve_name;
use gameshelf_library::{
    FavoriteToggle, GameEntry, Library, LibraryStats, ScanEvent, ScanOrchestrator, ScanWarning,
    Settings,
};
use gameshelf_scan::GameScanner;

#[derive(Parser)]
#[command(
    name = "gameshelf",
    version,
    about = "Find, organize and launch the games installed on this machine",
    long_about = "gameshelf scans well-known install locations, your desktop and any \
                  folders you add for game executables, and remembers which ones you \
                  starred or hid."
)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding favorites and hidden games
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a full discovery pass and list the games found
    Scan {
        /// Extra directory to deep-scan and merge after the pass
        #[arg(long = "add", value_name = "DIR")]
        add: Vec<PathBuf>,

        /// Skip installed-software sources such as Steam
        #[arg(long)]
        no_inventory: bool,

        /// Only list games whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Scan a single directory for games
    AddDir {
        dir: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// List favorites
    Favorites {
        #[arg(long)]
        json: bool,
    },

    /// List hidden games
    Deleted {
        #[arg(long)]
        json: bool,
    },

    /// Star a game, or unstar it if already starred
    Favorite {
        path: PathBuf,

        /// Display name (derived from the path when unknown)
        #[arg(long)]
        name: Option<String>,
    },

    /// Hide a game from the list and from future scans
    Hide {
        path: PathBuf,

        #[arg(long)]
        name: Option<String>,
    },

    /// Un-hide a game
    Restore { path: PathBuf },

    /// Launch a game
    Launch { path: PathBuf },

    /// Show the directories a full pass would visit
    Roots,
}

#[derive(Serialize)]
struct ScanOutput<'a> {
    games: &'a [GameEntry],
    stats: LibraryStats,
    warnings: &'a [ScanWarning],
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    if let Some(dir) = cli.data_dir {
        settings.data_dir = Some(dir);
    }

    match cli.command {
        Command::Scan {
            add,
            no_inventory,
            search,
            json,
        } => {
            if no_inventory {
                settings.discovery.include_inventory = false;
            }
            run_scan(&settings, &add, search.as_deref(), json).await?;
        }
        Command::AddDir { dir, json } => {
            run_add_dir(&settings, &dir, json).await?;
        }
        Command::Favorites { json } => {
            let library = Library::from_settings(&settings);
            print_games(&library.favorites(), json)?;
        }
        Command::Deleted { json } => {
            let library = Library::from_settings(&settings);
            print_games(library.deleted(), json)?;
        }
        Command::Favorite { path, name } => {
            let mut library = Library::from_settings(&settings);
            let entry = lookup(&library, &path, name);
            match library.toggle_favorite(&entry)? {
                FavoriteToggle::Added => println!("Starred {}", entry.name),
                FavoriteToggle::Removed => println!("Unstarred {}", entry.name),
            }
        }
        Command::Hide { path, name } => {
            let mut library = Library::from_settings(&settings);
            let entry = lookup(&library, &path, name);
            library.delete(&entry)?;
            println!("Hid {}", entry.name);
        }
        Command::Restore { path } => {
            let mut library = Library::from_settings(&settings);
            let entry = library.restore(&path)?;
            println!("Restored {}", entry.name);
        }
        Command::Launch { path } => {
            let library = Library::from_settings(&settings);
            library.launch(&path)?;
        }
        Command::Roots => {
            let scanner = GameScanner::new(settings.discovery.clone());
            for root in scanner.roots() {
                println!("{:<8} {}", root.mode, root.path.display());
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run a full pass in the background, then merge any extra directories.
async fn run_scan(
    settings: &Settings,
    add: &[PathBuf],
    search: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut library = Library::from_settings(settings);
    let orchestrator = ScanOrchestrator::new(settings.discovery.clone());
    let show_progress = !json && std::io::stderr().is_terminal();

    let Some(mut events) = orchestrator.start_scan(library.deleted().to_vec()) else {
        bail!("A scan is already running");
    };

    let mut warnings = Vec::new();
    while let Some(event) = events.recv().await {
        match event {
            ScanEvent::Progress(progress) => {
                if show_progress {
                    eprintln!(
                        "[{:>3.0}%] {}",
                        progress.fraction() * 100.0,
                        progress.status_line()
                    );
                }
            }
            ScanEvent::Completed(outcome) => {
                library.apply_outcome(&outcome);
                warnings = outcome.report.warnings;
            }
            ScanEvent::Failed(message) => bail!("Scan failed: {message}"),
        }
    }

    for dir in add {
        let found = orchestrator
            .scan_directory(dir.clone())
            .await
            .with_context(|| format!("Failed to scan {}", dir.display()))?;
        warnings.extend(found.warnings);
        library.merge(found.candidates);
    }

    let games = match search {
        Some(query) => library.search(query),
        None => library.games().to_vec(),
    };

    if json {
        let output = ScanOutput {
            games: &games,
            stats: library.stats(),
            warnings: &warnings,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_games(&games, false)?;
        let stats = library.stats();
        println!();
        println!(
            " {} games, {} favorites, {} hidden",
            stats.games, stats.favorites, stats.deleted
        );
        if !warnings.is_empty() {
            println!(" {} warning(s) during scan", warnings.len());
        }
    }

    Ok(())
}

/// Scan one directory and list what it adds.
async fn run_add_dir(settings: &Settings, dir: &Path, json: bool) -> Result<()> {
    let mut library = Library::from_settings(settings);
    let orchestrator = ScanOrchestrator::new(settings.discovery.clone());

    let found = orchestrator
        .scan_directory(dir.to_path_buf())
        .await
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    let added = library.merge(found.candidates);
    tracing::debug!(added, "directory merged");
    if !json {
        println!("{}", added_message(added, dir));
    }
    print_games(library.games(), json)
}

/// Status line for an ad hoc directory scan.
fn added_message(added: usize, dir: &Path) -> String {
    let noun = if added == 1 { "game" } else { "games" };
    format!("Added {added} {noun} from {}", dir.display())
}

/// Find a known entry for `path`, or build one from the given or derived name.
fn lookup(library: &Library, path: &Path, name: Option<String>) -> GameEntry {
    if let Some(name) = name {
        return GameEntry::new(name, path);
    }
    if let Some(known) = library.find(path) {
        return known.clone();
    }

    let dir = path.parent().unwrap_or(Path::new(""));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    GameEntry::new(resolve_name(dir, &file_name), path)
}

fn print_games(games: &[GameEntry], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(games)?);
        return Ok(());
    }

    if games.is_empty() {
        println!(" No games found.");
        return Ok(());
    }

    let width = games
        .iter()
        .map(|g| g.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(40);
    for game in games {
        println!(" {:<width$}  {}", truncate(&game.name, 40), game.path.display());
    }
    Ok(())
}

/// Truncate a string to max length.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 1).collect();
        format!("{head}…")
    }
}
