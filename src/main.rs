//! update-chat-types CLI
//!
//! Entry point for the `update-chat-types` command-line tool.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use update_chat_types::logging::{self, Verbosity};
use update_chat_types::{ConfigOverrides, TreeUpdater, UpdaterConfig};

/// Insert or change the @Types header in each CHAT file, recursively,
/// according to the 0types.txt in the same directory.
///
/// Fails without touching any file if some 0types.txt is malformed.
#[derive(Parser)]
#[command(name = "update-chat-types")]
#[command(version)]
struct Cli {
    /// CHAT root dir
    #[arg(long, value_name = "DIR")]
    chatdir: PathBuf,

    /// Path to a TOML config file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Override file name (default: 0types.txt)
    #[arg(long, value_name = "NAME")]
    override_file: Option<String>,

    /// Extension of files to update, without the dot (default: cha)
    #[arg(long, value_name = "EXT")]
    extension: Option<String>,

    /// Directory name patterns to skip (default: .git); repeatable
    #[arg(long, value_name = "PATTERN")]
    exclude: Option<Vec<String>>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Log every ownership decision and skipped file
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(Verbosity::from_flags(cli.verbose, cli.quiet)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    let updater = match TreeUpdater::new(config) {
        Ok(u) => u,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let report = match updater.run(&cli.chatdir) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if cli.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        print!("{}", report.to_human());
    }
}

fn load_config(cli: &Cli) -> Result<UpdaterConfig, update_chat_types::ConfigError> {
    UpdaterConfig::load(cli.config.as_deref())?.with_overrides(ConfigOverrides {
        override_file_name: cli.override_file.clone(),
        target_extension: cli.extension.clone(),
        excluded_dirs: cli.exclude.clone(),
    })
}
