mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{EXIT_CATALOG_ERROR, EXIT_CONFIG_ERROR, EXIT_FAILURE};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "offgrid",
    version,
    about = "Download and disk-space budgeting for offline hotspot content images"
)]
struct Cli {
    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the space budget for a configuration.
    Estimate {
        /// Path to configuration TOML file.
        #[arg(default_value = "offgrid.toml")]
        config: PathBuf,
        /// Path to the static contents catalog (JSON).
        #[arg(long, default_value = "contents.json")]
        contents: PathBuf,
        /// Package catalog (JSON); repeatable, priority order.
        #[arg(long = "catalog")]
        catalogs: Vec<PathBuf>,
        /// Download cache folder, consulted read-only.
        #[arg(long, default_value = "cache")]
        cache: PathBuf,
        /// Skip the media-alignment hardware margin on the image size.
        #[arg(long, default_value_t = false)]
        no_media_margin: bool,
    },
    /// Check a configuration file without computing anything.
    Validate {
        /// Path to configuration TOML file.
        #[arg(default_value = "offgrid.toml")]
        config: PathBuf,
    },
    /// List package ids resolvable from the given catalogs.
    Packages {
        /// Package catalog (JSON); repeatable, priority order.
        #[arg(long = "catalog", required = true)]
        catalogs: Vec<PathBuf>,
    },
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
    /// Generate man pages in the specified directory.
    ManPages {
        /// Output directory for man pages.
        #[arg(default_value = "man")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("OFFGRID_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let json_output = cli.json;

    let result = match cli.command {
        Commands::Estimate {
            config,
            contents,
            catalogs,
            cache,
            no_media_margin,
        } => commands::estimate::run(
            &config,
            &contents,
            &catalogs,
            &cache,
            no_media_margin,
            json_output,
        ),
        Commands::Validate { config } => commands::validate::run(&config, json_output),
        Commands::Packages { catalogs } => commands::packages::run(&catalogs, json_output),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
        Commands::ManPages { dir } => commands::man_pages::run::<Cli>(&dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("config error:") {
                EXIT_CONFIG_ERROR
            } else if msg.starts_with("catalog error:") {
                EXIT_CATALOG_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
