use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::env;
use std::path::PathBuf;

mod apply;
mod edit;

const CONFIG_ENV: &str = "CARTE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "carte.json";

#[derive(Parser)]
#[command(name = "carte")]
#[command(about = "Customize context menus: edit the configuration, try it on a menu", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (overrides CARTE_CONFIG, default ./carte.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the built-in default configuration
    Default,

    /// Check that a configuration file parses and is valid
    Validate {
        /// File to check
        file: PathBuf,
    },

    /// Print the effective configuration (stored, or the built-in default)
    Show,

    /// Always hide entries with this title
    Hide { title: String },

    /// Stop hiding entries with this title
    Unhide { title: String },

    /// Add or remove item rules
    #[command(subcommand)]
    Rule(RuleCommand),

    /// Turn trace output on or off
    Debug {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Run the engine over a menu fixture and print the result
    Apply(apply::ApplyArgs),
}

#[derive(Subcommand)]
enum RuleCommand {
    /// Add a rule, replacing one with the same key and package
    Add {
        /// Entry title to match
        #[arg(long)]
        key: String,

        /// Replacement title
        #[arg(long)]
        label: String,

        /// Only match entries launching into this package
        #[arg(long)]
        package: Option<String>,

        /// Suppress matching entries
        #[arg(long)]
        disabled: bool,
    },

    /// Remove rules for a key (and package)
    Remove {
        #[arg(long)]
        key: String,

        #[arg(long)]
        package: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Toggle {
    On,
    Off,
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .clone()
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // JSON output mode keeps stderr down to warnings and trace lines
    let json = matches!(&cli.command, Commands::Apply(args) if args.json);

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet || json {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    if json && !cli.quiet {
        builder.filter_module(carte_engine::TRACE_TARGET, log::LevelFilter::Info);
    }
    builder.target(env_logger::Target::Stderr).init();

    let path = config_path(&cli);
    log::debug!("Using configuration {}", path.display());

    match cli.command {
        Commands::Default => edit::print_default()?,
        Commands::Validate { file } => edit::validate(&file)?,
        Commands::Show => edit::show(&path)?,
        Commands::Hide { title } => edit::hide(&path, &title)?,
        Commands::Unhide { title } => edit::unhide(&path, &title)?,
        Commands::Rule(RuleCommand::Add {
            key,
            label,
            package,
            disabled,
        }) => edit::add_rule(&path, key, label, package, disabled)?,
        Commands::Rule(RuleCommand::Remove { key, package }) => {
            edit::remove_rule(&path, &key, package.as_deref())?
        }
        Commands::Debug { state } => edit::set_debug(&path, matches!(state, Toggle::On))?,
        Commands::Apply(args) => apply::run(&path, args)?,
    }

    Ok(())
}
