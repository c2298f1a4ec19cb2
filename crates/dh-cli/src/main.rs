//! CLI frontend for the DH2e character sheet.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use dh_sheet::SheetConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "dh2e",
    about = "dh2e: a Dark Heresy 2nd Edition character sheet at the command line",
    version,
    propagate_version = true
)]
struct Cli {
    /// Character file
    #[arg(short, long, global = true, default_value = "character.json")]
    file: PathBuf,

    /// RNG seed for dice rolls
    #[arg(short, long, global = true, default_value = "42")]
    seed: u64,

    /// Write the chat log of this command (plain text for .txt, markdown otherwise)
    #[arg(long, global = true)]
    journal: Option<PathBuf>,

    /// Keep current wounds when an origin rolls a new maximum
    #[arg(long, global = true)]
    keep_wounds: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new character file
    New {
        /// Character name
        name: String,
    },

    /// Show the character sheet
    Show {
        /// Print the record as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Test a characteristic (roll d100 at or under it)
    Test {
        /// Characteristic key (ws, bs, s, t, ag, int, per, wp, fel, inf)
        characteristic: String,

        /// Modifier, -60 to +60 in steps of 10
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        modifier: String,
    },

    /// Attach an origin or tendency from a JSON file
    Attach {
        /// File holding `{"name", "type", "system"}`
        source: PathBuf,

        /// Characteristic generation for an origin: generate or pointbuy
        #[arg(short, long)]
        mode: Option<String>,

        /// Point-buy spending, e.g. `ws=15,ag=10`
        #[arg(short, long, value_delimiter = ',')]
        alloc: Vec<String>,
    },

    /// Remove an attachment by name or id
    Remove {
        /// Attachment name (case-insensitive) or id prefix
        attachment: String,
    },

    /// Roll initiative (1d10 + Agility bonus)
    Initiative,

    /// Type a value into the sheet (wounds.current, fate.maximum, ag, ...)
    Edit {
        /// Track path or characteristic key
        field: String,

        /// Raw value, coerced the way the sheet does
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = SheetConfig::default()
        .with_seed(cli.seed)
        .with_wound_current_sync(!cli.keep_wounds);
    let ctx = commands::Context {
        file: cli.file,
        journal: cli.journal,
        config,
    };

    let result = match cli.command {
        Commands::New { name } => commands::new::run(&ctx, &name),
        Commands::Show { json } => commands::show::run(&ctx, json).await,
        Commands::Test {
            characteristic,
            modifier,
        } => commands::test::run(&ctx, &characteristic, &modifier).await,
        Commands::Attach {
            source,
            mode,
            alloc,
        } => commands::attach::run(&ctx, &source, mode.as_deref(), &alloc).await,
        Commands::Remove { attachment } => commands::remove::run(&ctx, &attachment).await,
        Commands::Initiative => commands::initiative::run(&ctx).await,
        Commands::Edit { field, value } => commands::edit::run(&ctx, &field, &value).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
