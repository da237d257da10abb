use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use rs_webmail::config::{load_config, resolve_db_path};
use rs_webmail::domain::mail::Mail;
use rs_webmail::store::repo::MailStore;
use rs_webmail::store::sqlite::SqliteStore;
use rs_webmail::terminal::run_tui;

#[derive(Parser)]
#[command(name = "rs_webmail")]
#[command(about = "Webmail list view (local cache + TUI)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the TUI (reads from the local cache)
    Tui {
        /// Start location, e.g. https://mail.example/#/inbox/mail/42
        #[arg(long)]
        url: Option<String>,

        /// Folder to open when no URL names one
        #[arg(long)]
        tag: Option<String>,
    },

    /// Load mails from a JSON file into the local cache
    Seed { file: std::path::PathBuf },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;
    let db_path = resolve_db_path(&cfg)?;
    let mut store = SqliteStore::open(&db_path)?;

    match cli.cmd {
        Command::Tui { url, tag } => {
            let tag = tag.unwrap_or_else(|| cfg.default_tag.clone());
            let url = url.or_else(|| cfg.start_url.clone());
            run_tui(&mut store, &tag, url.as_deref())
        }

        Command::Seed { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let mails: Vec<Mail> = serde_json::from_str(&raw)?;
            store.upsert_mails(&mails)?;
            println!("Stored {} mails in {}", mails.len(), db_path.display());
            Ok(())
        }
    }
}
