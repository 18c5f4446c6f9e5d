//! Rolodex CLI - serve and inspect the contacts directory

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use rolodex::config::{self, RolodexConfig};
use rolodex::ui::{contacts_table, Icons};
use rolodex::{AddressBook, ContactStore};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "rolodex")]
#[command(version)]
#[command(about = "Contacts directory service - SQLite-backed CRUD over HTTP/JSON")]
#[command(long_about = r#"
Rolodex keeps a directory of contacts, unique by first and last name, and
serves it over a small JSON API:
  GET    /contacts
  POST   /contacts
  PUT    /contacts/{first_name}/{last_name}
  DELETE /contacts/{first_name}/{last_name}

Example usage:
  rolodex init
  rolodex serve --port 5000
  rolodex list --json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./rolodex.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Print every stored contact
    List {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn open_book(config: &RolodexConfig, database: Option<PathBuf>) -> anyhow::Result<AddressBook> {
    let path = config.database_path(database);
    config::ensure_db_dir(&path)?;
    let store = ContactStore::open(&path)?;
    Ok(AddressBook::new(store))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Serve { database, host, port } => {
            let addr = config.bind_addr(host, port)?;
            let book = open_book(&config, database)?;

            println!("{} Database: {:?}", Icons::DATABASE, book.store().path());
            rolodex::server::start_server(addr, book).await?;
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &RolodexConfig::with_defaults(), force)?;
            println!("{} Wrote {}", Icons::CHECK, path.display());
        }

        Commands::List { database, json } => {
            let book = open_book(&config, database)?;
            let contacts = book.load_contacts()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&contacts)?);
            } else if contacts.is_empty() {
                println!("{} No contacts found.", Icons::EMPTY);
            } else {
                println!("{} {} contacts", Icons::BOOK, contacts.len());
                println!("{}", contacts_table(&contacts));
            }
        }
    }

    Ok(())
}
