//! Exchange binary entry point
//!
//! Drives the same page controllers the front end uses, from a terminal.

use clap::{Parser, Subcommand};

use exchange::{
    BookSearch, ConfirmOutcome, ConfirmationController, ExchangeError, ExchangeResult, LookupOutcome,
    TransactionDraft,
    core::{AdBanner, codec},
    services::{RealBackendClient, RealMetadataLookup},
};
use shared::{BookRecord, ExchangeConfig, Navigation, PageId, TransactionKind, logging, page_error, page_info};

#[derive(Parser)]
#[command(name = "exchange")]
#[command(about = "Campus textbook exchange: look up, donate and receive books")]
struct Args {
    /// Catalog base URL (overrides EXCHANGE_CATALOG_URL)
    #[arg(long)]
    catalog_url: Option<String>,

    /// Backend base URL (overrides EXCHANGE_BACKEND_URL)
    #[arg(long)]
    backend_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up a book by ISBN (or a scanned barcode value)
    Lookup { isbn: String },

    /// Search the catalog by title and/or author
    Search {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
    },

    /// Donate a book
    Donate {
        #[arg(long)]
        isbn: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        thumbnail: Option<String>,
        /// Agree to give up ownership of the book
        #[arg(long)]
        consent: bool,
    },

    /// Receive a book from the shelf
    Receive {
        #[arg(long)]
        isbn: String,
        #[arg(long)]
        title: Option<String>,
    },

    /// Pick a sponsor banner item for one page view
    Ad,
}

#[tokio::main]
async fn main() -> ExchangeResult<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    logging::init_tracing_with_level(Some(&args.log_level));

    let mut config = ExchangeConfig::from_env()?;
    if let Some(url) = args.catalog_url {
        config.catalog_url = checked_url("--catalog-url", url)?;
    }
    if let Some(url) = args.backend_url {
        config.backend_url = checked_url("--backend-url", url)?;
    }

    page_info!(PageId::Cli, "🚀 Catalog {} / backend {}", config.catalog_url, config.backend_url);

    match args.command {
        Command::Lookup { isbn } => lookup(&config, &isbn).await,
        Command::Search { title, author } => search(&config, &title, &author).await,
        Command::Donate {
            isbn,
            title,
            author,
            thumbnail,
            consent,
        } => {
            let mut draft = TransactionDraft::donate();
            draft.isbn = isbn.unwrap_or_default();
            draft.title = title.unwrap_or_default();
            draft.author = author.unwrap_or_default();
            draft.thumbnail = thumbnail.unwrap_or_default();
            transact(&config, draft, consent).await
        }
        Command::Receive { isbn, title } => {
            let mut draft = TransactionDraft::receive();
            draft.isbn = isbn;
            draft.title = title.unwrap_or_default();
            transact(&config, draft, false).await
        }
        Command::Ad => ad(&config),
    }
}

async fn lookup(config: &ExchangeConfig, isbn: &str) -> ExchangeResult<()> {
    let catalog = RealMetadataLookup::from_config(config)?;
    let mut draft = TransactionDraft::donate();

    match draft.capture(isbn, &catalog).await {
        LookupOutcome::Populated => print_book(&draft.book()),
        LookupOutcome::Failed(failure) => return Err(failure.into()),
        LookupOutcome::NotFound | LookupOutcome::Skipped => {
            println!("{}", draft.search_error().unwrap_or("Nothing to look up."));
        }
    }
    Ok(())
}

async fn search(config: &ExchangeConfig, title: &str, author: &str) -> ExchangeResult<()> {
    let catalog = RealMetadataLookup::from_config(config)?;
    let mut page = BookSearch::new();

    if let Err(failure) = page.search(&catalog, title, author).await {
        eprintln!("{}", page.error().unwrap_or_default());
        return Err(failure.into());
    }
    if let Some(message) = page.error() {
        println!("{message}");
    }
    for (index, book) in page.results().iter().enumerate() {
        println!(
            "[{index}] {} / {} / ISBN: {}",
            book.title,
            book.author().unwrap_or("N/A"),
            book.isbn().unwrap_or("N/A")
        );
    }
    Ok(())
}

/// Entry page → token → confirmation page, in one go
async fn transact(config: &ExchangeConfig, mut draft: TransactionDraft, consent: bool) -> ExchangeResult<()> {
    if draft.title.trim().is_empty() {
        let catalog = RealMetadataLookup::from_config(config)?;
        if let LookupOutcome::Failed(failure) = draft.lookup_identifier(&catalog).await {
            return Err(failure.into());
        }
    }

    let navigation = draft
        .advance()
        .map_err(|e| ExchangeError::workflow(e.user_message()))?;
    let url = navigation.url();
    let token = url.split_once('?').and_then(|(_, query)| codec::token_from_query(query));

    let controller = ConfirmationController::new(draft.kind(), RealBackendClient::from_config(config)?);
    let state = controller.load(token).await;
    if let Some(message) = state.error_message() {
        return Err(ExchangeError::workflow(message));
    }
    if let Some(transaction) = state.transaction() {
        print_book(&transaction.book);
    }

    if draft.kind() == TransactionKind::Donate {
        controller.set_consent(consent).await;
    }

    match controller.confirm().await {
        ConfirmOutcome::Submitted => {
            println!("Done: {} recorded ({})", draft.kind(), Navigation::Done.url());
            Ok(())
        }
        ConfirmOutcome::ConsentRequired => {
            let message = controller.state().await.error_message().unwrap_or_default();
            Err(ExchangeError::workflow(format!("{message} (pass --consent)")))
        }
        ConfirmOutcome::Failed(failure) => {
            page_error!(PageId::Cli, error = %failure, "{}", failure.user_message());
            Err(failure.into())
        }
        ConfirmOutcome::Ignored => Err(ExchangeError::workflow("confirmation page was not ready")),
    }
}

fn ad(config: &ExchangeConfig) -> ExchangeResult<()> {
    let pool = match &config.ad_pool_path {
        Some(path) => shared::load_pool(path)?,
        None => shared::default_pool(),
    };

    match AdBanner::activate(&pool, &mut rand::thread_rng()) {
        Some(banner) => println!(
            "{} → {}{}",
            banner.item.payload.alt_text,
            banner.item.payload.link_url,
            if banner.item.payload.is_external { " (external)" } else { "" }
        ),
        None => println!("No sponsor item is eligible."),
    }
    Ok(())
}

fn checked_url(flag: &str, url: String) -> ExchangeResult<String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.trim_end_matches('/').to_string())
    } else {
        Err(ExchangeError::config(format!("{flag} must be an http(s) URL, got '{url}'")))
    }
}

fn print_book(book: &BookRecord) {
    println!("Title:  {}", book.title);
    if let Some(author) = book.author() {
        println!("Author: {author}");
    }
    if let Some(isbn) = book.isbn() {
        println!("ISBN:   {isbn}");
    }
    if let Some(thumbnail) = book.display_thumbnail() {
        println!("Cover:  {thumbnail}");
    }
}
