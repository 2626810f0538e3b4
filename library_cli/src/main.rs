mod commands;
mod output;
mod xml_output;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use library_lib::{Config, InMemoryRepository, LibraryService, HATEOAS_MEDIA_TYPE};

use crate::output::{print_response, OutputFormat};

#[derive(Parser)]
#[command(name = "library")]
#[command(about = "Browse and edit the authors and books of the library")]
struct Cli {
    /// Output format: json, xml, table or csv
    #[arg(long, default_value = "json", global = true)]
    output: String,

    /// Media type to request (the hypermedia type adds links to responses)
    #[arg(long, global = true)]
    accept: Option<String>,

    /// Shorthand for --accept application/vnd.marvin.hateoas+json
    #[arg(long, global = true, conflicts_with = "accept")]
    hateoas: bool,

    /// Base URL generated links resolve against (overrides LIBRARY_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// JSON data file holding the library (overrides LIBRARY_DATA_FILE)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List authors, one page at a time
    Authors(commands::authors::AuthorsArgs),
    /// Show a single author
    Author(commands::authors::AuthorArgs),
    /// Create an author, optionally with books
    CreateAuthor(commands::authors::CreateAuthorArgs),
    /// Try to create an author at a fixed id (always refused)
    BlockAuthor(commands::authors::AuthorIdArgs),
    /// Delete an author and all of their books
    DeleteAuthor(commands::authors::AuthorIdArgs),
    /// List the books of an author
    Books(commands::books::BooksArgs),
    /// Show a single book
    Book(commands::books::BookArgs),
    /// Add a book to an author
    CreateBook(commands::books::CreateBookArgs),
    /// Replace a book, creating it when it does not exist
    UpdateBook(commands::books::UpdateBookArgs),
    /// Apply a JSON Patch document to a book
    PatchBook(commands::books::UpdateBookArgs),
    /// Delete a book
    DeleteBook(commands::books::BookArgs),
    /// Discard the data file contents and restore the seed library
    Reset,
}

impl Commands {
    fn mutates(&self) -> bool {
        !matches!(
            self,
            Commands::Authors(_)
                | Commands::Author(_)
                | Commands::BlockAuthor(_)
                | Commands::Books(_)
                | Commands::Book(_)
        )
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("library=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = OutputFormat::parse(&cli.output);
    let accept = if cli.hateoas {
        Some(HATEOAS_MEDIA_TYPE)
    } else {
        cli.accept.as_deref()
    };

    let mut config = Config::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(data_file) = &cli.data_file {
        config.data_file = data_file.clone();
    }

    if let Commands::Reset = cli.command {
        return commands::reset::run(&config);
    }

    let repository = InMemoryRepository::load(&config.data_file)?;
    let service = LibraryService::from_config(repository, &config)?;

    let response = match &cli.command {
        Commands::Authors(args) => commands::authors::list(args, &service, accept),
        Commands::Author(args) => commands::authors::show(args, &service, accept),
        Commands::CreateAuthor(args) => commands::authors::create(args, &service, accept)?,
        Commands::BlockAuthor(args) => commands::authors::block(args, &service),
        Commands::DeleteAuthor(args) => commands::authors::delete(args, &service),
        Commands::Books(args) => commands::books::list(args, &service, accept),
        Commands::Book(args) => commands::books::show(args, &service, accept),
        Commands::CreateBook(args) => commands::books::create(args, &service, accept)?,
        Commands::UpdateBook(args) => commands::books::update(args, &service, accept)?,
        Commands::PatchBook(args) => commands::books::patch(args, &service, accept)?,
        Commands::DeleteBook(args) => commands::books::delete(args, &service),
        Commands::Reset => return Ok(()),
    };

    print_response(&response, &format)?;

    if !response.status.is_success() {
        bail!("request failed with status {}", response.status);
    }
    if cli.command.mutates() {
        service.repository().save(&config.data_file)?;
    }

    Ok(())
}
