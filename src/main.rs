//! Address Format CLI
//!
//! Usage:
//!   address-format render --data <FILE> --address <ID> [OPTIONS]
//!   address-format validate [--config <FILE>] [FILE]
//!   address-format fields --data <FILE> [--country <ID>] [--view <VIEW>]

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use address_format::error::format_validation_errors;
use address_format::{AddressFormatter, Config, CountryId, FieldView, MemoryStore, TemplateStore};

#[derive(Parser)]
#[command(name = "address-format")]
#[command(about = "Validate address layout templates and render addresses")]
struct Cli {
    /// Log template lookups and rendering to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one address of a data file as text
    Render {
        /// Address data file (TOML format)
        #[arg(short, long)]
        data: PathBuf,

        /// Id of the address to render
        #[arg(short, long)]
        address: u64,

        /// Render configuration file (TOML format)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Line separator, overriding the configuration
        #[arg(long)]
        newline: Option<String>,

        /// Field separator, overriding the configuration
        #[arg(long)]
        separator: Option<String>,

        /// Token to leave out of the output (repeatable)
        #[arg(long)]
        avoid: Vec<String>,
    },

    /// Check a template (reads from stdin if no file is given)
    Validate {
        /// Template file
        input: Option<PathBuf>,

        /// Configuration file with validation rules (TOML format)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the template fields of a country
    Fields {
        /// Address data file (TOML format)
        #[arg(short, long)]
        data: PathBuf,

        /// Country id (defaults to the data file's default country)
        #[arg(long)]
        country: Option<CountryId>,

        /// How to split the template
        #[arg(long, value_enum, default_value_t = View::Lines)]
        view: View,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum View {
    Lines,
    Cleaned,
    Words,
    Tokens,
}

impl From<View> for FieldView {
    fn from(view: View) -> Self {
        match view {
            View::Lines => FieldView::Lines,
            View::Cleaned => FieldView::CleanedLines,
            View::Words => FieldView::Words,
            View::Tokens => FieldView::Tokens,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Render {
            data,
            address,
            config,
            newline,
            separator,
            avoid,
        } => {
            let store = load_store(&data);
            let config = load_config(config.as_deref());

            let mut render = config.render;
            if let Some(newline) = newline {
                render = render.with_newline(newline);
            }
            if let Some(separator) = separator {
                render = render.with_separator(separator);
            }
            for token in avoid {
                render = render.with_avoid(token);
            }

            let Some(entity) = store.address(address) else {
                eprintln!("Error: no address with id {} in '{}'", address, data.display());
                return ExitCode::FAILURE;
            };

            let formatter = AddressFormatter::new(&store, &store).with_rules(config.rules);
            println!("{}", formatter.generate(Some(entity), &render));
            ExitCode::SUCCESS
        }

        Command::Validate { input, config } => {
            let config = load_config(config.as_deref());
            let (source, filename) = read_input(input.as_deref());

            let store = MemoryStore::default();
            let formatter = AddressFormatter::new(&store, &store).with_rules(config.rules);
            let errors = formatter.validate(&source);
            if errors.is_empty() {
                println!("{}: ok", filename);
                ExitCode::SUCCESS
            } else {
                eprint!("{}", format_validation_errors(&errors, &source, &filename));
                ExitCode::FAILURE
            }
        }

        Command::Fields { data, country, view } => {
            let store = load_store(&data);
            let country = country.unwrap_or_else(|| store.default_country_id());

            let formatter = AddressFormatter::new(&store, &store);
            for field in formatter.ordered_fields(country, view.into()) {
                println!("{}", field);
            }
            ExitCode::SUCCESS
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn load_store(path: &Path) -> MemoryStore {
    match MemoryStore::from_file(path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error loading address data '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    }
}

fn read_input(path: Option<&Path>) -> (String, String) {
    match path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
