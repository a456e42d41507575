//! `scrap-doc` CLI: scrape the Solarus Lua API documentation and convert
//! between JSON and Lua data tables.
//!
//! ## Usage
//!
//! ```sh
//! # Scrape the online documentation into solarus_lua_api.lua
//! scrap-doc scrape
//!
//! # Scrape another documentation version, as JSON
//! scrap-doc scrape --base-url http://www.solarus-games.org/doc/1.5/ --format json -o api.json
//!
//! # Encode JSON to a Lua data module (stdin → stdout)
//! echo '{"b":"test"}' | scrap-doc encode
//!
//! # Encode to a bare table literal, file to file
//! scrap-doc encode --bare -i api.json -o api.lua
//!
//! # Read a Lua data module back as pretty-printed JSON
//! scrap-doc decode -i solarus_lua_api.lua
//! ```
//!
//! Logs go to stderr; `RUST_LOG` overrides the default `info` level.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use doc_scraper::config::{DEFAULT_BASE_URL, DEFAULT_OUTPUT, DEFAULT_ROOT_PAGE};
use doc_scraper::{OutputFormat, ScrapeConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "scrap-doc",
    version,
    about = "Solarus Lua API documentation scraper"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the documentation and write the API table
    Scrape {
        /// Documentation root, ending with '/'
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
        /// Page listing every API module, relative to the base URL
        #[arg(long, default_value = DEFAULT_ROOT_PAGE)]
        root_page: String,
        /// Output file
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Output flavour
        #[arg(long, value_enum, default_value_t = Format::Lua)]
        format: Format,
        /// Line width used when converting descriptions to text
        #[arg(long)]
        text_width: Option<usize>,
    },
    /// Encode JSON to a Lua data module
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit the table literal without the leading `return`
        #[arg(long)]
        bare: bool,
    },
    /// Decode a Lua table literal back to JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Lua,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Lua => OutputFormat::Lua,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // clap prints the help and exits
            Cli::parse_from(["scrap-doc", "--help"]);
            unreachable!();
        }
    };

    match command {
        Commands::Scrape {
            base_url,
            root_page,
            output,
            format,
            text_width,
        } => {
            let defaults = ScrapeConfig::default();
            let config = ScrapeConfig {
                base_url,
                root_page,
                text_width: text_width.unwrap_or(defaults.text_width),
                ..defaults
            };
            let (api, report) = doc_scraper::scrape(config).context("Scrape failed")?;
            doc_scraper::write_output(&output, &api, format.into())
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(
                "Parsed {} functions and methods and {} modules",
                report.callables, report.modules
            );
        }
        Commands::Encode {
            input,
            output,
            bare,
        } => {
            let json = read_input(input.as_deref())?;
            let value: serde_json::Value =
                serde_json::from_str(&json).context("Failed to parse JSON input")?;
            let value = lua_table::LuaValue::from_json(value);
            let lua = if bare {
                let mut literal = lua_table::serialize(&value, 0)
                    .context("Failed to encode JSON as a Lua table")?;
                literal.push('\n');
                literal
            } else {
                lua_table::to_module(&value).context("Failed to encode JSON as a Lua table")?
            };
            write_output(output.as_deref(), &lua)?;
        }
        Commands::Decode { input, output } => {
            let lua = read_input(input.as_deref())?;
            let value = lua_table::decode(&lua).context("Failed to read Lua table")?;
            let mut pretty = serde_json::to_string_pretty(&value)?;
            pretty.push('\n');
            write_output(output.as_deref(), &pretty)?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
