//! `bigjson` CLI — reformat, validate, and inspect JSON with big numbers
//! kept intact.
//!
//! ## Usage
//!
//! ```sh
//! # Reformat JSON (stdin → stdout); big integers survive byte for byte
//! echo '{"id":123456989987654321}' | bigjson fmt --indent 2
//!
//! # Reformat from file to file
//! bigjson fmt -i data.json -o pretty.json
//!
//! # Validate only; nonzero exit and an offset-bearing message on failure
//! bigjson check -i data.json
//!
//! # Accept __proto__ keys instead of rejecting them
//! echo '{"__proto__":1}' | bigjson fmt --proto-action preserve
//!
//! # Dump the type schema the parser recorded for each node
//! echo '{"id":9007199254741234}' | bigjson schema
//! ```

use anyhow::{Context, Result};
use bigjson_core::{
    parse, stringify_with_schema, ParseOptions, Space,
};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "bigjson",
    version,
    about = "Precision-preserving JSON reformatter and inspector"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Parse-policy flags shared by every subcommand.
#[derive(Args)]
struct PolicyFlags {
    /// Reject duplicate object keys
    #[arg(long)]
    strict: bool,
    /// Policy for __proto__ keys: error, ignore, or preserve
    #[arg(long)]
    proto_action: Option<String>,
    /// Policy for constructor keys: error, ignore, or preserve
    #[arg(long)]
    constructor_action: Option<String>,
}

impl PolicyFlags {
    fn to_options(&self) -> Result<ParseOptions> {
        let mut options = ParseOptions {
            strict: self.strict,
            ..Default::default()
        };
        if let Some(action) = &self.proto_action {
            options.proto_action = action
                .parse()
                .context("invalid value for --proto-action")?;
        }
        if let Some(action) = &self.constructor_action {
            options.constructor_action = action
                .parse()
                .context("invalid value for --constructor-action")?;
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Reformat JSON, preserving every numeral's exact source text
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Spaces per indentation step (0 or omitted = compact)
        #[arg(long, default_value_t = 0)]
        indent: usize,
        #[command(flatten)]
        policy: PolicyFlags,
    },
    /// Validate JSON; silent on success, offset-bearing error otherwise
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        policy: PolicyFlags,
    },
    /// Print the type schema recorded for each node, as JSON
    Schema {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Keep numerals as exact source text in the schema values
        #[arg(long)]
        store_as_string: bool,
        #[command(flatten)]
        policy: PolicyFlags,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fmt {
            input,
            output,
            indent,
            policy,
        } => {
            let text = read_input(input.as_deref())?;
            let options = ParseOptions {
                // Keeping numerals as text is what makes fmt lossless.
                store_as_string: true,
                ..policy.to_options()?
            };
            let parsed = parse(&text, &options).context("Failed to parse JSON")?;
            let space = (indent > 0).then(|| Space::Count(indent));
            let formatted = stringify_with_schema(&parsed.data, &parsed.data_schema, space);
            write_output(output.as_deref(), &formatted)?;
        }
        Commands::Check { input, policy } => {
            let text = read_input(input.as_deref())?;
            let options = policy.to_options()?;
            parse(&text, &options).context("Failed to parse JSON")?;
        }
        Commands::Schema {
            input,
            output,
            store_as_string,
            policy,
        } => {
            let text = read_input(input.as_deref())?;
            let options = ParseOptions {
                store_as_string,
                ..policy.to_options()?
            };
            let parsed = parse(&text, &options).context("Failed to parse JSON")?;
            let rendered = serde_json::to_string_pretty(&parsed.data_schema)?;
            write_output(output.as_deref(), &rendered)?;
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
            println!("{}", content);
        }
    }
    Ok(())
}
