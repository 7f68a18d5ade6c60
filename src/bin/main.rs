// src/bin/main.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::path::PathBuf;

use keypath_core::{Ir, export_kanata, generate_schema, keys, parse_ir, to_pretty_json};

#[derive(Parser, Debug)]
#[command(name = "keypath")]
#[command(about = "Keypath IR tooling: validate, format, and export to kanata")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate an IR file
    Validate {
        /// Path to the IR file
        file: PathBuf,
    },
    /// Rewrite an IR file in canonical pretty-printed form
    Pretty {
        /// Path to the IR file
        file: PathBuf,
    },
    /// Export an IR file to kanata format
    Export {
        /// Path to the IR file
        file: PathBuf,
        /// Output path for the .kbd file (defaults to the input with .kbd)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create a one-key IR mapping, like the recorder UI does
    Map {
        /// Captured input key (macOS names like "space" are accepted)
        input_key: String,
        /// Output key or text sequence
        output_sequence: String,
        /// Write the IR here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate the JSON schema for the IR format
    Schema {
        /// Output path for the schema file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file } => {
            let content = fs::read_to_string(&file)?;
            match parse_ir(&content) {
                Ok(_) => {
                    println!("{} {} is valid", "✓".green(), file.display());
                    Ok(())
                }
                Err(e) => {
                    eprintln!("{} {} is invalid: {}", "✗".red(), file.display(), e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Pretty { file } => {
            let content = fs::read_to_string(&file)?;
            let ir = parse_ir(&content)?;
            fs::write(&file, to_pretty_json(&ir)?)?;
            println!("{} {} formatted", "✓".green(), file.display());
            Ok(())
        }
        Commands::Export { file, output } => {
            let content = fs::read_to_string(&file)?;
            let ir = parse_ir(&content)?;
            let kanata = export_kanata(&ir)?;

            let output_path = output.unwrap_or_else(|| file.with_extension("kbd"));
            fs::write(&output_path, kanata)?;
            println!("{} exported to {}", "✓".green(), output_path.display());
            Ok(())
        }
        Commands::Map { input_key, output_sequence, output } => {
            let ir = Ir::with_mapping(&keys::normalize(&input_key), output_sequence.trim());
            let json = to_pretty_json(&ir)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!("{} mapping written to {}", "✓".green(), path.display());
                }
                None => println!("{json}"),
            }
            Ok(())
        }
        Commands::Schema { output } => {
            let schema = generate_schema()?;
            let output_path = output.unwrap_or_else(|| PathBuf::from("ir_schema.json"));
            fs::write(&output_path, schema)?;
            println!("{} schema generated: {}", "✓".green(), output_path.display());
            Ok(())
        }
    }
}
