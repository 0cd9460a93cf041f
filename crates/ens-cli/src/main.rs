use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process;

use ens_core::Token;

/// ens — ENS name normalization CLI
///
/// Normalize, beautify, and inspect ENS names per ENSIP-15.
#[derive(Parser)]
#[command(name = "ens", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a name to its canonical form
    Normalize {
        /// The name, e.g. "Vitalik.eth"
        name: String,
    },

    /// Beautify a name for display
    Beautify {
        /// The name, e.g. "Vitalik.eth"
        name: String,
    },

    /// Normalize and beautify in one pass
    Process {
        /// The name, e.g. "Vitalik.eth"
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the token stream for a name (debugging aid)
    Tokens {
        /// The name, e.g. "Vitalik.eth"
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Normalize { name } => match ens_core::normalize(&name) {
            Ok(normalized) => {
                println!("{}", normalized);
                0
            }
            Err(e) => fail(&e),
        },
        Commands::Beautify { name } => match ens_core::beautify(&name) {
            Ok(beautified) => {
                println!("{}", beautified);
                0
            }
            Err(e) => fail(&e),
        },
        Commands::Process { name, json } => match ens_core::process(&name) {
            Ok(both) => {
                if json {
                    let out = serde_json::json!({
                        "name": name,
                        "normalized": both.normalized,
                        "beautified": both.beautified,
                    });
                    println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
                } else {
                    println!("normalized: {}", both.normalized);
                    println!("beautified: {}", both.beautified);
                }
                0
            }
            Err(e) => fail(&e),
        },
        Commands::Tokens { name, json } => match ens_core::tokenize(&name) {
            Ok(tokens) => {
                print_tokens(&tokens, json);
                0
            }
            Err(e) => fail(&e),
        },
        Commands::Version => {
            println!(
                "ens {} (ens-core {}, spec {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION"),
                ens_core::tables::SPEC_VERSION
            );
            0
        }
    };

    process::exit(exit_code);
}

fn fail(err: &ens_core::Error) -> i32 {
    eprintln!("{} {}", "error:".red().bold(), err);
    1
}

fn print_tokens(tokens: &[Token], json: bool) {
    if json {
        let items: Vec<serde_json::Value> = tokens
            .iter()
            .map(|tok| match tok {
                Token::Text { cps } => serde_json::json!({
                    "type": "text",
                    "cps": cps.iter().map(|c| format!("U+{:04X}", c)).collect::<Vec<_>>(),
                }),
                Token::Emoji {
                    input,
                    canonical,
                    beautified,
                } => serde_json::json!({
                    "type": "emoji",
                    "input": input.iter().map(|c| format!("U+{:04X}", c)).collect::<Vec<_>>(),
                    "canonical": canonical.iter().map(|c| format!("U+{:04X}", c)).collect::<Vec<_>>(),
                    "beautified": beautified.iter().map(|c| format!("U+{:04X}", c)).collect::<Vec<_>>(),
                }),
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::Value::Array(items)).unwrap_or_default()
        );
    } else {
        for tok in tokens {
            match tok {
                Token::Text { cps } => {
                    let rendered: String =
                        cps.iter().filter_map(|&c| char::from_u32(c)).collect();
                    println!("{}  {:?}", "text ".cyan(), rendered);
                }
                Token::Emoji { canonical, .. } => {
                    let rendered: String = canonical
                        .iter()
                        .filter_map(|&c| char::from_u32(c))
                        .collect();
                    println!("{}  {}", "emoji".yellow(), rendered);
                }
            }
        }
    }
}
