use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fragment_sanitizer::{default_sanitizer, linkify, Result};

/// Sanitize an HTML fragment read from a file or standard input.
#[derive(Parser)]
#[command(name = "fragment-sanitizer", version, about, long_about = None)]
struct Cli {
    /// File to read instead of standard input
    input: Option<PathBuf>,

    /// Treat the input as plain text and turn URLs and email addresses into links
    #[arg(long, conflicts_with = "text")]
    linkify: bool,

    /// Window or frame name set as the target of links made by --linkify
    #[arg(long, requires = "linkify")]
    target: Option<String>,

    /// Treat the input as plain text and only escape it
    #[arg(long)]
    text: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        eprintln!("fragment-sanitizer: {}", error);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    match cli.input {
        Some(ref path) => File::open(path)?.read_to_string(&mut input)?,
        None => io::stdin().read_to_string(&mut input)?,
    };

    let sanitizer = default_sanitizer();
    let output = if cli.linkify {
        linkify(&input, cli.target.as_deref())?
    } else if cli.text {
        sanitizer.sanitize_text(&input)
    } else {
        sanitizer.sanitize(&input)?
    };

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
