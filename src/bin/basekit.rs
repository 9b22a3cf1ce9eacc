//! basekit CLI
//!
//! Command-line front end over the file and string layers.

use std::io::Write;
use std::process::ExitCode;

use basekit::{
    read_file, save_file, string_compare, string::try_string_trim, Arena, Config, File, FileMode,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// basekit CLI
#[derive(Parser, Debug)]
#[command(name = "basekit")]
#[command(about = "Portable file I/O over arena-backed strings")]
#[command(version)]
struct Args {
    /// Arena chunk size in KB
    #[arg(long, default_value = "64")]
    arena_chunk_kb: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a file's contents
    Cat {
        /// File to read
        path: String,
    },

    /// Print a file's size in bytes
    Size {
        /// File to query
        path: String,
    },

    /// Create (or truncate) a file and write text to it
    Write {
        /// File to write
        path: String,

        /// Text to write
        text: String,
    },

    /// Check whether two files have identical contents
    Compare {
        /// First file
        a: String,

        /// Second file
        b: String,
    },

    /// Print the inclusive byte range start..=end of a file
    Trim {
        /// File to read
        path: String,

        /// First byte offset
        start: usize,

        /// Last byte offset (inclusive)
        end: usize,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,basekit=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match Config::builder()
        .arena_chunk_size(args.arena_chunk_kb * 1024)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(args.command, &config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &Config) -> basekit::Result<ExitCode> {
    let arena = Arena::with_config(config);
    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::Cat { path } => {
            let content = read_file(&arena, &path)?;
            stdout.write_all(content.as_bytes())?;
        }
        Commands::Size { path } => {
            let mut file = File::open_with(&path, FileMode::READ, config)?;
            let size = file.size()?;
            file.close();
            writeln!(stdout, "{}", size)?;
        }
        Commands::Write { path, text } => {
            save_file(&path, text.as_bytes())?;
            tracing::info!("Wrote {} bytes to {}", text.len(), path);
        }
        Commands::Compare { a, b } => {
            let left = read_file(&arena, &a)?;
            let right = read_file(&arena, &b)?;
            if string_compare(left, right) {
                writeln!(stdout, "identical")?;
            } else {
                writeln!(stdout, "different")?;
                return Ok(ExitCode::from(1));
            }
        }
        Commands::Trim { path, start, end } => {
            let content = read_file(&arena, &path)?;
            let slice = try_string_trim(&arena, content, start, end)?;
            stdout.write_all(slice.as_bytes())?;
            writeln!(stdout)?;
        }
    }

    tracing::debug!("Arena used {} bytes", arena.used());
    Ok(ExitCode::SUCCESS)
}
