//! TLD Regex CLI
//!
//! CLI tool for generating, dumping and verifying the TLD regex.

mod check;
mod fetch;
mod output;

use std::path::Path;
use std::time::Instant;

use clap::{Parser, Subcommand};

use tld_compiler::{build_pattern, parse_suffix_list, render_suffix_text, CompileOptions};
use tld_core::{Orientation, DEFAULT_GROUP_NAME};

#[derive(Parser)]
#[command(name = "tld-cli")]
#[command(about = "Compiles a TLD list into a single exact-match regex")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a suffix list into a regex pattern
    Compile {
        /// Input suffix list file (one suffix per line, '#' comments)
        #[arg(short, long, conflicts_with = "url")]
        input: Option<String>,

        /// Download the suffix list from this URL instead of reading a file
        #[arg(long)]
        url: Option<String>,

        /// Output pattern file
        #[arg(short, long, default_value = "tldregex.txt")]
        output: String,

        /// Trie orientation: 'suffix' (shared endings) or 'prefix'
        #[arg(long, default_value_t = Orientation::Suffix)]
        orientation: Orientation,

        /// Name of the capturing group wrapping the pattern
        #[arg(long, default_value = DEFAULT_GROUP_NAME)]
        group_name: String,

        /// Verbose output; also writes diagnostic dumps
        #[arg(short, long)]
        verbose: bool,

        /// Directory for diagnostic dumps (implies dumps are written)
        #[arg(long)]
        diagnostics_dir: Option<String>,
    },

    /// Verify that a pattern matches every suffix of a list
    Check {
        /// Suffix list file
        #[arg(short, long)]
        input: String,

        /// File containing the pattern to verify
        #[arg(short, long, default_value = "tldregex.txt")]
        pattern: String,
    },

    /// Download the suffix list
    Fetch {
        /// Source URL
        #[arg(long, default_value = fetch::IANA_TLD_URL)]
        url: String,

        /// Output file
        #[arg(short, long, default_value = "tlds-alpha-by-domain.txt")]
        output: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Compile { verbose: true, .. });
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let result = match cli.command {
        Commands::Compile {
            input,
            url,
            output,
            orientation,
            group_name,
            verbose,
            diagnostics_dir,
        } => {
            let options = CompileOptions {
                orientation,
                group_name,
            };
            let source = match (input, url) {
                (Some(path), _) => Source::File(path),
                (None, Some(url)) => Source::Url(url),
                (None, None) => Source::Url(fetch::IANA_TLD_URL.to_string()),
            };
            let diagnostics_dir = match (diagnostics_dir, verbose) {
                (Some(dir), _) => Some(dir),
                (None, true) => Some(".".to_string()),
                (None, false) => None,
            };
            cmd_compile(&source, &output, &options, diagnostics_dir.as_deref())
        }
        Commands::Check { input, pattern } => check::run_check(&input, &pattern),
        Commands::Fetch { url, output } => cmd_fetch(&url, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

enum Source {
    File(String),
    Url(String),
}

fn cmd_compile(
    source: &Source,
    output: &str,
    options: &CompileOptions,
    diagnostics_dir: Option<&str>,
) -> Result<(), String> {
    let start = Instant::now();

    let (text, origin) = match source {
        Source::File(path) => (output::read_text(Path::new(path))?, path.clone()),
        Source::Url(url) => (fetch::fetch_suffix_list(url)?, url.clone()),
    };
    let fetch_time = start.elapsed();

    let parse_start = Instant::now();
    let list = parse_suffix_list(&text).map_err(|e| format!("Failed to parse '{}': {}", origin, e))?;
    let parse_time = parse_start.elapsed();

    let build_start = Instant::now();
    let compilation = build_pattern(&list, options);
    let build_time = build_start.elapsed();

    output::write_text(Path::new(output), &compilation.pattern)?;

    if let Some(dir) = diagnostics_dir {
        let written = output::write_diagnostics(
            Path::new(dir),
            &compilation,
            &render_suffix_text(&text, &list),
        )?;
        for path in written {
            log::info!("Wrote {}", path.display());
        }
    }

    let total_time = start.elapsed();

    println!("Compiled '{}' to '{}'", origin, output);
    println!("  Lines:    {}", list.stats.lines);
    println!(
        "  Suffixes: {} literal, {} decoded ({} skipped, {} duplicates)",
        list.literal.len(),
        list.decoded.len(),
        list.stats.skipped,
        list.stats.duplicates
    );
    println!("  Pattern:  {} bytes ({} orientation)", compilation.pattern.len(), options.orientation);
    println!(
        "  Time:     {:.1}ms (read: {:.1}ms, parse: {:.1}ms, build: {:.1}ms)",
        total_time.as_secs_f64() * 1000.0,
        fetch_time.as_secs_f64() * 1000.0,
        parse_time.as_secs_f64() * 1000.0,
        build_time.as_secs_f64() * 1000.0,
    );

    Ok(())
}

fn cmd_fetch(url: &str, output: &str) -> Result<(), String> {
    let text = fetch::fetch_suffix_list(url)?;
    output::write_text(Path::new(output), &text)?;
    println!("Downloaded '{}' to '{}' ({} bytes)", url, output, text.len());
    Ok(())
}
