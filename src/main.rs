mod cli;
mod init;

use std::io::{self, BufRead, Write};

use clap::Parser;

use cli::Commands;
use suggestd::{config::Config, SuggestionEngine, Suggestions};

// Use mimalloc for musl builds (musl's default malloc is very slow).
#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() {
    init::init_logger();

    let cli = cli::Cli::parse();

    match cli.command {
        // Generate a new config file.
        Commands::NewConfig { path } => match init::generate_config(&path) {
            Ok(_) => {
                log::info!("config file generated: {}", path.display());
            }
            Err(e) => {
                log::error!("error generating config: {}", e);
                std::process::exit(1);
            }
        },

        // One-shot lookups from the command line.
        Commands::Query {
            selectors,
            limit,
            json,
        } => {
            let config = init::init_config(&cli.config);
            let engine = init::init_engine(&config, &cli.words);
            let limit = limit.unwrap_or_else(|| config.limit());

            let mut out = io::stdout().lock();
            for selector in selectors {
                let res = lookup(&engine, &config, &selector, limit);
                if let Err(e) = print(&mut out, &res, config.separator(), json) {
                    log::error!("error writing output: {}", e);
                    std::process::exit(1);
                }
            }
        }

        // Interactive lookups, one selector per stdin line.
        Commands::Repl { limit, json } => {
            let config = init::init_config(&cli.config);
            let engine = init::init_engine(&config, &cli.words);
            let limit = limit.unwrap_or_else(|| config.limit());

            log::info!("reading selectors from stdin");

            let mut out = io::stdout().lock();
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        log::error!("error reading stdin: {}", e);
                        std::process::exit(1);
                    }
                };

                // Leading and trailing spaces are part of a selector; only the
                // line ending is dropped.
                let selector = line.trim_end_matches('\r');
                if selector.is_empty() {
                    continue;
                }

                let res = lookup(&engine, &config, selector, limit);
                if let Err(e) = print(&mut out, &res, config.separator(), json) {
                    log::error!("error writing output: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Suggest words and next letters for a selector. Right-to-left lookups have
/// no next letters.
fn lookup(
    engine: &SuggestionEngine,
    config: &Config,
    selector: &str,
    limit: usize,
) -> Suggestions {
    if config.query.rtl {
        return Suggestions {
            selector: selector.to_string(),
            words: engine.suggest_rtl(selector, limit),
            next_letters: Vec::new(),
        };
    }

    let words = engine.suggest(selector, limit);
    let next_letters = engine.suggest_next_letter(selector, &words);

    Suggestions {
        selector: selector.to_string(),
        words,
        next_letters,
    }
}

fn print<W: Write>(
    out: &mut W,
    res: &Suggestions,
    separator: &str,
    json: bool,
) -> io::Result<()> {
    if json {
        let line = serde_json::to_string(res).map_err(io::Error::other)?;
        return writeln!(out, "{}", line);
    }

    writeln!(
        out,
        "{}\t{}\t{}",
        res.selector,
        res.words.join(separator),
        res.next_letters.join(separator)
    )
}
