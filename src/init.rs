use std::path::{Path, PathBuf};

use suggestd::{
    config::{self, Config},
    importer, SuggestionEngine,
};

/// Initialize logger.
pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            use std::io::Write;
            let level = if record.level() != log::Level::Info {
                format!("[{}] ", record.level())
            } else {
                String::new()
            };
            writeln!(
                buf,
                "{} {}:{} {}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                level,
                record.args()
            )
        })
        .init();
}

/// Load and merge config files, exiting on error.
pub fn init_config(paths: &[PathBuf]) -> Config {
    config::load_all(paths).unwrap_or_else(|e| {
        log::error!("error loading config: {}", e);
        std::process::exit(1);
    })
}

/// Generate a new sample config file.
pub fn generate_config(path: &Path) -> Result<(), config::ConfigError> {
    config::generate_sample(path)
}

/// Build the engine and load all word lists into it, exiting on error.
pub fn init_engine(cfg: &Config, word_files: &[PathBuf]) -> SuggestionEngine {
    let mut engine = SuggestionEngine::with_config(cfg.engine_config());

    if word_files.is_empty() {
        log::warn!("no word lists specified. use --words to load some");
    }

    for path in word_files {
        let words = match importer::import_csv(path, cfg.query.rtl) {
            Ok(w) => w,
            Err(e) => {
                log::error!("error importing {}: {}", path.display(), e);
                std::process::exit(1);
            }
        };

        engine.add_words(words);
    }

    log::info!("indexed {} prefixes", engine.bucket_count());
    engine
}
