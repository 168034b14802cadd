//! suggestd: an in-process prefix suggestion engine.
//!
//! ```
//! use suggestd::{Entry, SuggestionEngine};
//!
//! let mut engine = SuggestionEngine::default();
//! engine.add_words([Entry::new("success", 10), Entry::new("succubus", 9)]);
//!
//! let words = engine.suggest("succ", 10);
//! assert_eq!(words, vec!["success", "succubus"]);
//! assert_eq!(engine.suggest_next_letter("succ", &words), vec!["e", "u"]);
//! ```

pub mod config;
pub mod engine;
pub mod importer;
pub mod models;
pub mod text;

pub use engine::{EngineConfig, SuggestionEngine};
pub use models::{Entry, Suggestions};
