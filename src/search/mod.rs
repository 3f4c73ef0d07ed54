//! FAQ search over a small, load-once corpus
//!
//! Records are loaded from a JSON document (`{"faqs": [...]}`) and indexed
//! into a TF-IDF vector space:
//!
//! - **Preprocessing**: lowercase, strip non-alphanumerics, trim
//! - **Terms**: unigrams and bigrams after English stopword removal
//! - **Vocabulary**: capped to the most frequent `max_features` terms
//! - **Scoring**: cosine similarity between L2-normalised TF-IDF vectors
//! - **Ranking**: `score > threshold`, stable descending sort, truncate to `top_k`
//!
//! ```text
//! faqs.json ──load_corpus──▶ Vec<FaqRecord> ──FaqIndex::build──▶ Arc<FaqIndex>
//!                                                                    │
//!                         FaqSearchService::reload swaps ────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use intake_server::search::{FaqRecord, FaqSearchConfig, FaqSearchService};
//!
//! let faqs = vec![FaqRecord::new(
//!     "How do I reset my password?",
//!     "Go to settings.",
//!     vec!["password".into(), "reset".into()],
//!     "account",
//! )];
//! let service = FaqSearchService::from_records(faqs, FaqSearchConfig::default());
//!
//! for hit in service.search("reset password", Some(3), Some(0.1)) {
//!     println!("{:.3} {}", hit.similarity_score, hit.faq.question);
//! }
//! ```

mod config;
mod document;
mod error;
mod index;
mod service;
mod text;

pub use config::{FaqSearchConfig, FaqSearchConfigBuilder};
pub use document::{assign_ids, parse_corpus, FaqRecord, SearchDocument, SearchResult};
pub use error::{CorpusError, CorpusResult};
pub use index::{FaqIndex, IndexStats};
pub use service::{load_corpus, FaqSearchService, SCORING_ALGORITHM};
pub use text::{extract_terms, is_stopword, preprocess, tokenize};
