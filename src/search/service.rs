//! FAQ search service: corpus loading, index lifecycle and queries

use crate::metrics::{FAQ_CORPUS_SIZE, FAQ_SEARCHES_TOTAL, FAQ_SEARCH_DURATION_SECONDS};
use crate::search::config::FaqSearchConfig;
use crate::search::document::{parse_corpus, FaqRecord, SearchResult};
use crate::search::error::{CorpusError, CorpusResult};
use crate::search::index::{FaqIndex, IndexStats};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Name reported to clients for the scoring method
pub const SCORING_ALGORITHM: &str = "tfidf_cosine";

/// Shared handle over the current FAQ index.
///
/// The index itself is immutable. Reloading builds a replacement and swaps
/// the `Arc`, so a search in flight keeps the snapshot it started with.
/// Reloads run one at a time so the last file read is the one installed.
pub struct FaqSearchService {
    index: RwLock<Arc<FaqIndex>>,
    reload_lock: tokio::sync::Mutex<()>,
    corpus_path: Option<PathBuf>,
    config: FaqSearchConfig,
    ready: AtomicBool,
}

impl FaqSearchService {
    /// Build a service over an in-memory corpus
    pub fn from_records(records: Vec<FaqRecord>, config: FaqSearchConfig) -> Self {
        let service = Self {
            index: RwLock::new(Arc::new(FaqIndex::empty())),
            reload_lock: tokio::sync::Mutex::new(()),
            corpus_path: None,
            config,
            ready: AtomicBool::new(false),
        };
        service.install(crate::search::document::assign_ids(records));
        service
    }

    /// Load the corpus at `config.corpus_path` and build the index.
    ///
    /// A missing or unreadable corpus is logged and yields an empty, ready
    /// index rather than an error.
    pub async fn load(config: FaqSearchConfig) -> Self {
        let path = config.corpus_path.clone();
        let records = match load_corpus(&path).await {
            Ok(records) => {
                tracing::info!(path = ?path, faqs = records.len(), "Loaded FAQ corpus");
                records
            }
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "FAQ corpus unavailable, starting with empty index");
                Vec::new()
            }
        };

        let service = Self {
            index: RwLock::new(Arc::new(FaqIndex::empty())),
            reload_lock: tokio::sync::Mutex::new(()),
            corpus_path: Some(path),
            config,
            ready: AtomicBool::new(false),
        };
        service.install(records);
        service
    }

    /// Re-read the corpus source and atomically replace the index.
    ///
    /// On failure the current index stays in place.
    pub async fn reload(&self) -> CorpusResult<IndexStats> {
        let path = self.corpus_path.as_ref().ok_or(CorpusError::NoSource)?;
        let _guard = self.reload_lock.lock().await;
        let records = load_corpus(path).await?;
        let stats = self.install(records);
        tracing::info!(
            path = ?path,
            faqs = stats.total_documents,
            vocabulary = stats.vocabulary_size,
            "FAQ index reloaded"
        );
        Ok(stats)
    }

    /// Replace the corpus with `records` (IDs are reassigned by position)
    pub fn replace_records(&self, records: Vec<FaqRecord>) -> IndexStats {
        self.install(crate::search::document::assign_ids(records))
    }

    fn install(&self, records: Vec<FaqRecord>) -> IndexStats {
        let index = Arc::new(FaqIndex::build(records, self.config.max_features));
        let stats = index.stats();
        *self.index.write() = index;
        self.ready.store(true, Ordering::Release);
        FAQ_CORPUS_SIZE.set(stats.total_documents as f64);
        stats
    }

    /// Current index snapshot
    pub fn snapshot(&self) -> Arc<FaqIndex> {
        self.index.read().clone()
    }

    /// Ranked search with configured defaults.
    ///
    /// `top_k` falls back to `default_top_k` and is capped at `max_top_k`;
    /// `threshold` falls back to `default_threshold`. Empty queries return
    /// an empty list.
    pub fn search(
        &self,
        query: &str,
        top_k: Option<usize>,
        threshold: Option<f64>,
    ) -> Vec<SearchResult> {
        let top_k = top_k
            .unwrap_or(self.config.default_top_k)
            .min(self.config.max_top_k);
        let threshold = threshold.unwrap_or(self.config.default_threshold);

        let timer = FAQ_SEARCH_DURATION_SECONDS.start_timer();
        let results = self.snapshot().search(query, top_k, threshold);
        timer.observe_duration();

        let outcome = if results.is_empty() { "miss" } else { "hit" };
        FAQ_SEARCHES_TOTAL.with_label_values(&[outcome]).inc();

        tracing::debug!(
            top_k,
            threshold,
            results = results.len(),
            best_score = results.first().map(|r| r.similarity_score),
            "FAQ search"
        );

        results
    }

    pub fn get_all(&self) -> Vec<FaqRecord> {
        self.snapshot().get_all().to_vec()
    }

    pub fn get_by_category(&self, category: &str) -> Vec<FaqRecord> {
        self.snapshot().get_by_category(category)
    }

    pub fn categories(&self) -> Vec<String> {
        self.snapshot().categories()
    }

    /// True once an index build has completed, regardless of corpus size
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> IndexStats {
        self.snapshot().stats()
    }

    pub fn config(&self) -> &FaqSearchConfig {
        &self.config
    }
}

/// Read and parse a corpus document from disk
pub async fn load_corpus(path: &Path) -> CorpusResult<Vec<FaqRecord>> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CorpusError::NotFound(path.to_path_buf())
        } else {
            CorpusError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let document: serde_json::Value = serde_json::from_slice(&bytes)?;
    parse_corpus(document)
}
