//! TF-IDF vector space over the FAQ corpus

use crate::search::document::{FaqRecord, SearchDocument, SearchResult};
use crate::search::text::{extract_terms, preprocess};
use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Index statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of indexed FAQ records
    pub total_documents: usize,

    /// Number of terms in the capped vocabulary
    pub vocabulary_size: usize,

    /// When this index was built
    pub built_at: DateTime<Utc>,
}

/// Immutable TF-IDF index over a FAQ corpus.
///
/// Each document is the record's question, answer and keywords. Terms are
/// unigrams and bigrams after stopword removal; the vocabulary keeps the
/// `max_features` most frequent terms across the corpus. Document rows hold
/// `count * idf` and are L2-normalised, so a query's score against a
/// document is the cosine of their vectors, in [0, 1].
#[derive(Debug, Clone)]
pub struct FaqIndex {
    records: Vec<FaqRecord>,
    vocabulary: HashMap<String, usize>,
    idf: Array1<f64>,
    /// documents x vocabulary
    matrix: Array2<f64>,
    built_at: DateTime<Utc>,
}

impl FaqIndex {
    /// Build an index; record order is preserved and used for tie-breaking.
    pub fn build(records: Vec<FaqRecord>, max_features: usize) -> Self {
        let documents: Vec<Vec<String>> = records
            .iter()
            .map(|record| extract_terms(&record.searchable_text()))
            .collect();

        let vocabulary = select_vocabulary(&documents, max_features);
        let idf = inverse_document_frequency(&documents, &vocabulary);

        let mut matrix = Array2::<f64>::zeros((documents.len(), vocabulary.len()));
        for (row, terms) in documents.iter().enumerate() {
            for term in terms {
                if let Some(&column) = vocabulary.get(term) {
                    matrix[[row, column]] += 1.0;
                }
            }
        }
        matrix *= &idf;
        for mut row in matrix.rows_mut() {
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row /= norm;
            }
        }

        tracing::debug!(
            documents = records.len(),
            vocabulary = vocabulary.len(),
            "Built FAQ TF-IDF index"
        );

        Self {
            records,
            vocabulary,
            idf,
            matrix,
            built_at: Utc::now(),
        }
    }

    /// An index over no documents; every search returns nothing.
    pub fn empty() -> Self {
        Self::build(Vec::new(), 0)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_documents: self.records.len(),
            vocabulary_size: self.vocabulary.len(),
            built_at: self.built_at,
        }
    }

    /// Project free text into the index's vector space (L2-normalised).
    ///
    /// Out-of-vocabulary terms are ignored; text with no known term maps to
    /// the zero vector.
    pub fn vectorize(&self, text: &str) -> Array1<f64> {
        let mut vector = Array1::<f64>::zeros(self.vocabulary.len());
        for term in extract_terms(text) {
            if let Some(&column) = self.vocabulary.get(&term) {
                vector[column] += 1.0;
            }
        }
        vector *= &self.idf;

        let norm = vector.dot(&vector).sqrt();
        if norm > 0.0 {
            vector /= norm;
        }
        vector
    }

    /// Cosine similarity of `query` against every document, in record order.
    pub fn scores(&self, query: &str) -> Array1<f64> {
        let query_vector = self.vectorize(query);
        self.matrix
            .dot(&query_vector)
            .mapv(|score| score.clamp(0.0, 1.0))
    }

    /// Rank documents against `query`.
    ///
    /// Keeps scores strictly above `threshold`, sorts descending (stable, so
    /// equal scores stay in corpus order) and truncates to `top_k`. An empty
    /// or punctuation-only query yields no results.
    pub fn search(&self, query: &str, top_k: usize, threshold: f64) -> Vec<SearchResult> {
        if self.records.is_empty() || top_k == 0 || preprocess(query).is_empty() {
            return Vec::new();
        }

        let scores = self.scores(query);
        let mut ranked: Vec<(usize, f64)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, score)| score > threshold)
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranked
            .into_iter()
            .take(top_k)
            .map(|(position, score)| SearchResult {
                faq: self.records[position].clone(),
                similarity_score: score,
            })
            .collect()
    }

    /// Full corpus in load order
    pub fn get_all(&self) -> &[FaqRecord] {
        &self.records
    }

    /// Records whose category equals `category` exactly, in load order
    pub fn get_by_category(&self, category: &str) -> Vec<FaqRecord> {
        self.records
            .iter()
            .filter(|record| record.category == category)
            .cloned()
            .collect()
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.category) {
                seen.push(record.category.clone());
            }
        }
        seen
    }

    pub fn get(&self, id: usize) -> Option<&FaqRecord> {
        self.records.iter().find(|record| record.document_id() == id)
    }
}

/// Pick the `max_features` most frequent terms (ties alphabetical) and
/// number them in alphabetical order.
fn select_vocabulary(documents: &[Vec<String>], max_features: usize) -> HashMap<String, usize> {
    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for terms in documents {
        for term in terms {
            *frequency.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = frequency.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(max_features);

    let mut kept: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
    kept.sort_unstable();

    kept.into_iter()
        .enumerate()
        .map(|(column, term)| (term.to_string(), column))
        .collect()
}

/// Smoothed IDF: `ln((1 + n) / (1 + df)) + 1`.
fn inverse_document_frequency(
    documents: &[Vec<String>],
    vocabulary: &HashMap<String, usize>,
) -> Array1<f64> {
    let mut document_frequency = vec![0usize; vocabulary.len()];
    for terms in documents {
        let mut seen = vec![false; vocabulary.len()];
        for term in terms {
            if let Some(&column) = vocabulary.get(term) {
                if !seen[column] {
                    seen[column] = true;
                    document_frequency[column] += 1;
                }
            }
        }
    }

    let n = documents.len() as f64;
    document_frequency
        .into_iter()
        .map(|df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faq(question: &str, answer: &str, keywords: &[&str], category: &str) -> FaqRecord {
        FaqRecord::new(
            question,
            answer,
            keywords.iter().map(|k| k.to_string()).collect(),
            category,
        )
    }

    fn corpus() -> Vec<FaqRecord> {
        crate::search::document::assign_ids(vec![
            faq(
                "How do I reset my password?",
                "Go to settings.",
                &["password", "reset"],
                "account",
            ),
            faq(
                "What services do you offer?",
                "We build websites and mobile apps.",
                &["services", "websites", "apps"],
                "services",
            ),
            faq(
                "How long does an internship last?",
                "Internships run for three to six months.",
                &["internship", "duration"],
                "training",
            ),
        ])
    }

    #[test]
    fn test_single_record_match() {
        let index = FaqIndex::build(corpus()[..1].to_vec(), 1000);
        let results = index.search("reset password", 3, 0.1);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].faq.question, "How do I reset my password?");
        assert!(results[0].similarity_score > 0.1);
        assert!(results[0].similarity_score <= 1.0);
    }

    #[test]
    fn test_best_match_ranks_first() {
        let index = FaqIndex::build(corpus(), 1000);
        let results = index.search("how long is the internship", 3, 0.0);

        assert!(!results.is_empty());
        assert_eq!(results[0].faq.category, "training");
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let index = FaqIndex::build(corpus(), 1000);
        assert!(index.search("", 3, 0.0).is_empty());
        assert!(index.search("   ", 3, 0.0).is_empty());
        assert!(index.search("?!", 3, 0.0).is_empty());
    }

    #[test]
    fn test_top_k_zero_returns_nothing() {
        let index = FaqIndex::build(corpus(), 1000);
        assert!(index.search("password", 0, 0.0).is_empty());
    }

    #[test]
    fn test_unknown_terms_score_zero() {
        let index = FaqIndex::build(corpus(), 1000);
        let scores = index.scores("zebra xylophone");
        assert!(scores.iter().all(|&s| s == 0.0));
        assert!(index.search("zebra xylophone", 3, 0.0).is_empty());
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let records = crate::search::document::assign_ids(vec![
            faq("Refund policy", "Refunds take a week.", &[], "billing"),
            faq("Refund policy", "Refunds take a week.", &[], "billing"),
        ]);
        let index = FaqIndex::build(records, 1000);
        let results = index.search("refund", 2, 0.0);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].similarity_score, results[1].similarity_score);
        assert_eq!(results[0].faq.id, 0);
        assert_eq!(results[1].faq.id, 1);
    }

    #[test]
    fn test_vocabulary_is_capped() {
        let index = FaqIndex::build(corpus(), 5);
        assert_eq!(index.vocabulary_size(), 5);

        let unbounded = FaqIndex::build(corpus(), 1000);
        assert!(unbounded.vocabulary_size() > 5);
        assert!(unbounded.contains_term("reset password"));
    }

    #[test]
    fn test_vectors_are_normalised() {
        let index = FaqIndex::build(corpus(), 1000);
        let v = index.vectorize("reset my password");
        assert!((v.dot(&v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_index() {
        let index = FaqIndex::empty();
        assert!(index.is_empty());
        assert_eq!(index.vocabulary_size(), 0);
        assert!(index.search("anything", 3, 0.0).is_empty());
        assert!(index.get_all().is_empty());
    }

    #[test]
    fn test_get_by_category_and_categories() {
        let index = FaqIndex::build(corpus(), 1000);

        let account = index.get_by_category("account");
        assert_eq!(account.len(), 1);
        assert_eq!(account[0].id, 0);
        assert!(index.get_by_category("billing").is_empty());
        assert!(index.get_by_category("Account").is_empty());

        assert_eq!(index.categories(), vec!["account", "services", "training"]);
        assert_eq!(index.get(2).map(|r| r.category.as_str()), Some("training"));
        assert!(index.get(9).is_none());
    }

    #[test]
    fn test_idf_downweights_common_terms() {
        let records = crate::search::document::assign_ids(vec![
            faq("project pricing", "cost estimate", &[], "a"),
            faq("project timeline", "delivery schedule", &[], "b"),
        ]);
        let index = FaqIndex::build(records, 1000);

        // "pricing" appears in one document, "project" in both.
        let rare = index.scores("pricing");
        let common = index.scores("project");
        assert!(rare[0] > common[0]);
    }
}
