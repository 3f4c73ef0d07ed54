//! FAQ records and scored search results

use crate::search::error::{CorpusError, CorpusResult};
use serde::{Deserialize, Serialize};

/// Trait for documents that can be indexed and searched
pub trait SearchDocument {
    /// Raw text the index scores queries against
    fn searchable_text(&self) -> String;

    /// Position-based document ID
    fn document_id(&self) -> usize;
}

/// One retrievable question/answer unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqRecord {
    /// Position in the loaded corpus
    #[serde(default, skip_deserializing)]
    pub id: usize,

    pub question: String,

    pub answer: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub category: String,
}

impl FaqRecord {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        keywords: Vec<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            question: question.into(),
            answer: answer.into(),
            keywords,
            category: category.into(),
        }
    }
}

impl SearchDocument for FaqRecord {
    fn searchable_text(&self) -> String {
        format!("{} {} {}", self.question, self.answer, self.keywords.join(" "))
    }

    fn document_id(&self) -> usize {
        self.id
    }
}

/// A FAQ record paired with its similarity to a query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub faq: FaqRecord,

    /// Cosine similarity in [0, 1]; only meaningful for ranking
    pub similarity_score: f64,
}

/// Assign positional IDs in load order.
pub fn assign_ids(records: Vec<FaqRecord>) -> Vec<FaqRecord> {
    records
        .into_iter()
        .enumerate()
        .map(|(position, mut record)| {
            record.id = position;
            record
        })
        .collect()
}

/// Extract FAQ records from a corpus document of the form `{"faqs": [...]}`.
///
/// Entries that do not deserialize (missing question/answer, wrong types) are
/// skipped with a warning; the remaining records keep their relative order.
pub fn parse_corpus(document: serde_json::Value) -> CorpusResult<Vec<FaqRecord>> {
    let entries = match document {
        serde_json::Value::Object(mut map) => match map.remove("faqs") {
            Some(serde_json::Value::Array(entries)) => entries,
            _ => return Err(CorpusError::MissingFaqs),
        },
        _ => return Err(CorpusError::MissingFaqs),
    };

    let total = entries.len();
    let records: Vec<FaqRecord> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match serde_json::from_value::<FaqRecord>(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(position, error = %e, "Skipping malformed FAQ entry");
                None
            }
        })
        .collect();

    if records.len() < total {
        tracing::warn!(
            accepted = records.len(),
            skipped = total - records.len(),
            "FAQ corpus contained malformed entries"
        );
    }

    Ok(assign_ids(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_searchable_text_joins_fields() {
        let faq = FaqRecord::new(
            "How do I reset my password?",
            "Go to settings.",
            vec!["password".to_string(), "reset".to_string()],
            "account",
        );

        assert_eq!(
            faq.searchable_text(),
            "How do I reset my password? Go to settings. password reset"
        );
    }

    #[test]
    fn test_parse_corpus_skips_malformed_entries() {
        let doc = json!({
            "faqs": [
                {"question": "Q1", "answer": "A1", "keywords": ["k"], "category": "c"},
                {"question": "missing answer"},
                {"question": "Q3", "answer": "A3"},
                "not an object"
            ]
        });

        let records = parse_corpus(doc).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 0);
        assert_eq!(records[0].question, "Q1");
        assert_eq!(records[1].id, 1);
        assert_eq!(records[1].question, "Q3");
        assert!(records[1].keywords.is_empty());
        assert_eq!(records[1].category, "");
    }

    #[test]
    fn test_parse_corpus_requires_faqs_array() {
        assert!(matches!(
            parse_corpus(json!({"items": []})),
            Err(CorpusError::MissingFaqs)
        ));
        assert!(matches!(
            parse_corpus(json!([1, 2])),
            Err(CorpusError::MissingFaqs)
        ));
    }

    #[test]
    fn test_search_result_serializes_flat() {
        let result = SearchResult {
            faq: FaqRecord::new("Q", "A", vec![], "general"),
            similarity_score: 0.5,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["question"], "Q");
        assert_eq!(value["category"], "general");
        assert_eq!(value["similarity_score"], 0.5);
    }

    #[test]
    fn test_id_is_not_read_from_input() {
        let doc = json!({"faqs": [{"id": 99, "question": "Q", "answer": "A"}]});
        let records = parse_corpus(doc).unwrap();
        assert_eq!(records[0].id, 0);
    }
}
