//! Merging of per-group concept batches into one deduplicated list.

use serde::{Deserialize, Serialize};

/// A single extracted concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptRecord {
    /// The concept term.
    pub term: String,
    /// Its definition.
    pub definition: String,
}

/// Merge per-group concept batches into one deduplicated record list.
///
/// Batches are applied in order. A term seen again overwrites the earlier
/// definition (last-write-wins) but keeps its original place in the output:
/// record order is first-insertion order. The upstream parse preserves each
/// JSON object's own key order, so the result follows transcript order
/// except where a later group redefines a term.
pub fn merge_concepts(batches: Vec<Vec<(String, String)>>) -> Vec<ConceptRecord> {
    let mut records: Vec<ConceptRecord> = Vec::new();
    let mut index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for batch in batches {
        for (term, definition) in batch {
            match index.get(&term) {
                Some(&i) => records[i].definition = definition,
                None => {
                    index.insert(term.clone(), records.len());
                    records.push(ConceptRecord { term, definition });
                }
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(t, d)| (t.to_string(), d.to_string()))
            .collect()
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_concepts(vec![]).is_empty());
        assert!(merge_concepts(vec![vec![], vec![]]).is_empty());
    }

    #[test]
    fn test_merge_last_write_wins() {
        let merged = merge_concepts(vec![
            batch(&[("a", "x")]),
            batch(&[("a", "y"), ("b", "z")]),
        ]);
        assert_eq!(
            merged,
            vec![
                ConceptRecord {
                    term: "a".to_string(),
                    definition: "y".to_string()
                },
                ConceptRecord {
                    term: "b".to_string(),
                    definition: "z".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_merge_keeps_first_insertion_order() {
        let merged = merge_concepts(vec![
            batch(&[("gamma", "1"), ("alpha", "2")]),
            batch(&[("beta", "3"), ("gamma", "updated")]),
        ]);
        let terms: Vec<&str> = merged.iter().map(|r| r.term.as_str()).collect();
        assert_eq!(terms, vec!["gamma", "alpha", "beta"]);
        assert_eq!(merged[0].definition, "updated");
    }
}
