use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub problem: String,
    pub question: String,
}

impl ProblemRecord {
    pub fn new<P: Into<String>, Q: Into<String>>(problem: P, question: Q) -> Self {
        ProblemRecord {
            problem: problem.into(),
            question: question.into(),
        }
    }
}

/// Year key (`"1967"`, `"1958_february"`, ...) to the records found under it,
/// in page-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemArchive(BTreeMap<String, Vec<ProblemRecord>>);

impl ProblemArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bucket for `year`, creating an empty one if needed.
    pub fn bucket_mut<Y: Into<String>>(&mut self, year: Y) -> &mut Vec<ProblemRecord> {
        self.0.entry(year.into()).or_default()
    }

    pub fn bucket(&self, year: &str) -> Option<&[ProblemRecord]> {
        self.0.get(year).map(Vec::as_slice)
    }

    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<ProblemRecord>> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, String, Vec<ProblemRecord>> {
        self.0.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_archive_shape() {
        let mut archive = ProblemArchive::new();
        assert!(archive.is_empty());
        archive
            .bucket_mut("1967")
            .push(ProblemRecord::new("Prove it.", "A1"));
        archive.bucket_mut("1958_february");

        let json = serde_json::to_value(&archive).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "1958_february": [],
                "1967": [{ "problem": "Prove it.", "question": "A1" }]
            })
        );

        let back: ProblemArchive = serde_json::from_value(json).unwrap();
        assert_eq!(back, archive);
        assert_eq!(back.record_count(), 1);
    }
}
