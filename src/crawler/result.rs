use serde::ser::{Serialize, SerializeMap, Serializer};

/// Word counts in rank order, highest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedWords(Vec<(String, u64)>);

impl RankedWords {
    pub fn iter(&self) -> impl Iterator<Item = &(String, u64)> {
        self.0.iter()
    }

    /// Looks up a word's count
    pub fn get(&self, word: &str) -> Option<u64> {
        self.0.iter().find(|(w, _)| w == word).map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<(String, u64)> {
        self.0
    }
}

impl FromIterator<(String, u64)> for RankedWords {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// Serialized as a JSON object whose key order is the rank order
impl Serialize for RankedWords {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in &self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

/// Outcome of one crawl invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// The top-K words, in rank order
    pub word_counts: RankedWords,

    /// Number of distinct URLs visited
    pub urls_visited: usize,
}
