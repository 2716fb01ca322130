//! Paper metadata records.

use serde::{Deserialize, Serialize};

/// A research paper as materialized by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub paper_id: String,
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    /// Identifiers of cited papers. Targets need not be present in the
    /// dataset.
    #[serde(default)]
    pub citations: Vec<String>,
}

impl Paper {
    pub fn new(paper_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            paper_id: paper_id.into(),
            title: title.into(),
            abstract_text: None,
            year: None,
            citations: Vec::new(),
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = Some(text.into());
        self
    }

    pub fn citing<I, S>(mut self, cited: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.citations.extend(cited.into_iter().map(Into::into));
        self
    }

    /// Lowercased title and abstract, used for keyword topic matching.
    pub fn searchable_text(&self) -> String {
        let mut text = self.title.to_lowercase();
        text.push(' ');
        if let Some(abs) = &self.abstract_text {
            text.push_str(&abs.to_lowercase());
        }
        text
    }
}
