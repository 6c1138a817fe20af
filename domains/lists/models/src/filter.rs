use regex::{Regex, RegexBuilder};
use uuid::Uuid;

use crate::ListRecord;

/// Criteria for finding list records. Empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub id: Option<Uuid>,
    pub text: Option<Regex>,
}

impl ListFilter {
    /// Compiles `pattern` as an unanchored, case-insensitive regex.
    pub fn text_pattern(pattern: &str) -> Result<Regex, regex::Error> {
        RegexBuilder::new(pattern).case_insensitive(true).build()
    }

    pub fn is_empty(&self) -> bool { self.id.is_none() && self.text.is_none() }

    pub fn matches(&self, record: &ListRecord) -> bool {
        if self.id.is_some_and(|id| id != record.id) {
            return false;
        }

        match &self.text {
            Some(pattern) => record.text().is_some_and(|t| pattern.is_match(t)),
            None => true,
        }
    }
}
