use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

const ROLE_BASED_EMAILS: &str = include_str!("../../../data/role_based_emails.txt");
const ROLE_BASED_DOMAINS: &str = include_str!("../../../data/role_based_domains.txt");
const DISPOSABLE_DOMAINS: &str = include_str!("../../../data/disposable_domains.txt");
const UNLIKELY_PATTERNS: &str = include_str!("../../../data/unlikely_patterns.txt");

#[derive(Debug, Error, PartialEq)]
pub enum ListError {
    #[error("curated list '{list}' has no entries")]
    Empty { list: String },

    #[error("curated list '{list}' line {line}: malformed entry '{entry}'")]
    Malformed {
        list: String,
        line: usize,
        entry: String,
    },
}

/// An immutable list of lower-case entries loaded from line-oriented text.
///
/// Blank lines and lines starting with `#` are ignored. Entries must be lower-case
/// and free of whitespace; anything else is rejected at load time.
#[derive(Debug, Clone)]
pub struct CuratedList {
    name: String,
    entries: Vec<String>,
    index: HashSet<String>,
}

impl CuratedList {
    pub fn parse(name: &str, source: &str) -> Result<Self, ListError> {
        let mut entries = Vec::new();
        let mut index = HashSet::new();

        for (number, raw) in source.lines().enumerate() {
            let entry = raw.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            if entry.chars().any(|c| c.is_whitespace() || c.is_uppercase()) {
                return Err(ListError::Malformed {
                    list: name.to_string(),
                    line: number + 1,
                    entry: entry.to_string(),
                });
            }
            if index.insert(entry.to_string()) {
                entries.push(entry.to_string());
            }
        }

        if entries.is_empty() {
            return Err(ListError::Empty {
                list: name.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            entries,
            index,
        })
    }

    /// Exact membership test.
    pub fn contains(&self, candidate: &str) -> bool {
        self.index.contains(candidate)
    }

    /// True if any entry occurs as a substring of `haystack`.
    pub fn any_within(&self, haystack: &str) -> bool {
        self.entries.iter().any(|entry| haystack.contains(entry.as_str()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The four curated lists the classifier consults.
#[derive(Debug, Clone)]
pub struct CuratedLists {
    pub role_based_emails: CuratedList,
    pub role_based_domains: CuratedList,
    pub disposable_domains: CuratedList,
    pub unlikely_patterns: CuratedList,
}

impl CuratedLists {
    /// Parses the lists compiled into the binary.
    pub fn builtin() -> Result<Arc<Self>, ListError> {
        let lists = Self {
            role_based_emails: CuratedList::parse("role_based_emails", ROLE_BASED_EMAILS)?,
            role_based_domains: CuratedList::parse("role_based_domains", ROLE_BASED_DOMAINS)?,
            disposable_domains: CuratedList::parse("disposable_domains", DISPOSABLE_DOMAINS)?,
            unlikely_patterns: CuratedList::parse("unlikely_patterns", UNLIKELY_PATTERNS)?,
        };

        info!(
            "Curated lists loaded: {} role names, {} role domains, {} disposable domains, {} unlikely patterns",
            lists.role_based_emails.len(),
            lists.role_based_domains.len(),
            lists.disposable_domains.len(),
            lists.unlikely_patterns.len()
        );

        Ok(Arc::new(lists))
    }
}
