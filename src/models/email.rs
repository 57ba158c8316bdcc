use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Reason attached to every address that fails the format check.
pub const REASON_INVALID_FORMAT: &str = "invalid format";
pub const REASON_UNLIKELY: &str = "unlikely a valid email";
pub const REASON_ROLE_BASED: &str = "role-based email";
pub const REASON_DISPOSABLE: &str = "disposable email";
pub const REASON_NO_MX: &str = "no valid MX record";
pub const REASON_NO_WEBSITE: &str = "domain has no website";
/// Reason used when validating an item faulted unexpectedly.
pub const REASON_VALIDATION_ERROR: &str = "validation error";

/// Number of domains reported in [`ReportSummary::top_domains`].
pub const TOP_DOMAIN_COUNT: usize = 5;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, SimpleObject)]
pub struct AddressRecord {
    /// The raw input line, trimmed.
    pub original: String,
    pub email: String,
    /// Display name from a `Name <address>` line, empty otherwise.
    pub name: String,
}

/// Switches that relax the strict default posture of the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "ValidationOptionsInput")]
#[serde(default)]
pub struct ValidationOptions {
    /// Skip the shape checks and let heuristically unlikely addresses through.
    #[graphql(default)]
    pub allow_unlikely: bool,
    #[graphql(default)]
    pub allow_role_based: bool,
    #[graphql(default)]
    pub allow_disposable: bool,
    /// Require at least one MX record for the domain.
    #[graphql(default = true)]
    pub check_mx: bool,
    /// Skip the A record requirement.
    #[graphql(default)]
    pub allow_no_website_domain: bool,
    /// A run of this many identical characters in the local part is unlikely.
    #[graphql(default = 5)]
    pub max_localpart_repetition: u32,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            allow_unlikely: false,
            allow_role_based: false,
            allow_disposable: false,
            check_mx: true,
            allow_no_website_domain: false,
            max_localpart_repetition: 5,
        }
    }
}

/// Options for a whole list run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOptions {
    pub validation: ValidationOptions,
    /// Keep addresses whose normalized form was already accepted.
    pub allow_duplicates: bool,
}

/// Outcome of validating one address.
///
/// `reason` is set exactly when `valid` is false. Flags that were not reached
/// before a rejection keep their optimistic defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, SimpleObject)]
pub struct Verdict {
    pub email: String,
    pub valid: bool,
    pub reason: Option<String>,
    pub is_role_based: bool,
    pub is_disposable: bool,
    pub is_unlikely: bool,
    pub has_mx: bool,
    pub has_a_record: bool,
}

impl Verdict {
    pub fn pending(email: &str) -> Self {
        Self {
            email: email.to_string(),
            valid: true,
            reason: None,
            is_role_based: false,
            is_disposable: false,
            is_unlikely: false,
            has_mx: true,
            has_a_record: true,
        }
    }

    pub fn reject(mut self, reason: impl Into<String>) -> Self {
        self.valid = false;
        self.reason = Some(reason.into());
        self
    }
}

/// An [`AddressRecord`] together with the flags of its verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, SimpleObject)]
pub struct ExtendedRecord {
    pub original: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub is_role_based: bool,
    pub is_disposable: bool,
    pub is_unlikely: bool,
    pub has_mx: bool,
    pub has_a_record: bool,
}

impl ExtendedRecord {
    pub fn new(record: AddressRecord, verdict: Verdict) -> Self {
        Self {
            original: record.original,
            email: record.email,
            name: record.name,
            reason: verdict.reason,
            is_role_based: verdict.is_role_based,
            is_disposable: verdict.is_disposable,
            is_unlikely: verdict.is_unlikely,
            has_mx: verdict.has_mx,
            has_a_record: verdict.has_a_record,
        }
    }

    /// Lower-cased text after the last `@` of the address, if any.
    pub fn domain(&self) -> Option<String> {
        self.email
            .rsplit_once('@')
            .map(|(_, domain)| domain.to_lowercase())
            .filter(|domain| !domain.is_empty())
    }
}

/// A valid address dropped because its normalized form was already accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, SimpleObject)]
pub struct DuplicateRecord {
    pub original: String,
    pub email: String,
    pub normalized: String,
}

/// Accumulated result of a list run.
///
/// `total` counts every parsed input line, including duplicates and items of
/// failed chunks, so `valid_count + invalid_count` may be lower than `total`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, SimpleObject)]
pub struct BatchReport {
    pub valid: Vec<ExtendedRecord>,
    pub invalid: Vec<ExtendedRecord>,
    pub duplicates: Vec<DuplicateRecord>,
    pub total: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub duplicate_count: usize,
    /// 1-based numbers of chunks whose processing failed.
    pub failed_chunks: Vec<usize>,
    pub cancelled: bool,
}

impl BatchReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn push_valid(&mut self, record: ExtendedRecord) {
        self.valid.push(record);
        self.valid_count = self.valid.len();
    }

    pub fn push_invalid(&mut self, record: ExtendedRecord) {
        self.invalid.push(record);
        self.invalid_count = self.invalid.len();
    }

    pub fn push_duplicate(&mut self, record: DuplicateRecord) {
        self.duplicates.push(record);
        self.duplicate_count = self.duplicates.len();
    }

    /// Aggregates the report into the figures shown next to the cleaned list.
    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            valid: self.valid_count,
            ..ReportSummary::default()
        };

        for record in &self.invalid {
            match record.reason.as_deref() {
                Some(REASON_INVALID_FORMAT) => summary.invalid_format += 1,
                Some(REASON_NO_MX) => summary.no_mx_record += 1,
                _ => summary.other_invalid += 1,
            }
        }

        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut first_seen: Vec<String> = Vec::new();
        for record in self.valid.iter().chain(self.invalid.iter()) {
            if record.is_role_based {
                summary.role_based += 1;
            }
            if record.is_disposable {
                summary.disposable += 1;
            }
            if record.is_unlikely {
                summary.unlikely += 1;
            }
            if let Some(domain) = record.domain() {
                let count = counts.entry(domain.clone()).or_insert(0);
                if *count == 0 {
                    first_seen.push(domain);
                }
                *count += 1;
            }
        }

        let mut ranked: Vec<DomainCount> = first_seen
            .into_iter()
            .map(|domain| {
                let count = counts.get(&domain).copied().unwrap_or(0);
                DomainCount { domain, count }
            })
            .collect();
        // Stable sort keeps first-seen order among equal counts.
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(TOP_DOMAIN_COUNT);
        summary.top_domains = ranked;

        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, SimpleObject)]
pub struct DomainCount {
    pub domain: String,
    pub count: usize,
}

/// Category breakdown of a [`BatchReport`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, SimpleObject)]
pub struct ReportSummary {
    pub valid: usize,
    pub invalid_format: usize,
    pub no_mx_record: usize,
    pub other_invalid: usize,
    /// Flag counts span both buckets.
    pub role_based: usize,
    pub disposable: usize,
    pub unlikely: usize,
    pub top_domains: Vec<DomainCount>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmailRequest {
    pub email: String,
    #[serde(default)]
    pub options: ValidationOptions,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CleanListRequest {
    /// Newline-separated addresses, optionally as `Name <address>`.
    pub text: String,
    #[serde(default)]
    pub options: ValidationOptions,
    #[serde(default)]
    pub allow_duplicates: bool,
}

impl CleanListRequest {
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            validation: self.options.clone(),
            allow_duplicates: self.allow_duplicates,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, SimpleObject)]
pub struct CleanListResponse {
    pub report: BatchReport,
    pub summary: ReportSummary,
    /// Human-readable progress log, one entry per line.
    pub log: Vec<String>,
}
