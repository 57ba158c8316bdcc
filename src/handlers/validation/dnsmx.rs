use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Public resolver used when no endpoint is configured.
pub const DEFAULT_DOH_ENDPOINT: &str = "https://dns.google/resolve";

static IPV4_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("IPv4 pattern is valid")
});

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("DNS-over-HTTPS request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("DNS-over-HTTPS resolver answered with status {0}")]
    Status(u16),

    #[error("DNS-over-HTTPS response could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Mx,
    A,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Mx => "MX",
            RecordKind::A => "A",
        }
    }

    /// Numeric resource record type as it appears in resolver answers.
    pub fn code(self) -> u16 {
        match self {
            RecordKind::Mx => 15,
            RecordKind::A => 1,
        }
    }

    fn cache_prefix(self) -> &'static str {
        match self {
            RecordKind::Mx => "mx_",
            RecordKind::A => "a_",
        }
    }
}

/// One entry of the `Answer` array of a JSON DNS response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DnsAnswer {
    #[serde(rename = "type")]
    pub record_type: u16,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Deserialize)]
struct DohResponse {
    #[serde(rename = "Answer", default)]
    answer: Vec<DnsAnswer>,
}

/// Source of DNS answers for the lookup service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, domain: &str, kind: RecordKind) -> Result<Vec<DnsAnswer>, LookupError>;
}

/// Resolver speaking the JSON flavour of DNS-over-HTTPS
/// (`GET <endpoint>?name=<domain>&type=MX|A`).
pub struct DohResolver {
    client: reqwest::Client,
    endpoint: String,
}

impl DohResolver {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DnsResolver for DohResolver {
    async fn resolve(&self, domain: &str, kind: RecordKind) -> Result<Vec<DnsAnswer>, LookupError> {
        debug!("DoH {} lookup for {} via {}", kind.as_str(), domain, self.endpoint);

        let query_params = [("name", domain), ("type", kind.as_str())];
        let response = self
            .client
            .get(&self.endpoint)
            .query(&query_params)
            .header("Accept", "application/dns-json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: DohResponse =
            serde_json::from_str(&body).map_err(|e| LookupError::Decode(e.to_string()))?;

        Ok(parsed.answer)
    }
}

/// Append-only map from `mx_<domain>` / `a_<domain>` to the lookup outcome.
///
/// Each key holds one slot that is filled at most once. Concurrent misses on the
/// same key wait for the first lookup instead of issuing their own. A failed
/// lookup leaves the slot empty so the next caller retries.
#[derive(Debug, Default)]
pub struct DomainCache {
    entries: RwLock<HashMap<String, Arc<OnceCell<bool>>>>,
}

impl DomainCache {
    pub fn get(&self, key: &str) -> Option<bool> {
        let entries = self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(key).and_then(|slot| slot.get().copied())
    }

    /// Returns the cached value for `key`, running `init` only if no caller has
    /// stored one yet. Errors from `init` are returned and nothing is stored.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: &str, init: F) -> Result<bool, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<bool, E>>,
    {
        let slot = self.slot(key);
        slot.get_or_try_init(init).await.copied()
    }

    fn slot(&self, key: &str) -> Arc<OnceCell<bool>> {
        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(entries.entry(key.to_string()).or_default())
    }

    /// Number of keys holding a value.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cached MX / A record existence checks.
///
/// Lookups fail open: when the resolver errors (network failure, non-2xx status,
/// undecodable body, timeout) the check reports the record as present and the
/// outcome is not cached. A third party cannot tell for certain that a domain is
/// dead, so an inconclusive lookup never rejects an address. This is notably
/// permissive and intentional.
#[derive(Clone)]
pub struct DomainLookup {
    resolver: Arc<dyn DnsResolver>,
    cache: Arc<DomainCache>,
}

impl DomainLookup {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self {
            resolver,
            cache: Arc::new(DomainCache::default()),
        }
    }

    pub fn cache(&self) -> &DomainCache {
        &self.cache
    }

    /// True if the domain publishes at least one MX record.
    pub async fn has_mx_record(&self, domain: &str) -> bool {
        self.check(domain, RecordKind::Mx).await
    }

    /// True if the domain publishes at least one A record holding a dotted-quad address.
    pub async fn has_a_record(&self, domain: &str) -> bool {
        self.check(domain, RecordKind::A).await
    }

    async fn check(&self, domain: &str, kind: RecordKind) -> bool {
        let key = format!("{}{}", kind.cache_prefix(), domain);
        if let Some(cached) = self.cache.get(&key) {
            debug!("Domain cache hit for {}", key);
            return cached;
        }
        debug!("Domain cache miss for {}", key);

        let outcome = self
            .cache
            .get_or_try_insert_with(&key, || async {
                let answers = self.resolver.resolve(domain, kind).await?;
                Ok::<_, LookupError>(record_present(&answers, kind))
            })
            .await;

        match outcome {
            Ok(present) => present,
            Err(e) => {
                warn!(
                    "{} lookup for {} failed, treating record as present: {}",
                    kind.as_str(),
                    domain,
                    e
                );
                true
            }
        }
    }
}

/// Decides record existence from resolver answers.
///
/// Any answer at all counts for MX. For A, at least one answer must be of type 1
/// with a dotted-quad address.
pub fn record_present(answers: &[DnsAnswer], kind: RecordKind) -> bool {
    match kind {
        RecordKind::Mx => !answers.is_empty(),
        RecordKind::A => answers.iter().any(|answer| {
            answer.record_type == RecordKind::A.code() && IPV4_LITERAL.is_match(&answer.data)
        }),
    }
}
