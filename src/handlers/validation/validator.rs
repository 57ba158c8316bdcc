use super::disposable::is_disposable;
use super::dnsmx::DomainLookup;
use super::heuristics::is_unlikely;
use super::lists::CuratedLists;
use super::role_based::is_role_based;
use super::syntax::{extract_domain, is_valid_format, shape_violation};
use crate::models::email::{
    ValidationOptions, Verdict, REASON_DISPOSABLE, REASON_INVALID_FORMAT, REASON_NO_MX,
    REASON_NO_WEBSITE, REASON_ROLE_BASED, REASON_UNLIKELY,
};
use std::sync::Arc;
use tracing::debug;

/// Runs the ordered check pipeline for single addresses.
///
/// Checks short-circuit on the first failure: format, shape, heuristics,
/// role-based, disposable, MX, A. Only the first failing reason is reported.
#[derive(Clone)]
pub struct EmailValidator {
    lists: Arc<CuratedLists>,
    lookup: DomainLookup,
}

impl EmailValidator {
    pub fn new(lists: Arc<CuratedLists>, lookup: DomainLookup) -> Self {
        Self { lists, lookup }
    }

    pub fn lists(&self) -> &CuratedLists {
        &self.lists
    }

    pub fn lookup(&self) -> &DomainLookup {
        &self.lookup
    }

    pub async fn validate(&self, email: &str, options: &ValidationOptions) -> Verdict {
        let mut verdict = Verdict::pending(email);

        if !is_valid_format(email) {
            debug!("{} rejected: {}", email, REASON_INVALID_FORMAT);
            return verdict.reject(REASON_INVALID_FORMAT);
        }

        if !options.allow_unlikely {
            if let Some(violation) = shape_violation(email) {
                debug!("{} rejected: {}", email, violation);
                return verdict.reject(violation);
            }
        }

        verdict.is_unlikely = is_unlikely(
            email,
            &self.lists.unlikely_patterns,
            options.max_localpart_repetition as usize,
        );
        if verdict.is_unlikely && !options.allow_unlikely {
            debug!("{} rejected: {}", email, REASON_UNLIKELY);
            return verdict.reject(REASON_UNLIKELY);
        }

        verdict.is_role_based = is_role_based(email, &self.lists);
        if verdict.is_role_based && !options.allow_role_based {
            debug!("{} rejected: {}", email, REASON_ROLE_BASED);
            return verdict.reject(REASON_ROLE_BASED);
        }

        verdict.is_disposable = is_disposable(email, &self.lists);
        if verdict.is_disposable && !options.allow_disposable {
            debug!("{} rejected: {}", email, REASON_DISPOSABLE);
            return verdict.reject(REASON_DISPOSABLE);
        }

        let domain = extract_domain(email);

        if options.check_mx {
            verdict.has_mx = self.lookup.has_mx_record(domain).await;
            if !verdict.has_mx {
                debug!("{} rejected: {}", email, REASON_NO_MX);
                return verdict.reject(REASON_NO_MX);
            }
        }

        if !options.allow_no_website_domain {
            verdict.has_a_record = self.lookup.has_a_record(domain).await;
            if !verdict.has_a_record {
                debug!("{} rejected: {}", email, REASON_NO_WEBSITE);
                return verdict.reject(REASON_NO_WEBSITE);
            }
        }

        verdict
    }
}
