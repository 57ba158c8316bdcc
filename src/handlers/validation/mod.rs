/// Format and shape checks for email addresses.
///
/// The format check is a deliberately narrow ASCII pattern
/// (`local@domain.tld`). The shape checks bound the lengths of the local part
/// and domain and reject local parts that start or end with a symbol.
///
/// # Examples
/// ```
/// use email_list_cleaner::handlers::validation::syntax::is_valid_format;
///
/// assert!(is_valid_format("user.name+tag@example.com"));
/// assert!(!is_valid_format("user@localhost"));
/// ```
pub mod syntax;

/// Curated lists (role names, role domains, disposable domains, unlikely
/// fragments) compiled into the binary from `data/`.
pub mod lists;

/// Heuristics flagging addresses that are unlikely to belong to a person.
pub mod heuristics;

/// Role-based (shared or automated) mailbox detection.
pub mod role_based;

/// Disposable mail provider detection.
pub mod disposable;

/// DNS-over-HTTPS MX / A lookups with a process-wide result cache.
///
/// Lookup failures are treated as "record present" so an unreachable
/// resolver never rejects an address.
pub mod dnsmx;

/// Canonical form of an address used for duplicate detection.
pub mod normalize;

/// The ordered check pipeline producing a [`Verdict`] per address.
///
/// [`Verdict`]: crate::models::email::Verdict
pub mod validator;
