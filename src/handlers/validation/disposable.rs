use super::lists::CuratedLists;
use super::syntax::extract_domain;

/// Checks if an address uses a disposable-mailbox domain.
///
/// The domain must match a curated entry exactly; subdomains of a listed
/// provider are not treated as disposable.
///
/// # Example
/// ```
/// use email_list_cleaner::handlers::validation::disposable::is_disposable;
/// use email_list_cleaner::handlers::validation::lists::CuratedLists;
///
/// let lists = CuratedLists::builtin().unwrap();
/// assert!(is_disposable("example@0-00.usa.cc", &lists));
/// assert!(!is_disposable("johndoe@gmail.com", &lists));
/// ```
pub fn is_disposable(address: &str, lists: &CuratedLists) -> bool {
    let domain = extract_domain(address).to_lowercase();
    lists.disposable_domains.contains(&domain)
}
