use super::lists::CuratedLists;
use super::syntax::{extract_domain, extract_local_part};

/// Local-part fragments that mark an automated or departmental sender even
/// inside longer names such as `MyVodafone.no-reply@vodafone.ro`.
pub const ROLE_BASED_FRAGMENTS: [&str; 3] = ["no-reply", "noreply", "sales@"];

/// Checks whether an address belongs to a role rather than a person.
///
/// An address is role-based when its domain is one of the curated placeholder
/// domains, its local part contains one of [`ROLE_BASED_FRAGMENTS`], or its
/// local part is exactly one of the curated role names.
///
/// # Examples
/// ```
/// use email_list_cleaner::handlers::validation::lists::CuratedLists;
/// use email_list_cleaner::handlers::validation::role_based::is_role_based;
///
/// let lists = CuratedLists::builtin().unwrap();
/// assert!(is_role_based("admin@acme-corp.com", &lists));
/// assert!(!is_role_based("jane.doe@acme-corp.com", &lists));
/// ```
pub fn is_role_based(address: &str, lists: &CuratedLists) -> bool {
    let domain = extract_domain(address).to_lowercase();
    let local_part = extract_local_part(address).to_lowercase();

    if lists.role_based_domains.contains(&domain) {
        return true;
    }

    if ROLE_BASED_FRAGMENTS
        .iter()
        .any(|fragment| local_part.contains(fragment))
    {
        return true;
    }

    lists.role_based_emails.contains(&local_part)
}
