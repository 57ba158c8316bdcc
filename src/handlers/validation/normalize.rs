/// Providers whose mailboxes ignore dots in the local part.
pub const DOT_INSENSITIVE_DOMAINS: [&str; 3] = ["gmail.com", "protonmail.com", "proton.me"];

/// Canonicalizes an address for duplicate detection.
///
/// The address is lower-cased and trimmed. Everything from the first `+` in the
/// local part is dropped for every provider, and dots are dropped from the local
/// part for [`DOT_INSENSITIVE_DOMAINS`]. Input without a local part before the
/// first `@` is returned lower-cased and trimmed but otherwise untouched, as is a
/// `+` in the very first position.
///
/// # Examples
/// ```
/// use email_list_cleaner::handlers::validation::normalize::normalize;
///
/// assert_eq!(normalize("John.Doe+promo@gmail.com"), "johndoe@gmail.com");
/// assert_eq!(normalize("a.b@otherdomain.com"), "a.b@otherdomain.com");
/// ```
pub fn normalize(address: &str) -> String {
    let lowered = address.trim().to_lowercase();

    let Some((local_part, domain)) = lowered.split_once('@') else {
        return lowered;
    };
    if local_part.is_empty() {
        return lowered;
    }

    let untagged = match local_part.find('+') {
        Some(plus) if plus > 0 => &local_part[..plus],
        _ => local_part,
    };

    let folded = if DOT_INSENSITIVE_DOMAINS.contains(&domain) {
        untagged.replace('.', "")
    } else {
        untagged.to_string()
    };

    format!("{}@{}", folded, domain)
}
