use once_cell::sync::Lazy;
use regex::Regex;

/// Shortest and longest local part accepted by the shape checks.
pub const LOCAL_PART_LEN: (usize, usize) = (3, 32);
/// Shortest and longest domain accepted by the shape checks.
pub const DOMAIN_LEN: (usize, usize) = (5, 128);

static FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("address format pattern is valid")
});

/// Returns the substring before the first `@`, or an empty string when there is none.
pub fn extract_local_part(address: &str) -> &str {
    address.split_once('@').map(|(local, _)| local).unwrap_or("")
}

/// Returns the substring after the first `@`, or an empty string when there is none.
pub fn extract_domain(address: &str) -> &str {
    address.split_once('@').map(|(_, domain)| domain).unwrap_or("")
}

/// Checks an address against the conservative address grammar.
///
/// The grammar is deliberately narrow: one or more of `[A-Za-z0-9._%+-]`, an `@`,
/// a domain of `[A-Za-z0-9.-]`, and a top-level label of at least two letters.
/// Quoted local parts, domain literals and internationalized names are rejected.
///
/// # Examples
/// ```
/// use email_list_cleaner::handlers::validation::syntax::is_valid_format;
///
/// assert!(is_valid_format("user.name+tag@example.com"));
/// assert!(!is_valid_format("\"quoted\"@example.com"));
/// assert!(!is_valid_format("user@localhost"));
/// ```
pub fn is_valid_format(address: &str) -> bool {
    FORMAT.is_match(address)
}

/// Runs the length and shape checks on an address that already passed [`is_valid_format`].
///
/// Returns the message of the first violated check, or `None` when the address passes.
pub fn shape_violation(address: &str) -> Option<String> {
    let local_part = extract_local_part(address);
    let domain = extract_domain(address);
    let (local_min, local_max) = LOCAL_PART_LEN;
    let (domain_min, domain_max) = DOMAIN_LEN;

    if local_part.len() < local_min || local_part.len() > local_max {
        return Some(format!(
            "local part must be between {} and {} characters",
            local_min, local_max
        ));
    }

    if domain.len() < domain_min || domain.len() > domain_max {
        return Some(format!(
            "domain must be between {} and {} characters",
            domain_min, domain_max
        ));
    }

    let starts_alnum = local_part
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric());
    let ends_alnum = local_part
        .chars()
        .last()
        .is_some_and(|c| c.is_ascii_alphanumeric());
    if !starts_alnum || !ends_alnum {
        return Some("local part cannot start or end with a non-alphanumeric character".to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_parts_at_first_at_sign() {
        assert_eq!(extract_local_part("jane@acme.io"), "jane");
        assert_eq!(extract_domain("jane@acme.io"), "acme.io");
        assert_eq!(extract_local_part("a@b@c.com"), "a");
        assert_eq!(extract_domain("a@b@c.com"), "b@c.com");
    }

    #[test]
    fn missing_at_sign_yields_empty_parts() {
        assert_eq!(extract_local_part("no-at-sign"), "");
        assert_eq!(extract_domain("no-at-sign"), "");
        assert_eq!(extract_local_part(""), "");
        assert_eq!(extract_domain(""), "");
    }

    #[test]
    fn valid_formats() {
        assert!(is_valid_format("simple@example.com"));
        assert!(is_valid_format("very.common@example.com"));
        assert!(is_valid_format("x@example.com"));
        assert!(is_valid_format("user%tag@sub.domain.co.uk"));
        assert!(is_valid_format("USER@EXAMPLE.COM"));
        assert!(is_valid_format("-dash-@ex-ample.io"));
    }

    #[test]
    fn invalid_formats() {
        assert!(!is_valid_format(""));
        assert!(!is_valid_format("   "));
        assert!(!is_valid_format("missing.example.com"));
        assert!(!is_valid_format("@missing.com"));
        assert!(!is_valid_format("user@"));
        assert!(!is_valid_format("user@localhost"));
        assert!(!is_valid_format("user@example.c"));
        assert!(!is_valid_format("user@example.c0m"));
        assert!(!is_valid_format("user@@example.com"));
        assert!(!is_valid_format("user name@example.com"));
        assert!(!is_valid_format(" user@example.com"));
        assert!(!is_valid_format("Pelé@exämple.com"));
        assert!(!is_valid_format("user@[192.168.0.1]"));
        assert!(!is_valid_format("!#$@example.com"));
    }

    #[test]
    fn shape_accepts_ordinary_address() {
        assert_eq!(shape_violation("jane.doe@acme-corp.com"), None);
    }

    #[test]
    fn shape_rejects_local_part_length() {
        let expected = Some("local part must be between 3 and 32 characters".to_string());
        assert_eq!(shape_violation("ab@acme-corp.com"), expected);
        let long_local = format!("{}@acme-corp.com", "a".repeat(33));
        assert_eq!(shape_violation(&long_local), expected);

        assert_eq!(shape_violation("abc@acme-corp.com"), None);
        let max_local = format!("{}@acme-corp.com", "a".repeat(32));
        assert_eq!(shape_violation(&max_local), None);
    }

    #[test]
    fn shape_rejects_domain_length() {
        let expected = Some("domain must be between 5 and 128 characters".to_string());
        assert_eq!(shape_violation("jane@a.io"), expected);
        let long_domain = format!("jane@{}.com", "d".repeat(125));
        assert_eq!(shape_violation(&long_domain), expected);

        assert_eq!(shape_violation("jane@ab.io"), None);
    }

    #[test]
    fn shape_rejects_symbol_at_local_part_edges() {
        let expected =
            Some("local part cannot start or end with a non-alphanumeric character".to_string());
        assert_eq!(shape_violation(".jane@acme-corp.com"), expected);
        assert_eq!(shape_violation("jane_@acme-corp.com"), expected);
        assert_eq!(shape_violation("j.a-ne@acme-corp.com"), None);
    }

    #[test]
    fn shape_reports_first_violation_only() {
        // Both too short and symbol-edged: the length message wins.
        assert_eq!(
            shape_violation("_a@acme-corp.com"),
            Some("local part must be between 3 and 32 characters".to_string())
        );
    }
}
