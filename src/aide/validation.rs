//! Input-shape predicates applied at the CLI boundary. The store never
//! validates; callers reject bad values before they reach it.

use once_cell::sync::Lazy;
use regex::Regex;

/// Russian-style numbers: optional `+7`/`8` prefix, optional area code in
/// parentheses, digits grouped 3-3-2-2 with optional spaces or dashes.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+7|8)?[\s-]?(\(?\d{3}\)?[\s-]?)?\d{3}[\s-]?\d{2}[\s-]?\d{2}$")
        .expect("valid phone regex")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_phone_layouts() {
        for phone in [
            "+7 912 345 67 89",
            "8 (912) 345-67-89",
            "89123456789",
            "+7-912-345-67-89",
            "345-67-89",
        ] {
            assert!(is_valid_phone(phone), "{phone} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_phones() {
        for phone in ["", "12345", "+1 912 345 67 89", "phone", "8 912 345 67 890"] {
            assert!(!is_valid_phone(phone), "{phone} should be invalid");
        }
    }

    #[test]
    fn validates_email_shape() {
        assert!(is_valid_email("ann.smith+tag@mail.example.org"));
        assert!(!is_valid_email("ann@localhost"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("ann@example.c"));
    }
}
