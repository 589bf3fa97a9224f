//! # Subdomain Allocator
//!
//! Pure functions for deriving and validating the label a store lives under.
//!
//! - [`allocate`] turns a display name into `slug-xxxxxx`, where `xxxxxx` is 3 bytes of
//!   cryptographically random entropy in hex. Collisions are still possible; the store
//!   actor rejects them when the store is inserted.
//! - [`validate_format`] is a syntactic check only. It never consults the registry.

use rand::{CryptoRng, RngCore};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Longest slug kept from the display name, before the random suffix.
pub const MAX_SLUG_LEN: usize = 15;

/// Random bytes appended to every allocated subdomain (rendered as twice as many hex chars).
pub const SUFFIX_BYTES: usize = 3;

pub const MIN_LEN: usize = 3;
pub const MAX_LEN: usize = 63;

/// Labels that belong to the platform itself.
pub const RESERVED: [&str; 4] = ["www", "api", "admin", "mail"];

/// Used when nothing of the display name survives slugging ("!!!", "日本").
const FALLBACK_SLUG: &str = "store";

static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").expect("subdomain pattern compiles")
});

/// Why a candidate subdomain was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubdomainError {
    #[error("subdomain must be at least {MIN_LEN} characters")]
    TooShort,
    #[error("subdomain must be at most {MAX_LEN} characters")]
    TooLong,
    #[error("subdomain may only contain lowercase letters, digits and inner hyphens")]
    InvalidCharacters,
    #[error("subdomain '{0}' is reserved")]
    Reserved(String),
}

/// Derives a subdomain from a display name using the thread-local CSPRNG.
pub fn allocate(name: &str) -> String {
    allocate_with(name, &mut rand::thread_rng())
}

/// Derives a subdomain from a display name using the given random source.
///
/// Lowercases, maps everything outside `[a-z0-9]` to `-`, collapses and trims hyphens,
/// truncates to [`MAX_SLUG_LEN`], then appends `-` and the hex suffix. The result always
/// passes [`validate_format`].
pub fn allocate_with<R>(name: &str, rng: &mut R) -> String
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut suffix = [0u8; SUFFIX_BYTES];
    rng.fill_bytes(&mut suffix);
    let hex: String = suffix.iter().map(|b| format!("{b:02x}")).collect();
    format!("{}-{}", slugify(name), hex)
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_end_matches('-');

    // ASCII only at this point, so byte and char positions agree.
    let slug = &trimmed[..trimmed.len().min(MAX_SLUG_LEN)];
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Checks a candidate against the label grammar, the length bounds and the reserved set.
pub fn validate_format(candidate: &str) -> Result<(), SubdomainError> {
    if candidate.len() < MIN_LEN {
        return Err(SubdomainError::TooShort);
    }
    if candidate.len() > MAX_LEN {
        return Err(SubdomainError::TooLong);
    }
    if !LABEL.is_match(candidate) {
        return Err(SubdomainError::InvalidCharacters);
    }
    if RESERVED.contains(&candidate) {
        return Err(SubdomainError::Reserved(candidate.to_string()));
    }
    Ok(())
}

pub fn is_valid(candidate: &str) -> bool {
    validate_format(candidate).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn suffix_of(subdomain: &str) -> &str {
        &subdomain[subdomain.len() - SUFFIX_BYTES * 2..]
    }

    #[test]
    fn test_allocate_slugs_display_name() {
        let subdomain = allocate("Jane's Bakery!!");
        assert!(subdomain.starts_with("jane-s-bakery-"), "got {subdomain}");
        assert_eq!(subdomain.len(), "jane-s-bakery-".len() + 6);
        assert!(suffix_of(&subdomain).chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_allocate_collapses_and_trims_hyphens() {
        let subdomain = allocate("  --Hello,,   World--  ");
        assert!(subdomain.starts_with("hello-world-"), "got {subdomain}");
    }

    #[test]
    fn test_allocate_truncates_slug() {
        let subdomain = allocate("The Quick Brown Fox Jumps");
        assert!(subdomain.starts_with("the-quick-brown-"), "got {subdomain}");
        assert_eq!(subdomain.len(), MAX_SLUG_LEN + 1 + SUFFIX_BYTES * 2);
    }

    #[test]
    fn test_allocate_is_deterministic_for_seeded_source() {
        let a = allocate_with("Corner Shop", &mut StdRng::seed_from_u64(7));
        let b = allocate_with("Corner Shop", &mut StdRng::seed_from_u64(7));
        let c = allocate_with("Corner Shop", &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_allocate_always_yields_valid_subdomain() {
        let long = "x".repeat(200);
        let names = [
            "a",
            "A",
            "!!!",
            "",
            "日本のお店",
            "Café Olé",
            long.as_str(),
            "abcdefghijklmn-opq",
            "www",
            "--",
            "123",
        ];
        let mut rng = StdRng::seed_from_u64(42);
        for name in names {
            let subdomain = allocate_with(name, &mut rng);
            assert_eq!(
                validate_format(&subdomain),
                Ok(()),
                "allocate({name:?}) produced {subdomain}"
            );
        }
    }

    #[test]
    fn test_allocate_falls_back_when_nothing_survives() {
        assert!(allocate("!!!").starts_with("store-"));
        assert!(allocate("日本").starts_with("store-"));
    }

    #[test]
    fn test_validate_accepts_well_formed_labels() {
        for ok in ["abc", "my-shop", "shop123", "a1b", "a".repeat(63).as_str()] {
            assert_eq!(validate_format(ok), Ok(()), "{ok} should be valid");
        }
    }

    #[test]
    fn test_validate_rejects_bad_length() {
        assert_eq!(validate_format("ab"), Err(SubdomainError::TooShort));
        assert_eq!(validate_format(""), Err(SubdomainError::TooShort));
        assert_eq!(
            validate_format(&"a".repeat(64)),
            Err(SubdomainError::TooLong)
        );
    }

    #[test]
    fn test_validate_rejects_bad_characters() {
        for bad in ["-abc", "abc-", "ab_c", "ABC", "a.bc", "shop!", "héllo"] {
            assert_eq!(
                validate_format(bad),
                Err(SubdomainError::InvalidCharacters),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_rejects_reserved() {
        for reserved in RESERVED {
            assert_eq!(
                validate_format(reserved),
                Err(SubdomainError::Reserved(reserved.to_string()))
            );
        }
        assert!(is_valid("www2"));
    }
}
