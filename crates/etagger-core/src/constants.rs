/// Base64 SHA-1 digest of the empty byte sequence, truncated to
/// [`DIGEST_TRUNCATE_LEN`] characters.
pub const EMPTY_ENTITY_DIGEST: &str = "2jmj7l5rSw0yVb/vlWAYkK/YBwk";

/// Number of base64 characters kept from a 20-byte SHA-1 digest.
///
/// A 20-byte digest encodes to 28 characters, the last of which is always `=`.
/// Changing the digest algorithm means recomputing this value.
pub const DIGEST_TRUNCATE_LEN: usize = 27;

/// Marker prepended to weak validators.
pub const WEAK_PREFIX: &str = "W/";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_digest_is_truncated() {
        assert_eq!(EMPTY_ENTITY_DIGEST.len(), DIGEST_TRUNCATE_LEN);
    }
}
