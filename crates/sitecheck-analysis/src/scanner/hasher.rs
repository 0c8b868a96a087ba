//! Content hashing via xxh3.

use xxhash_rust::xxh3::{xxh3_64, Xxh3};

/// Compute the xxh3 64-bit hash of file content.
#[inline]
pub fn hash_content(content: &[u8]) -> u64 {
    xxh3_64(content)
}

/// Order-sensitive fingerprint over `(path, content hash)` pairs.
/// Two runs over an unchanged corpus produce the same value.
pub fn fingerprint<'a>(entries: impl IntoIterator<Item = (&'a str, u64)>) -> u64 {
    let mut hasher = Xxh3::new();
    for (path, hash) in entries {
        hasher.update(path.as_bytes());
        hasher.update(&[0]);
        hasher.update(&hash.to_le_bytes());
    }
    hasher.digest()
}
