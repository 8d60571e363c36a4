//! Object-key uniqueness injection.

use crate::{UlidGenerator, UlidResult};

/// Rewrites an object key so that it is unique while keeping its apparent extension.
///
/// The key is split on `.`. When an extension is present, `_<ulid>` is appended to the
/// segment just before it; otherwise `_<ulid>` is appended to the whole key:
///
/// - `photo.jpg` -> `photo_<ulid>.jpg`
/// - `archive.tar.gz` -> `archive.tar_<ulid>.gz`
/// - `noext` -> `noext_<ulid>`
///
/// # Errors
///
/// A fresh generation stream is used for every call, so this never fails in practice; the
/// `Result` mirrors [`unique_key_with`].
pub fn unique_key(key: &str) -> UlidResult<String> {
    unique_key_with(&mut UlidGenerator::new(), key)
}

/// Same as [`unique_key`] but mints the token from a caller-owned stream, so that keys
/// rewritten in a batch sort in the order they were rewritten.
///
/// # Errors
///
/// Returns [`crate::UlidError::MonotonicOverflow`] if the stream overflows.
pub fn unique_key_with(generator: &mut UlidGenerator, key: &str) -> UlidResult<String> {
    let token = generator.generate()?.to_string();
    Ok(inject_token(key, &token))
}

fn inject_token(key: &str, token: &str) -> String {
    match key.rsplit_once('.') {
        Some((stem, extension)) => format!("{stem}_{token}.{extension}"),
        None => format!("{key}_{token}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_unique_key_with_extension() {
        let key = unique_key("photo.jpg").unwrap();
        let re = Regex::new(r"^photo_[0-9A-Z]{26}\.jpg$").unwrap();

        assert!(re.is_match(&key), "unexpected key: {key}");
    }

    #[test]
    fn test_unique_key_without_extension() {
        let key = unique_key("noext").unwrap();
        let re = Regex::new(r"^noext_[0-9A-Z]{26}$").unwrap();

        assert!(re.is_match(&key), "unexpected key: {key}");
    }

    #[test]
    fn test_unique_key_multiple_dots_targets_last_extension() {
        let key = unique_key("archive.tar.gz").unwrap();
        let re = Regex::new(r"^archive\.tar_[0-9A-Z]{26}\.gz$").unwrap();

        assert!(re.is_match(&key), "unexpected key: {key}");
    }

    #[test]
    fn test_unique_key_keeps_prefix_path() {
        let key = unique_key("users/42/avatar.webp").unwrap();
        let re = Regex::new(r"^users/42/avatar_[0-9A-Z]{26}\.webp$").unwrap();

        assert!(re.is_match(&key), "unexpected key: {key}");
    }

    #[test]
    fn test_inject_token_edge_cases() {
        assert_eq!(inject_token(".env", "T"), "_T.env");
        assert_eq!(inject_token("trailing.", "T"), "trailing_T.");
        assert_eq!(inject_token("", "T"), "_T");
    }

    #[test]
    fn test_unique_key_with_shared_stream_sorts() {
        let mut generator = UlidGenerator::with_seed(5);
        let first = unique_key_with(&mut generator, "a").unwrap();
        let second = unique_key_with(&mut generator, "a").unwrap();

        assert_ne!(first, second);
        assert!(first < second);
    }
}
