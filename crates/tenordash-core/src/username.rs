use std::sync::LazyLock;

use regex::Regex;

use crate::CoreError;

/// Profile URL prefixes users paste into the dashboard.
const PROFILE_PREFIXES: &[&str] = &[
    "https://tenor.com/users/",
    "http://tenor.com/users/",
    "https://www.tenor.com/users/",
    "http://www.tenor.com/users/",
    "tenor.com/users/",
];

static PROFILE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"users/([^/?#\s]+)").expect("valid profile path regex"));

/// Pulls the bare handle out of a profile URL, or returns the input untouched
/// when it is not a profile URL.
///
/// The handle ends at the first `/`, `?` or `#`, so share links and profile
/// sub-pages resolve to the same user.
///
/// Case is preserved; [`UsernameKey::parse`] lower-cases.
#[must_use]
pub fn extract_username(input: &str) -> &str {
    let trimmed = input.trim();
    for prefix in PROFILE_PREFIXES {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            return rest.split(['/', '?', '#']).next().unwrap_or_default();
        }
    }
    PROFILE_PATH
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map_or(trimmed, |m| m.as_str())
}

/// Lower-cased Tenor handle used to pick the per-user database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsernameKey(String);

impl UsernameKey {
    /// Derives the key from a profile URL or raw handle.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyUsername`] when nothing is left after the
    /// prefix is stripped.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let key = extract_username(input).trim().to_lowercase();
        if key.is_empty() {
            return Err(CoreError::EmptyUsername);
        }
        Ok(Self(key))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UsernameKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-user database name, `<prefix>_<username>`.
#[must_use]
pub fn database_name(prefix: &str, key: &UsernameKey) -> String {
    format!("{prefix}_{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_url_is_stripped_and_lowercased() {
        let key = UsernameKey::parse("https://tenor.com/users/Foo").expect("key");
        assert_eq!(key.as_str(), "foo");
    }

    #[test]
    fn raw_handle_passes_through() {
        let key = UsernameKey::parse("  SwissMote ").expect("key");
        assert_eq!(key.as_str(), "swissmote");
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let key = UsernameKey::parse("https://tenor.com/users/swissmote/").expect("key");
        assert_eq!(key.as_str(), "swissmote");
    }

    #[test]
    fn localized_profile_path_uses_last_segment() {
        assert_eq!(
            extract_username("https://tenor.com/en-GB/users/Bar"),
            "Bar"
        );
    }

    #[test]
    fn share_link_query_and_fragment_are_dropped() {
        let key = UsernameKey::parse("https://tenor.com/users/Foo?utm_source=share").expect("key");
        assert_eq!(key.as_str(), "foo");
        assert_eq!(extract_username("tenor.com/users/foo#top"), "foo");
    }

    #[test]
    fn profile_sub_page_resolves_to_user() {
        let key = UsernameKey::parse("https://tenor.com/users/foo/gifs").expect("key");
        assert_eq!(key.as_str(), "foo");
        assert_eq!(
            extract_username("https://tenor.com/en-GB/users/Bar/gifs?page=2"),
            "Bar"
        );
    }

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(UsernameKey::parse("   "), Err(CoreError::EmptyUsername));
        assert_eq!(
            UsernameKey::parse("https://tenor.com/users/"),
            Err(CoreError::EmptyUsername)
        );
    }

    #[test]
    fn database_name_joins_prefix_and_key() {
        let key = UsernameKey::parse("swissmote").expect("key");
        assert_eq!(
            database_name("tenor_database", &key),
            "tenor_database_swissmote"
        );
    }
}
