//! Origin allow-list loading.
//!
//! Configuration arrives as comma-separated strings, possibly from several
//! tiers (a list variable, a legacy single-URL variable, built-in defaults).
//! The first tier that yields an entry wins. Entries are normalized the same
//! way incoming `Origin` headers are, so matching is a plain set lookup.

use std::collections::HashSet;
use url::Url;

/// Strip surrounding whitespace and trailing slashes.
///
/// Returns `None` when nothing is left. Idempotent.
pub fn normalize_origin(value: &str) -> Option<&str> {
    let normalized = value.trim().trim_end_matches('/');
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Immutable set of origins permitted to make cross-origin requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginAllowList {
    /// First-seen order, for logging.
    ordered: Vec<String>,
    members: HashSet<String>,
    from_defaults: bool,
}

impl OriginAllowList {
    /// Build the list from ordered configuration tiers.
    ///
    /// Each source is a comma-separated list. The first source producing at
    /// least one entry is used; when none does, `defaults` are used instead.
    /// Never fails: garbage degrades to the defaults (or to an empty list,
    /// which denies every cross-origin request).
    pub fn load<'a, I>(sources: I, defaults: &[&str]) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        for raw in sources.into_iter().flatten() {
            let list = Self::parse(raw);
            if !list.is_empty() {
                return list;
            }
        }

        let mut list = Self::from_entries(defaults.iter().copied());
        list.from_defaults = true;
        list
    }

    /// Parse a single comma-separated source.
    pub fn parse(raw: &str) -> Self {
        Self::from_entries(raw.split(','))
    }

    fn from_entries<'a>(entries: impl Iterator<Item = &'a str>) -> Self {
        let mut list = Self::default();
        for entry in entries.filter_map(normalize_origin) {
            if !looks_like_origin(entry) {
                tracing::warn!(
                    entry,
                    "allow-list entry is not a bare http(s) origin; browsers will never send it verbatim"
                );
            }
            if list.members.insert(entry.to_string()) {
                list.ordered.push(entry.to_string());
            }
        }
        list
    }

    /// Membership test. `origin` is normalized before lookup.
    pub fn contains(&self, origin: &str) -> bool {
        normalize_origin(origin)
            .map(|o| self.members.contains(o))
            .unwrap_or(false)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// True when no configured source produced an entry and the built-in
    /// defaults were used.
    pub fn is_default(&self) -> bool {
        self.from_defaults
    }
}

/// An origin is `scheme://host[:port]` with a non-default port, lower-case
/// host and nothing else. Anything else can never equal a browser `Origin`.
fn looks_like_origin(entry: &str) -> bool {
    match Url::parse(entry) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            url.origin().ascii_serialization() == entry
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_whitespace_and_slashes() {
        assert_eq!(normalize_origin(" https://a.com/ "), Some("https://a.com"));
        assert_eq!(normalize_origin("https://a.com//"), Some("https://a.com"));
        assert_eq!(normalize_origin("https://a.com"), Some("https://a.com"));
        assert_eq!(normalize_origin("  "), None);
        assert_eq!(normalize_origin("/"), None);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["https://a.com/", " http://localhost:3000 ", "https://b.com"] {
            let once = normalize_origin(raw).unwrap();
            assert_eq!(normalize_origin(once), Some(once));
        }
    }

    #[test]
    fn test_parse_trims_and_deduplicates() {
        let list = OriginAllowList::parse("https://a.com, https://b.com ,https://a.com");
        assert_eq!(list.len(), 2);
        assert!(list.contains("https://a.com"));
        assert!(list.contains("https://b.com"));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn test_parse_treats_slashed_and_unslashed_as_one_entry() {
        let list = OriginAllowList::parse("https://a.com/,https://a.com");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_parse_drops_empty_entries() {
        let list = OriginAllowList::parse(" , ,https://a.com,,");
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["https://a.com"]);
        assert!(!list.contains(""));
    }

    #[test]
    fn test_load_empty_source_falls_back_to_defaults() {
        let list = OriginAllowList::load([Some("")], &["http://localhost:3000"]);
        assert!(list.is_default());
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_load_with_no_defaults_is_empty() {
        let list = OriginAllowList::load([None, Some(" , ")], &[]);
        assert!(list.is_empty());
        assert!(list.is_default());
    }

    #[test]
    fn test_load_prefers_first_non_empty_tier() {
        let list = OriginAllowList::load(
            [Some(" "), Some("https://legacy.example"), Some("https://later.example")],
            &["http://localhost:3000"],
        );
        assert!(!list.is_default());
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["https://legacy.example"]);
    }

    #[test]
    fn test_load_first_tier_shadows_later_tiers() {
        let list = OriginAllowList::load(
            [Some("https://a.com,https://b.com"), Some("https://legacy.example")],
            &[],
        );
        assert_eq!(list.len(), 2);
        assert!(!list.contains("https://legacy.example"));
    }

    #[test]
    fn test_malformed_entries_are_kept_verbatim() {
        // Exact matching still applies; the loader only warns.
        let list = OriginAllowList::parse("*,not a url");
        assert!(list.contains("*"));
        assert!(list.contains("not a url"));
        assert!(!list.contains("https://anything.example"));
    }

    #[test]
    fn test_looks_like_origin() {
        assert!(looks_like_origin("http://localhost:3000"));
        assert!(looks_like_origin("https://shop.example.com"));
        assert!(!looks_like_origin("https://shop.example.com/path"));
        assert!(!looks_like_origin("https://shop.example.com:443"));
        assert!(!looks_like_origin("https://Shop.example.com"));
        assert!(!looks_like_origin("ftp://files.example.com"));
        assert!(!looks_like_origin("*"));
    }
}
