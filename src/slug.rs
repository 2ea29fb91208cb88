use std::collections::HashSet;

use crate::model::Feed;

/// Longest slug produced before a uniqueness suffix is added.
pub const MAX_SLUG_LEN: usize = 64;

/// Make a directory-safe token from a feed title.
///
/// Non-ASCII characters are dropped, every other character outside
/// `[A-Za-z0-9_]` becomes `_`, and the result is lowercased once at the end.
pub fn slugify(title: &str) -> String {
    let replaced: String = title
        .chars()
        .filter(char::is_ascii)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    replaced.to_ascii_lowercase()
}

/// Assign a unique directory slug to each feed, in input order.
///
/// Slugs are cut to [`MAX_SLUG_LEN`] bytes. Titles that slugify to nothing
/// get `feed_{n}` (1-based position) and repeated slugs get a numeric suffix.
pub fn assign_slugs(feeds: &[Feed]) -> Vec<String> {
    let mut taken = HashSet::new();
    feeds
        .iter()
        .enumerate()
        .map(|(index, feed)| {
            let mut base = slugify(feed.display_title());
            base.truncate(MAX_SLUG_LEN);
            if base.is_empty() {
                base = format!("feed_{}", index + 1);
            }

            let mut slug = base.clone();
            let mut suffix = 2;
            while taken.contains(&slug) {
                slug = format!("{}_{}", base, suffix);
                suffix += 1;
            }
            taken.insert(slug.clone());
            slug
        })
        .collect()
}

/// Join a selector root and a slug into a gopher selector.
pub fn selector_for(root: &str, slug: &str) -> String {
    if root.is_empty() {
        return slug.to_string();
    }
    format!("{}/{}", root.trim_end_matches('/'), slug)
}
