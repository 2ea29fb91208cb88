use chrono::{DateTime, Utc};

/// Title used when a feed has neither a title nor a link.
pub const UNTITLED_FEED: &str = "Untitled feed";

/// Syndication format a feed was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedFormat {
    Rss,
    Atom,
    #[default]
    Unknown,
}

impl FeedFormat {
    /// Label used in the attribution line of a single-feed gophermap.
    pub fn label(self) -> &'static str {
        match self {
            FeedFormat::Rss => "RSS feed",
            FeedFormat::Atom => "Atom feed",
            FeedFormat::Unknown => "Unknown feed type",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub format: FeedFormat,
    pub entries: Vec<Entry>,
}

impl Feed {
    /// Title shown to readers: the feed title, else its link, else a placeholder.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.link.as_deref())
            .unwrap_or(UNTITLED_FEED)
    }

    /// Timestamp of the newest dated entry, if any entry carries one.
    pub fn most_recent(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().filter_map(Entry::timestamp).max()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl Entry {
    /// Sort key of the entry: published time, falling back to updated time.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.published.or(self.updated)
    }
}
