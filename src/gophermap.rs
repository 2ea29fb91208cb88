//! Gophermap rendering.
//!
//! Turns parsed feeds into gophermap text: one menu per feed, an index of
//! feed directories, and a combined digest of the newest entries across
//! feeds. Nothing here performs I/O.

use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{Entry, Feed};
use crate::slug::{assign_slugs, selector_for};

/// Width of the plug separator and of the right-justified attribution line.
pub const PLUG_WIDTH: usize = 70;
pub const DEFAULT_MAX_ENTRIES: usize = 20;
pub const DEFAULT_PORT: u16 = 70;
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

const TOOL_NAME: &str = "Gopherfeed";
const AGGREGATE_LABEL: &str = "RSS/Atom feeds";
const TAB_REPLACEMENT: &str = "    ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("feed has no entries")]
    EmptyFeed,
}

/// Order of the directory lines in a feed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep the order the feeds were given in
    #[default]
    IndexOrder,
    /// Case-insensitive by feed title
    Alphabetical,
    /// Newest entry first
    Chronological,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub include_timestamp: bool,
    pub include_plug: bool,
    pub sort_mode: SortMode,
    /// Digest length; `None` means [`DEFAULT_MAX_ENTRIES`].
    pub max_entries: Option<usize>,
    /// Optional first line of an index or digest, followed by a blank line.
    pub header: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_timestamp: false,
            include_plug: true,
            sort_mode: SortMode::default(),
            max_entries: None,
            header: None,
        }
    }
}

/// Host that serves the generated directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GopherServer {
    pub hostname: String,
    pub port: u16,
}

impl GopherServer {
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        Self {
            hostname: hostname.into(),
            port,
        }
    }
}

/// A single gophermap line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapLine {
    /// Plain text, shown as-is by the server.
    Info(String),
    /// Type `h` item pointing at an external URL.
    Link { description: String, url: String },
    /// Type `1` item pointing at a directory on a gopher server.
    Directory {
        description: String,
        selector: String,
        hostname: String,
        port: u16,
    },
}

impl MapLine {
    pub fn info(text: &str) -> Self {
        MapLine::Info(sanitize(text))
    }

    pub fn blank() -> Self {
        MapLine::Info(String::new())
    }

    pub fn link(description: &str, url: &str) -> Self {
        MapLine::Link {
            description: sanitize(description),
            url: sanitize(url),
        }
    }

    pub fn directory(description: &str, selector: &str, server: &GopherServer) -> Self {
        MapLine::Directory {
            description: sanitize(description),
            selector: sanitize(selector),
            hostname: server.hostname.clone(),
            port: server.port,
        }
    }

    pub fn type_char(&self) -> Option<char> {
        match self {
            MapLine::Info(_) => None,
            MapLine::Link { .. } => Some('h'),
            MapLine::Directory { .. } => Some('1'),
        }
    }
}

impl fmt::Display for MapLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapLine::Info(text) => f.write_str(text),
            MapLine::Link { description, url } => write!(f, "h{}\tURL:{}", description, url),
            MapLine::Directory {
                description,
                selector,
                hostname,
                port,
            } => write!(f, "1{}\t{}\t{}\t{}", description, selector, hostname, port),
        }
    }
}

/// Replace the characters that would break a gophermap line.
///
/// Tab is the field separator and line breaks end the line, so neither may
/// appear inside a field.
pub fn sanitize(text: &str) -> String {
    let mut clean = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => clean.push_str(TAB_REPLACEMENT),
            '\r' | '\n' => clean.push(' '),
            _ => clean.push(c),
        }
    }
    clean
}

/// Format an entry timestamp in local time.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(TIME_FORMAT)
        .to_string()
}

/// The separator and right-justified attribution line closing a gophermap.
pub fn plug_lines(format_label: &str) -> [MapLine; 2] {
    let attribution = format!(
        "Converted from {} by {} {}",
        format_label,
        TOOL_NAME,
        env!("CARGO_PKG_VERSION")
    );
    [
        MapLine::Info("_".repeat(PLUG_WIDTH)),
        MapLine::Info(format!("{:>width$}", attribution, width = PLUG_WIDTH)),
    ]
}

fn entry_line(entry: &Entry, source: Option<&Feed>, include_timestamp: bool) -> MapLine {
    let mut description = match source {
        Some(feed) => format!("{}: {}", feed.display_title(), entry.title),
        None => entry.title.clone(),
    };
    if include_timestamp {
        if let Some(timestamp) = entry.timestamp() {
            description = format!("[{}] {}", format_timestamp(timestamp), description);
        }
    }
    MapLine::link(&description, &entry.link)
}

fn join(lines: &[MapLine]) -> String {
    lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_header(lines: &mut Vec<MapLine>, header: Option<&str>) {
    if let Some(header) = header {
        lines.push(MapLine::info(header));
        lines.push(MapLine::blank());
    }
}

/// Render one feed as a gophermap.
///
/// The header block (title, optional description) is always followed by a
/// blank line. Entries come newest first; entries with no timestamp follow
/// the dated ones in their original order.
pub fn render_feed(feed: &Feed, options: &RenderOptions) -> Result<String, RenderError> {
    if feed.entries.is_empty() {
        return Err(RenderError::EmptyFeed);
    }

    let mut lines = vec![MapLine::info(feed.display_title())];
    if let Some(description) = feed.description.as_deref() {
        if !description.trim().is_empty() {
            lines.push(MapLine::info(description));
        }
    }
    lines.push(MapLine::blank());

    let (mut dated, undated): (Vec<&Entry>, Vec<&Entry>) = feed
        .entries
        .iter()
        .partition(|entry| entry.timestamp().is_some());
    dated.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));

    if !undated.is_empty() {
        warn!(
            "{} entries in '{}' have no timestamp, listing them last",
            undated.len(),
            feed.display_title()
        );
    }

    lines.extend(
        dated
            .into_iter()
            .chain(undated)
            .map(|entry| entry_line(entry, None, options.include_timestamp)),
    );

    if options.include_plug {
        lines.extend(plug_lines(feed.format.label()));
    }

    Ok(join(&lines))
}

/// Render an index of feed directories.
///
/// Each feed links to `{selector_root}/{slug}` on `server`. Slugs are
/// assigned in input order before sorting, so they match the directories
/// written for the same feed list.
pub fn render_index(
    feeds: &[Feed],
    selector_root: &str,
    server: &GopherServer,
    options: &RenderOptions,
) -> String {
    let slugs = assign_slugs(feeds);
    let indexed: Vec<(&Feed, &str)> = feeds
        .iter()
        .zip(slugs.iter().map(String::as_str))
        .collect();
    render_index_with_slugs(indexed, selector_root, server, options)
}

/// Render an index from feeds whose directory slugs are already assigned.
pub fn render_index_with_slugs(
    mut indexed: Vec<(&Feed, &str)>,
    selector_root: &str,
    server: &GopherServer,
    options: &RenderOptions,
) -> String {
    match options.sort_mode {
        SortMode::IndexOrder => {}
        SortMode::Alphabetical => {
            indexed.sort_by_cached_key(|(feed, _)| feed.display_title().to_lowercase());
        }
        SortMode::Chronological => {
            indexed.retain(|(feed, _)| {
                let dated = feed.most_recent().is_some();
                if !dated {
                    warn!(
                        "Leaving '{}' out of chronological index: no dated entries",
                        feed.display_title()
                    );
                }
                dated
            });
            indexed.sort_by(|(a, _), (b, _)| b.most_recent().cmp(&a.most_recent()));
        }
    }

    let mut lines = Vec::with_capacity(indexed.len() + 4);
    push_header(&mut lines, options.header.as_deref());
    lines.extend(indexed.into_iter().map(|(feed, slug)| {
        MapLine::directory(
            feed.display_title(),
            &selector_for(selector_root, slug),
            server,
        )
    }));

    if options.include_plug {
        lines.extend(plug_lines(AGGREGATE_LABEL));
    }

    join(&lines)
}

/// Render the newest entries across all feeds as one menu.
///
/// Entries without a timestamp cannot be ordered and are left out.
pub fn render_combined(feeds: &[Feed], options: &RenderOptions) -> String {
    let max_entries = options.max_entries.unwrap_or(DEFAULT_MAX_ENTRIES);

    let mut dated: Vec<(DateTime<Utc>, &Feed, &Entry)> = Vec::new();
    let mut skipped = 0;
    for feed in feeds {
        for entry in &feed.entries {
            match entry.timestamp() {
                Some(timestamp) => dated.push((timestamp, feed, entry)),
                None => skipped += 1,
            }
        }
    }
    if skipped > 0 {
        debug!("Left {} undated entries out of the digest", skipped);
    }

    dated.sort_by(|a, b| b.0.cmp(&a.0));
    dated.truncate(max_entries);

    let mut lines = Vec::with_capacity(dated.len() + 4);
    push_header(&mut lines, options.header.as_deref());
    lines.extend(
        dated
            .into_iter()
            .map(|(_, feed, entry)| entry_line(entry, Some(feed), options.include_timestamp)),
    );

    if options.include_plug {
        lines.extend(plug_lines(AGGREGATE_LABEL));
    }

    join(&lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FeedFormat;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, day, hour, 0, 0).unwrap()
    }

    fn entry(title: &str, published: Option<DateTime<Utc>>) -> Entry {
        Entry {
            title: title.to_string(),
            link: format!("https://example.com/{}", title.to_lowercase()),
            published,
            updated: None,
        }
    }

    fn feed(title: &str, entries: Vec<Entry>) -> Feed {
        Feed {
            title: Some(title.to_string()),
            format: FeedFormat::Rss,
            entries,
            ..Default::default()
        }
    }

    fn no_plug() -> RenderOptions {
        RenderOptions {
            include_plug: false,
            ..Default::default()
        }
    }

    fn local_server() -> GopherServer {
        GopherServer::new("gopher.example.org", 70)
    }

    mod map_line_tests {
        use super::*;

        #[test]
        fn test_link_line_format() {
            let line = MapLine::link("Hello", "https://example.com/hello");
            assert_eq!(line.to_string(), "hHello\tURL:https://example.com/hello");
            assert_eq!(line.type_char(), Some('h'));
        }

        #[test]
        fn test_directory_line_format() {
            let line = MapLine::directory("Tech News", "/feeds/tech_news", &local_server());
            assert_eq!(
                line.to_string(),
                "1Tech News\t/feeds/tech_news\tgopher.example.org\t70"
            );
            assert_eq!(line.type_char(), Some('1'));
        }

        #[test]
        fn test_info_line_is_verbatim() {
            let line = MapLine::info("Just text");
            assert_eq!(line.to_string(), "Just text");
            assert_eq!(line.type_char(), None);
        }

        #[test]
        fn test_sanitize_replaces_tabs_and_line_breaks() {
            assert_eq!(sanitize("a\tb"), "a    b");
            assert_eq!(sanitize("line one\nline two"), "line one line two");
            assert_eq!(sanitize("crlf\r\nend"), "crlf  end");
            assert_eq!(sanitize("clean"), "clean");
        }

        #[test]
        fn test_link_description_never_contains_tabs() {
            let line = MapLine::link("Tabbed\ttitle\twith\ttabs", "https://example.com");
            let rendered = line.to_string();
            assert_eq!(rendered.matches('\t').count(), 1);
            assert!(rendered.starts_with("hTabbed    title"));
        }
    }

    mod plug_tests {
        use super::*;

        #[test]
        fn test_plug_lines_shape() {
            let [separator, attribution] = plug_lines("RSS feed");
            assert_eq!(separator.to_string(), "_".repeat(PLUG_WIDTH));

            let attribution = attribution.to_string();
            assert_eq!(attribution.len(), PLUG_WIDTH);
            assert!(attribution.starts_with(' '));
            assert!(attribution.ends_with(&format!(
                "Converted from RSS feed by Gopherfeed {}",
                env!("CARGO_PKG_VERSION")
            )));
        }
    }

    mod render_feed_tests {
        use super::*;

        #[test]
        fn test_empty_feed_is_an_error() {
            let empty = feed("Empty", vec![]);
            assert_eq!(render_feed(&empty, &no_plug()), Err(RenderError::EmptyFeed));
        }

        #[test]
        fn test_single_entry_with_empty_description_is_not_empty() {
            let mut single = feed("Single", vec![entry("Only", Some(at(1, 0)))]);
            single.description = Some(String::new());

            let rendered = render_feed(&single, &no_plug()).unwrap();
            assert_eq!(
                rendered,
                "Single\n\nhOnly\tURL:https://example.com/only"
            );
        }

        #[test]
        fn test_header_and_description() {
            let mut news = feed("Tech\tNews", vec![entry("A", Some(at(1, 0)))]);
            news.description = Some("Latest\ttech news".to_string());

            let rendered = render_feed(&news, &no_plug()).unwrap();
            let lines: Vec<&str> = rendered.lines().collect();
            assert_eq!(lines[0], "Tech    News");
            assert_eq!(lines[1], "Latest    tech news");
            assert_eq!(lines[2], "");
            assert_eq!(lines[3], "hA\tURL:https://example.com/a");
        }

        #[test]
        fn test_title_falls_back_to_link_then_placeholder() {
            let mut untitled = feed("x", vec![entry("A", Some(at(1, 0)))]);
            untitled.title = None;
            untitled.link = Some("https://blog.example.com".to_string());
            let rendered = render_feed(&untitled, &no_plug()).unwrap();
            assert!(rendered.starts_with("https://blog.example.com\n"));

            untitled.link = None;
            let rendered = render_feed(&untitled, &no_plug()).unwrap();
            assert!(rendered.starts_with("Untitled feed\n"));
        }

        #[test]
        fn test_entries_sorted_newest_first() {
            let news = feed(
                "News",
                vec![
                    entry("Middle", Some(at(2, 0))),
                    entry("Oldest", Some(at(1, 0))),
                    entry("Newest", Some(at(3, 0))),
                ],
            );

            let rendered = render_feed(&news, &no_plug()).unwrap();
            let titles: Vec<&str> = rendered
                .lines()
                .filter(|line| line.starts_with('h'))
                .map(|line| line[1..].split('\t').next().unwrap())
                .collect();
            assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
        }

        #[test]
        fn test_updated_used_when_published_missing() {
            let mut updated_only = entry("Updated", None);
            updated_only.updated = Some(at(5, 0));
            let news = feed(
                "News",
                vec![entry("Published", Some(at(4, 0))), updated_only],
            );

            let rendered = render_feed(&news, &no_plug()).unwrap();
            let first = rendered.lines().nth(2).unwrap();
            assert!(first.starts_with("hUpdated\t"));
        }

        #[test]
        fn test_undated_entries_listed_last_in_original_order() {
            let news = feed(
                "News",
                vec![
                    entry("Undated one", None),
                    entry("Dated", Some(at(1, 0))),
                    entry("Undated two", None),
                ],
            );

            let rendered = render_feed(&news, &no_plug()).unwrap();
            let lines: Vec<&str> = rendered.lines().skip(2).collect();
            assert!(lines[0].starts_with("hDated\t"));
            assert!(lines[1].starts_with("hUndated one\t"));
            assert!(lines[2].starts_with("hUndated two\t"));
        }

        #[test]
        fn test_timestamp_prefix() {
            let news = feed(
                "News",
                vec![entry("Dated", Some(at(9, 12))), entry("Undated", None)],
            );
            let options = RenderOptions {
                include_timestamp: true,
                include_plug: false,
                ..Default::default()
            };

            let rendered = render_feed(&news, &options).unwrap();
            let lines: Vec<&str> = rendered.lines().collect();
            assert_eq!(
                lines[2],
                format!(
                    "h[{}] Dated\tURL:https://example.com/dated",
                    format_timestamp(at(9, 12))
                )
            );
            assert_eq!(lines[3], "hUndated\tURL:https://example.com/undated");
        }

        #[test]
        fn test_plug_is_last_two_lines() {
            let mut atom = feed("Atom", vec![entry("A", Some(at(1, 0)))]);
            atom.format = FeedFormat::Atom;

            let rendered = render_feed(&atom, &RenderOptions::default()).unwrap();
            let lines: Vec<&str> = rendered.lines().collect();
            let n = lines.len();
            assert_eq!(lines[n - 2], "_".repeat(PLUG_WIDTH));
            assert_eq!(lines[n - 1].len(), PLUG_WIDTH);
            assert!(lines[n - 1].trim_start().starts_with("Converted from Atom feed"));
        }

        #[test]
        fn test_tabs_in_entry_titles_are_replaced() {
            let news = feed("News", vec![entry("Bad\ttitle", Some(at(1, 0)))]);
            let rendered = render_feed(&news, &no_plug()).unwrap();
            for line in rendered.lines().filter(|line| line.starts_with('h')) {
                assert_eq!(line.matches('\t').count(), 1);
            }
        }
    }

    mod render_index_tests {
        use super::*;

        fn directory_titles(rendered: &str) -> Vec<String> {
            rendered
                .lines()
                .filter(|line| line.starts_with('1'))
                .map(|line| line[1..].split('\t').next().unwrap().to_string())
                .collect()
        }

        #[test]
        fn test_index_order_preserved() {
            let feeds = vec![feed("Zebra", vec![]), feed("apple", vec![]), feed("Mango", vec![])];
            let rendered = render_index(&feeds, "/feeds", &local_server(), &no_plug());
            assert_eq!(directory_titles(&rendered), vec!["Zebra", "apple", "Mango"]);
        }

        #[test]
        fn test_alphabetical_is_case_insensitive() {
            let feeds = vec![feed("Zebra", vec![]), feed("apple", vec![]), feed("Mango", vec![])];
            let options = RenderOptions {
                sort_mode: SortMode::Alphabetical,
                include_plug: false,
                ..Default::default()
            };
            let rendered = render_index(&feeds, "/feeds", &local_server(), &options);
            assert_eq!(directory_titles(&rendered), vec!["apple", "Mango", "Zebra"]);
        }

        #[test]
        fn test_chronological_newest_first_and_skips_undated() {
            let feeds = vec![
                feed("Old", vec![entry("a", Some(at(1, 0)))]),
                feed("Empty", vec![]),
                feed("New", vec![entry("b", Some(at(1, 0))), entry("c", Some(at(7, 0)))]),
                feed("Undated", vec![entry("d", None)]),
            ];
            let options = RenderOptions {
                sort_mode: SortMode::Chronological,
                include_plug: false,
                ..Default::default()
            };
            let rendered = render_index(&feeds, "/feeds", &local_server(), &options);
            assert_eq!(directory_titles(&rendered), vec!["New", "Old"]);
        }

        #[test]
        fn test_selectors_use_slugs() {
            let feeds = vec![feed("My Feed: News!", vec![]), feed("日本語", vec![])];
            let rendered = render_index(&feeds, "/feeds", &local_server(), &no_plug());
            assert_eq!(
                rendered,
                "1My Feed: News!\t/feeds/my_feed__news_\tgopher.example.org\t70\n\
                 1日本語\t/feeds/feed_2\tgopher.example.org\t70"
            );
        }

        #[test]
        fn test_slugs_stable_under_sorting() {
            let feeds = vec![feed("News", vec![]), feed("news", vec![])];
            let options = RenderOptions {
                sort_mode: SortMode::Alphabetical,
                include_plug: false,
                ..Default::default()
            };
            let rendered = render_index(&feeds, "", &local_server(), &options);
            let selectors: Vec<&str> = rendered
                .lines()
                .map(|line| line.split('\t').nth(1).unwrap())
                .collect();
            assert_eq!(selectors, vec!["news", "news_2"]);
        }

        #[test]
        fn test_with_slugs_keeps_given_selectors() {
            let loud = feed("Loud", vec![]);
            let news = feed("News", vec![]);
            let indexed = vec![(&news, "news_2"), (&loud, "loud")];
            let options = RenderOptions {
                sort_mode: SortMode::Alphabetical,
                include_plug: false,
                ..Default::default()
            };
            let rendered = render_index_with_slugs(indexed, "/feeds", &local_server(), &options);
            assert_eq!(
                rendered,
                "1Loud\t/feeds/loud\tgopher.example.org\t70\n\
                 1News\t/feeds/news_2\tgopher.example.org\t70"
            );
        }

        #[test]
        fn test_header_and_plug() {
            let feeds = vec![feed("Only", vec![])];
            let options = RenderOptions {
                header: Some("My\tFeeds".to_string()),
                ..Default::default()
            };
            let rendered = render_index(&feeds, "/feeds", &GopherServer::new("localhost", 7070), &options);
            let lines: Vec<&str> = rendered.lines().collect();
            assert_eq!(lines[0], "My    Feeds");
            assert_eq!(lines[1], "");
            assert_eq!(lines[2], "1Only\t/feeds/only\tlocalhost\t7070");
            assert_eq!(lines[3], "_".repeat(PLUG_WIDTH));
            assert_eq!(lines[4].len(), PLUG_WIDTH);
            assert!(lines[4].ends_with(&format!(
                "Converted from RSS/Atom feeds by Gopherfeed {}",
                env!("CARGO_PKG_VERSION")
            )));
        }
    }

    mod render_combined_tests {
        use super::*;

        fn three_feeds() -> Vec<Feed> {
            vec![
                feed(
                    "Alpha",
                    vec![
                        entry("a1", Some(at(1, 0))),
                        entry("a2", Some(at(4, 0))),
                        entry("a3", Some(at(7, 0))),
                    ],
                ),
                feed(
                    "Beta",
                    vec![
                        entry("b1", Some(at(2, 0))),
                        entry("b2", Some(at(5, 0))),
                        entry("b3", Some(at(9, 0))),
                    ],
                ),
                feed(
                    "Gamma",
                    vec![
                        entry("g1", Some(at(3, 0))),
                        entry("g2", Some(at(6, 0))),
                        entry("g3", Some(at(8, 0))),
                    ],
                ),
            ]
        }

        #[test]
        fn test_max_entries_keeps_globally_newest() {
            let options = RenderOptions {
                max_entries: Some(2),
                include_plug: false,
                ..Default::default()
            };
            let rendered = render_combined(&three_feeds(), &options);
            assert_eq!(
                rendered,
                "hBeta: b3\tURL:https://example.com/b3\n\
                 hGamma: g3\tURL:https://example.com/g3"
            );
        }

        #[test]
        fn test_default_limit_is_twenty() {
            let entries = (0..30)
                .map(|i| entry(&format!("e{}", i), Some(at(1, 0) + chrono::Duration::minutes(i))))
                .collect();
            let rendered = render_combined(&[feed("Busy", entries)], &no_plug());
            assert_eq!(rendered.lines().count(), DEFAULT_MAX_ENTRIES);
            assert!(rendered.starts_with("hBusy: e29\t"));
        }

        #[test]
        fn test_undated_entries_excluded() {
            let feeds = vec![feed(
                "Mixed",
                vec![entry("dated", Some(at(1, 0))), entry("undated", None)],
            )];
            let rendered = render_combined(&feeds, &no_plug());
            assert_eq!(rendered, "hMixed: dated\tURL:https://example.com/dated");
        }

        #[test]
        fn test_timestamp_prefix_precedes_feed_title() {
            let feeds = vec![feed("Alpha", vec![entry("a1", Some(at(1, 6)))])];
            let options = RenderOptions {
                include_timestamp: true,
                include_plug: false,
                ..Default::default()
            };
            let rendered = render_combined(&feeds, &options);
            assert_eq!(
                rendered,
                format!(
                    "h[{}] Alpha: a1\tURL:https://example.com/a1",
                    format_timestamp(at(1, 6))
                )
            );
        }

        #[test]
        fn test_plug_is_last_two_lines() {
            let options = RenderOptions {
                max_entries: Some(3),
                ..Default::default()
            };
            let rendered = render_combined(&three_feeds(), &options);
            let lines: Vec<&str> = rendered.lines().collect();
            assert_eq!(lines.len(), 5);
            assert_eq!(lines[3], "_".repeat(PLUG_WIDTH));
            assert_eq!(lines[4].len(), PLUG_WIDTH);
        }

        #[test]
        fn test_no_feeds_renders_nothing() {
            assert_eq!(render_combined(&[], &no_plug()), "");
        }
    }
}
