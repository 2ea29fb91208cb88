use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{error, info, warn};

use crate::config::{Config, WriteMode};
use crate::gophermap::{
    render_combined, render_feed, render_index_with_slugs, GopherServer, RenderError,
};
use crate::model::Feed;
use crate::slug::assign_slugs;

/// File name gopher servers look for in a directory.
pub const GOPHERMAP: &str = "gophermap";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub feeds_written: usize,
    pub feeds_skipped: usize,
    pub index: PathBuf,
    pub digest: Option<PathBuf>,
}

/// Write `contents` to `{dir}/gophermap`, creating `dir` if needed.
pub fn write_gophermap(dir: &Path, contents: &str, mode: WriteMode) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating directory {}", dir.display()))?;

    let path = dir.join(GOPHERMAP);
    let mut options = OpenOptions::new();
    match mode {
        WriteMode::Overwrite => options.write(true).create(true).truncate(true),
        WriteMode::Append => options.append(true).create(true),
    };
    let mut file = options
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    file.write_all(contents.as_bytes())?;
    if !contents.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    Ok(path)
}

/// Write the per-feed menus, the index and the optional digest below
/// `config.output_dir`.
///
/// Feeds that have no entries, or whose directory cannot be written, are
/// skipped and left out of the index.
pub fn build_tree(
    feeds: &[Feed],
    config: &Config,
    server: &GopherServer,
) -> anyhow::Result<BuildReport> {
    let base_dir = config.output_dir.as_path();
    let options = config.render_options();
    let slugs = assign_slugs(feeds);
    let mut report = BuildReport::default();
    let mut written: Vec<(&Feed, &str)> = Vec::with_capacity(feeds.len());

    for (feed, slug) in feeds.iter().zip(&slugs) {
        let map = match render_feed(feed, &options) {
            Ok(map) => map,
            Err(RenderError::EmptyFeed) => {
                warn!("Skipping '{}': feed has no entries", feed.display_title());
                report.feeds_skipped += 1;
                continue;
            }
        };

        match write_gophermap(&base_dir.join(slug), &map, config.write_mode) {
            Ok(path) => {
                info!("Wrote '{}' to {}", feed.display_title(), path.display());
                report.feeds_written += 1;
                written.push((feed, slug.as_str()));
            }
            Err(e) => {
                error!("Skipping '{}': {:#}", feed.display_title(), e);
                report.feeds_skipped += 1;
            }
        }
    }

    let index_len = written.len();
    let index = render_index_with_slugs(written, &config.selector_root, server, &options);
    report.index = write_gophermap(base_dir, &index, config.write_mode)?;
    info!("Wrote index of {} feeds to {}", index_len, report.index.display());

    if let (Some(digest), Some(digest_options)) = (&config.digest, config.digest_options()) {
        if slugs.contains(&digest.directory) {
            warn!(
                "Digest directory '{}' is used by a feed, not writing digest",
                digest.directory
            );
        } else {
            let map = render_combined(feeds, &digest_options);
            let path = write_gophermap(&base_dir.join(&digest.directory), &map, config.write_mode)?;
            info!("Wrote digest to {}", path.display());
            report.digest = Some(path);
        }
    }

    Ok(report)
}
