//! Gopherfeed - RSS/Atom feeds as gophermaps
//!
//! This crate converts syndication feeds into Gopher menu files.
//! It renders one menu per feed, an index of feed directories, and a
//! digest of the newest entries across all feeds.

pub mod config;
pub mod fetcher;
pub mod gophermap;
pub mod model;
pub mod output;
pub mod slug;
