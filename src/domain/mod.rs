//! Core types: TocEntry, anchors, Statistics

mod statistics;
mod toc;

pub use statistics::{Statistics, compute_statistics};
pub use toc::{TocEntry, anchor_for, extract_toc};
