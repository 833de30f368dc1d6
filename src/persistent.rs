//! Whole-file JSON persistence. Every read loads the full file into memory and
//! every write replaces it.

use crate::{CrawlerError, ProblemArchive};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;
use tracing::debug;

const INDENT: &[u8] = b"    ";

pub fn read_links<P: AsRef<Path>>(path: P) -> Result<Vec<String>, CrawlerError> {
    let raw = fs::read_to_string(path.as_ref())?;
    let links: Vec<String> = serde_json::from_str(&raw)?;
    debug!("Read {} links from {}", links.len(), path.as_ref().display());
    Ok(links)
}

pub fn read_archive<P: AsRef<Path>>(path: P) -> Result<ProblemArchive, CrawlerError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn write_archive<P: AsRef<Path>>(path: P, archive: &ProblemArchive) -> Result<(), CrawlerError> {
    fs::write(path.as_ref(), to_canonical_json(archive)?)?;
    debug!(
        "Wrote {} buckets to {}",
        archive.len(),
        path.as_ref().display()
    );
    Ok(())
}

pub fn read_archive_text<P: AsRef<Path>>(path: P) -> Result<String, CrawlerError> {
    Ok(fs::read_to_string(path)?)
}

pub fn write_archive_text<P: AsRef<Path>>(path: P, text: &str) -> Result<(), CrawlerError> {
    Ok(fs::write(path, text)?)
}

/// The one serialization every writer uses: pretty, four-space indent.
pub fn to_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CrawlerError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
