//! Snapshot persistence for facet index state
//!
//! A snapshot stores:
//! - The path separator it was written with
//! - The forward store (docid -> leaf terms)
//!
//! The inverted store is not written; it is rebuilt on load by re-indexing
//! every document, which also re-validates every term against the current
//! configuration.
//!
//! Layout: 4-byte magic, u32 LE format version, MessagePack payload.
//! File writes are atomic via temp + rename.

use crate::index::FacetIndex;
use facetdb_core::{DocId, Error, FacetConfig, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Magic bytes for facet snapshots
const SNAPSHOT_MAGIC: &[u8; 4] = b"FCTS";
/// Current snapshot format version
const SNAPSHOT_VERSION: u32 = 1;
const HEADER_LEN: usize = 8;

#[derive(Serialize, Deserialize)]
struct SnapshotData {
    separator: char,
    /// (docid, leaf terms), sorted by docid
    documents: Vec<(DocId, Vec<String>)>,
}

/// Encode the index state into snapshot bytes
pub fn encode_snapshot(index: &FacetIndex) -> Result<Vec<u8>> {
    let mut documents: Vec<(DocId, Vec<String>)> = index
        .forward()
        .iter()
        .map(|(docid, terms)| (docid, terms.to_vec()))
        .collect();
    documents.sort_unstable_by_key(|(docid, _)| *docid);

    let data = SnapshotData {
        separator: index.syntax().separator(),
        documents,
    };
    let payload = rmp_serde::to_vec(&data)?;

    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
    buf.extend_from_slice(SNAPSHOT_MAGIC);
    buf.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    buf.extend_from_slice(&payload);
    Ok(buf)
}

/// Rebuild an index from snapshot bytes
///
/// # Errors
///
/// `Error::Corruption` for a bad header, a separator that differs from
/// `config`, or stored terms the configuration no longer accepts.
/// `Error::Serialization` if the payload cannot be decoded.
pub fn decode_snapshot(buf: &[u8], config: &FacetConfig) -> Result<FacetIndex> {
    if buf.len() < HEADER_LEN {
        return Err(Error::Corruption("snapshot too small".to_string()));
    }
    if &buf[0..4] != SNAPSHOT_MAGIC {
        return Err(Error::Corruption("bad snapshot magic".to_string()));
    }
    let version = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    if version != SNAPSHOT_VERSION {
        return Err(Error::Corruption(format!(
            "unsupported snapshot version {}",
            version
        )));
    }

    let data: SnapshotData = rmp_serde::from_slice(&buf[HEADER_LEN..])?;
    if data.separator != config.separator {
        return Err(Error::Corruption(format!(
            "snapshot separator '{}' does not match configured '{}'",
            data.separator, config.separator
        )));
    }

    let mut index = FacetIndex::new(config)?;
    for (docid, terms) in &data.documents {
        index
            .index_doc(*docid, terms)
            .map_err(|e| Error::Corruption(format!("document {}: {}", docid, e)))?;
    }
    Ok(index)
}

/// Write a snapshot to a file atomically (temp + fsync + rename)
pub fn write_snapshot(path: &Path, index: &FacetIndex) -> Result<()> {
    let buf = encode_snapshot(index)?;
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;

    let tmp_path = path.with_extension("snapshot.tmp");
    let written = write_and_rename(&tmp_path, path, &buf);
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    tracing::info!(
        path = %path.display(),
        documents = index.document_count(),
        bytes = buf.len(),
        "Facet snapshot written"
    );
    Ok(())
}

fn write_and_rename(tmp_path: &Path, path: &Path, buf: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    let mut file = std::fs::File::create(tmp_path)?;
    file.write_all(buf)?;
    file.sync_all()?;
    std::fs::rename(tmp_path, path)
}

/// Load a snapshot file and rebuild the index
pub fn load_snapshot(path: &Path, config: &FacetConfig) -> Result<FacetIndex> {
    let buf = std::fs::read(path)?;
    let index = decode_snapshot(&buf, config)?;
    tracing::info!(
        path = %path.display(),
        documents = index.document_count(),
        terms = index.term_count(),
        "Facet snapshot loaded"
    );
    Ok(index)
}
