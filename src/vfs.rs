//! The SUN Registry: an in-memory, content-addressed-by-name map from source unit name to source
//! bytes (spec §3, §4.B).

use crate::{
    error::{ResolverError, Result},
    sun::SourceUnitName,
};
use std::{collections::HashMap, fmt};

/// Where a [`SourceUnit`]'s bytes originally came from. Recorded for diagnostics only; it plays
/// no role in resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Supplied as a positional path on the command line.
    Cli,
    /// Supplied as a `{"content": ...}` entry in the standard-JSON `sources` map.
    JsonContent,
    /// Supplied as a `{"urls": [...]}` entry in the standard-JSON `sources` map.
    JsonUrl,
    /// Supplied via the `-` standard-input marker.
    Stdin,
    /// Backfilled on demand by the loader dispatcher (spec §4.E).
    Callback,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cli => "cli",
            Self::JsonContent => "json-content",
            Self::JsonUrl => "json-url",
            Self::Stdin => "stdin",
            Self::Callback => "callback",
        })
    }
}

/// A single entry in the VFS: immutable once inserted, for the lifetime of the session.
#[derive(Clone, Debug)]
pub struct SourceUnit {
    content: Vec<u8>,
    origin: Origin,
    /// Resolved on-disk path, if any, used only to make diagnostics point somewhere real.
    disk_path_hint: Option<String>,
}

impl SourceUnit {
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn disk_path_hint(&self) -> Option<&str> {
        self.disk_path_hint.as_deref()
    }
}

/// The Virtual Filesystem: a registry of source units keyed by opaque SUN.
///
/// The VFS never normalizes a SUN, never deduplicates by on-disk inode, and never touches the
/// filesystem itself (spec §1's non-goals) — it is purely the map plus the insertion-order
/// bookkeeping that makes `iter()` reproducible.
#[derive(Clone, Debug, Default)]
pub struct Vfs {
    entries: HashMap<SourceUnitName, SourceUnit>,
    /// Insertion order, kept separately from the hash map so `iter()` is reproducible
    /// (spec §3: "needed for reproducible diagnostics").
    order: Vec<SourceUnitName>,
}

impl Vfs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `content` under `sun` with the given `origin`.
    ///
    /// Fails with [`ResolverError::DuplicateSourceUnit`] if `sun` is already present with
    /// different bytes. A re-insert of byte-identical content under the same SUN is a no-op,
    /// regardless of whether the origin differs (spec §3).
    pub fn insert(
        &mut self,
        sun: SourceUnitName,
        content: impl Into<Vec<u8>>,
        origin: Origin,
    ) -> Result<()> {
        self.insert_with_hint(sun, content, origin, None)
    }

    /// Like [`insert`](Self::insert), additionally recording a disk path hint for diagnostics.
    pub fn insert_with_hint(
        &mut self,
        sun: SourceUnitName,
        content: impl Into<Vec<u8>>,
        origin: Origin,
        disk_path_hint: Option<String>,
    ) -> Result<()> {
        let content = content.into();
        if let Some(existing) = self.entries.get(&sun) {
            if existing.content == content {
                trace!(%sun, "idempotent re-insert of byte-identical source unit");
                return Ok(());
            }
            return Err(ResolverError::DuplicateSourceUnit { sun });
        }
        trace!(%sun, origin = ?origin, "inserting source unit");
        self.order.push(sun.clone());
        self.entries.insert(sun, SourceUnit { content, origin, disk_path_hint });
        Ok(())
    }

    /// Returns the bytes stored under `sun`, if any.
    pub fn get(&self, sun: &SourceUnitName) -> Option<&SourceUnit> {
        self.entries.get(sun)
    }

    /// Presence predicate.
    pub fn contains(&self, sun: &SourceUnitName) -> bool {
        self.entries.contains_key(sun)
    }

    /// Iterates entries in insertion order (spec §4.B: "deterministic iteration in insertion
    /// order").
    pub fn iter(&self) -> impl Iterator<Item = (&SourceUnitName, &SourceUnit)> {
        self.order.iter().map(move |sun| (sun, &self.entries[sun]))
    }

    /// Number of source units currently registered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lists every SUN's origin in insertion order, for a verbose CLI flag or a test asserting
    /// resolution order (spec §11: "deterministic diagnostics ordering").
    pub fn origins(&self) -> Vec<(&SourceUnitName, Origin)> {
        self.iter().map(|(sun, unit)| (sun, unit.origin())).collect()
    }

    /// Renders one `sun <- origin` line per entry, in insertion order, for the CLI's `-v` report.
    pub fn origin_report(&self) -> String {
        self.origins().into_iter().map(|(sun, origin)| format!("{sun} <- {origin}")).collect::<Vec<_>>().join("\n")
    }
}
