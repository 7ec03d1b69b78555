//! Session-scoped configuration: base path, allow-list, remappings and initial source
//! population (spec §3 "Ownership", §4.B "Initial population rules").

use crate::{
    error::Result,
    loader::{host_fs::HostFsLoader, Dispatcher, LoaderCallback},
    remapping::RemappingEngine,
    sun::SourceUnitName,
    vfs::{Origin, Vfs},
};
use std::path::{Path, PathBuf};

/// Converts an OS-native path into a SUN by rewriting separators to `/` and nothing else
/// (spec §4.B: "SUN is `P` with OS-specific separators rewritten to `/`; no normalization
/// beyond that").
pub fn cli_path_to_sun(path: &Path) -> SourceUnitName {
    use path_slash::PathExt;
    SourceUnitName::new(path.to_slash_lossy().into_owned())
}

enum PendingEntry {
    CliFile { disk_path: PathBuf },
    JsonContent { sun: SourceUnitName, content: Vec<u8> },
    JsonUrls { sun: SourceUnitName, urls: Vec<String> },
    Stdin { content: Vec<u8> },
}

/// Builds a [`crate::session::Session`] by accumulating initial sources, remapping rules, the
/// base path, and loader callbacks, mirroring the teacher's `ProjectBuilder` fluent style.
#[derive(Default)]
pub struct ResolverConfigBuilder {
    base_path: String,
    allow_list: Vec<PathBuf>,
    remappings: RemappingEngine,
    callbacks: Vec<Box<dyn LoaderCallback>>,
    pending: Vec<PendingEntry>,
}

impl ResolverConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base path used only by the Host Filesystem Loader (spec §3).
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Explicitly widens the allow-list beyond what's derived automatically.
    pub fn allow_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.allow_list.push(dir.into());
        self
    }

    /// Registers a user-provided loader callback, run before the Host Filesystem Loader
    /// (spec §6: "the default CLI host registers the Host Filesystem Loader last").
    pub fn register_callback(mut self, callback: impl LoaderCallback + 'static) -> Self {
        self.callbacks.push(Box::new(callback));
        self
    }

    /// Parses and appends a `[context:]prefix=[target]` remapping rule, widening the allow-list
    /// with the directory part of its target (spec §3: "a directory enters the list when ... the
    /// directory part of any remapping target becomes known").
    pub fn remapping(mut self, raw: &str) -> Result<Self> {
        let rule = self.remappings.add_rule(raw)?.clone();
        let target_dir = crate::path_utils::strip_last_segment(&rule.target);
        if !target_dir.is_empty() {
            self.allow_list.push(PathBuf::from(target_dir));
        }
        Ok(self)
    }

    /// Schedules a positional command-line source file for reading once the session is built.
    /// Widens the allow-list with the file's parent directory (spec §3, §4.B).
    pub fn cli_source(mut self, disk_path: impl Into<PathBuf>) -> Self {
        let disk_path = disk_path.into();
        if let Some(parent) = disk_path.parent() {
            if !parent.as_os_str().is_empty() {
                self.allow_list.push(parent.to_path_buf());
            }
        }
        self.pending.push(PendingEntry::CliFile { disk_path });
        self
    }

    /// Schedules a standard-JSON `{"content": ...}` entry keyed by `sun` (the verbatim JSON key).
    pub fn json_content(mut self, sun: impl Into<SourceUnitName>, content: impl Into<Vec<u8>>) -> Self {
        self.pending.push(PendingEntry::JsonContent { sun: sun.into(), content: content.into() });
        self
    }

    /// Schedules a standard-JSON `{"urls": [...]}` entry keyed by `sun`; content is deferred to
    /// the dispatcher (spec §4.B, §4.E).
    pub fn json_urls(mut self, sun: impl Into<SourceUnitName>, urls: Vec<String>) -> Self {
        self.pending.push(PendingEntry::JsonUrls { sun: sun.into(), urls });
        self
    }

    /// Schedules the standard-input marker source, stored under the literal SUN `<stdin>`.
    /// At most one per session (spec §4.B).
    pub fn stdin_source(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.pending.push(PendingEntry::Stdin { content: content.into() });
        self
    }

    /// Schedules every entry of a parsed standard-JSON `sources` map (SPEC_FULL §10.4), routing
    /// `content` entries to [`json_content`](Self::json_content) and `urls` entries to
    /// [`json_urls`](Self::json_urls).
    pub fn standard_json_sources(mut self, sources: crate::standard_json::StandardJsonSources) -> Self {
        for (sun, entry) in sources {
            self = match entry {
                crate::standard_json::SourceEntry::Content { content } => {
                    self.json_content(sun, content.into_bytes())
                }
                crate::standard_json::SourceEntry::Urls { urls } => self.json_urls(sun, urls),
            };
        }
        self
    }

    /// Consumes the builder, reading any scheduled CLI files from disk and assembling the
    /// ready-to-use session.
    pub fn build(self) -> Result<crate::session::Session> {
        let mut vfs = Vfs::new();
        let mut url_entries = Vec::new();
        for entry in self.pending {
            match entry {
                PendingEntry::CliFile { disk_path } => {
                    let sun = cli_path_to_sun(&disk_path);
                    let bytes = std::fs::read(&disk_path)
                        .map_err(|e| crate::error::ResolverError::io(disk_path.clone(), e))?;
                    vfs.insert_with_hint(
                        sun,
                        bytes,
                        Origin::Cli,
                        Some(disk_path.display().to_string()),
                    )?;
                }
                PendingEntry::JsonContent { sun, content } => {
                    vfs.insert(sun, content, Origin::JsonContent)?;
                }
                PendingEntry::JsonUrls { sun, urls } => {
                    url_entries.push((sun, urls));
                }
                PendingEntry::Stdin { content } => {
                    vfs.insert(SourceUnitName::stdin(), content, Origin::Stdin)?;
                }
            }
        }

        let mut dispatcher = Dispatcher::new();
        for callback in self.callbacks {
            dispatcher.register_boxed(callback);
        }
        dispatcher.register(HostFsLoader::new(self.base_path.clone(), dedup(self.allow_list.clone())));
        for (sun, urls) in url_entries {
            dispatcher.set_urls(sun, urls);
        }

        Ok(crate::session::Session::new(vfs, self.remappings, dispatcher))
    }
}

fn dedup(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort();
    paths.dedup();
    paths
}
