//! The Host Filesystem Loader: the default callback, mapping a SUN to bytes on disk under a
//! base-path and allow-list policy (spec §4.F).

use crate::{
    error::{ResolverError, Result},
    loader::{LoadOutcome, LoaderCallback},
};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

const FILE_SCHEME: &str = "file://";

/// Loads source units from disk. This is the only component in the core that ever touches the
/// filesystem (spec §1, §4.F).
#[derive(Clone, Debug)]
pub struct HostFsLoader {
    base_path: String,
    allow_list: Vec<PathBuf>,
}

impl HostFsLoader {
    /// `base_path` may be empty or relative to the process working directory; `allow_list` is
    /// the set of directories a resolved candidate must fall under (spec §3).
    pub fn new(base_path: impl Into<String>, allow_list: Vec<PathBuf>) -> Self {
        Self { base_path: base_path.into(), allow_list }
    }

    pub fn allow_list(&self) -> &[PathBuf] {
        &self.allow_list
    }

    pub fn add_allowed(&mut self, dir: PathBuf) {
        if !self.allow_list.contains(&dir) {
            self.allow_list.push(dir);
        }
    }

    /// Computes the disk path a SUN maps to, without touching the filesystem.
    ///
    /// `file://` is stripped first. If `base_path` is non-empty, it is *always* literally
    /// concatenated with the (possibly absolute-looking) remainder — this can produce a doubled
    /// separator for a base path ending in `/` joined with a SUN starting with `/`, which is the
    /// documented, deliberate behavior (spec §4.F step 2, §9 open question): collapsing it is
    /// left to whatever the platform's own path handling does at canonicalization time, not done
    /// here. `candidate = s` verbatim only when `base_path` is empty.
    fn candidate_path(&self, s: &str) -> String {
        let stripped = s.strip_prefix(FILE_SCHEME).unwrap_or(s);
        if self.base_path.is_empty() {
            stripped.to_owned()
        } else {
            format!("{}{stripped}", self.base_path)
        }
    }

    /// Platform-canonicalizes `candidate` — the only point where separator interpretation or
    /// case folding is platform-specific (spec §4.F step 3). Falls back to a lexical cleanup
    /// when the path doesn't exist yet, so the allow-list check downstream still has something
    /// meaningful to compare, without this function itself performing filesystem I/O beyond the
    /// canonicalize attempt.
    fn platform_canonicalize(candidate: &str) -> PathBuf {
        let raw = PathBuf::from(candidate);
        dunce::canonicalize(&raw).unwrap_or(raw)
    }

    fn is_allowed(&self, candidate: &Path) -> bool {
        self.allow_list.iter().any(|dir| candidate.starts_with(dir))
    }

    /// Loads `sun` (or a URL-like string standing in for it) from disk.
    pub fn load_target(&self, target: &str) -> Result<Vec<u8>> {
        let candidate = self.candidate_path(target);
        let candidate = Self::platform_canonicalize(&candidate);

        if !self.is_allowed(&candidate) {
            warn!(path = %candidate.display(), "rejected: outside allow-list");
            return Err(ResolverError::Forbidden { path: candidate });
        }

        fs::read(&candidate).map_err(|e| ResolverError::io(candidate.clone(), e))
    }
}

impl LoaderCallback for HostFsLoader {
    fn load(&self, target: &str) -> LoadOutcome {
        match self.load_target(target) {
            Ok(bytes) => LoadOutcome::Bytes(bytes),
            Err(ResolverError::IoError { source, .. }) if source.kind() == ErrorKind::NotFound => {
                LoadOutcome::NotFound
            }
            Err(err) => LoadOutcome::Error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::tempdir;

    #[test]
    fn loads_file_under_base_path() {
        let dir = tempdir().unwrap();
        stdfs::write(dir.path().join("a.sol"), b"contract A {}").unwrap();
        let base = format!("{}/", dir.path().display());
        let loader = HostFsLoader::new(base, vec![dir.path().to_path_buf()]);
        let bytes = loader.load_target("a.sol").unwrap();
        assert_eq!(bytes, b"contract A {}");
    }

    #[test]
    fn strips_file_scheme_before_joining() {
        let dir = tempdir().unwrap();
        stdfs::write(dir.path().join("a.sol"), b"x").unwrap();
        let base = format!("{}/", dir.path().display());
        let loader = HostFsLoader::new(base, vec![dir.path().to_path_buf()]);
        let bytes = loader.load_target("file://a.sol").unwrap();
        assert_eq!(bytes, b"x");
    }

    #[test]
    fn rejects_paths_outside_allow_list() {
        let dir = tempdir().unwrap();
        let outside = tempdir().unwrap();
        stdfs::write(outside.path().join("a.sol"), b"x").unwrap();
        let loader = HostFsLoader::new("", vec![dir.path().to_path_buf()]);
        let err = loader.load_target(outside.path().join("a.sol").to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ResolverError::Forbidden { .. }));
    }

    #[test]
    fn missing_file_surfaces_as_not_found_via_the_callback_trait() {
        let dir = tempdir().unwrap();
        let loader = HostFsLoader::new("", vec![dir.path().to_path_buf()]);
        let target = dir.path().join("missing.sol");
        match loader.load(target.to_str().unwrap()) {
            LoadOutcome::NotFound => {}
            _ => panic!("expected NotFound"),
        }
    }

    #[test]
    fn absolute_sun_under_non_empty_base_path_is_literally_concatenated() {
        // Spec §9 open question, resolved: base_path + sun, no separator collapsing here.
        let loader = HostFsLoader::new("/base/", Vec::new());
        assert_eq!(loader.candidate_path("/a/b.sol"), "/base//a/b.sol");
    }

    #[test]
    fn empty_base_path_loads_sun_verbatim() {
        let loader = HostFsLoader::new("", Vec::new());
        assert_eq!(loader.candidate_path("/a/b.sol"), "/a/b.sol");
    }
}
