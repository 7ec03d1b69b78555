//! The Loader Dispatcher: backfills the VFS on demand when the resolver produces a SUN it
//! doesn't already hold (spec §4.E).

pub mod host_fs;

use crate::{
    error::{ResolverError, Result},
    sun::SourceUnitName,
    vfs::{Origin, Vfs},
};
use std::collections::{HashMap, HashSet};

/// Outcome of a single loader callback invocation (spec §6's callback signature).
pub enum LoadOutcome {
    /// The callback produced the file's bytes.
    Bytes(Vec<u8>),
    /// The callback has no opinion on this target; the dispatcher should try the next one.
    NotFound,
    /// The callback encountered an application-level error; the dispatcher aborts immediately.
    Error(String),
}

/// A pluggable source of bytes for a SUN or URL-like string.
///
/// Hosts register zero or more of these; the default CLI host registers
/// [`host_fs::HostFsLoader`] last (spec §6).
pub trait LoaderCallback: Send + Sync {
    fn load(&self, target: &str) -> LoadOutcome;
}

impl<F: Fn(&str) -> LoadOutcome + Send + Sync> LoaderCallback for F {
    fn load(&self, target: &str) -> LoadOutcome {
        (self)(target)
    }
}

/// Orchestrates an ordered list of [`LoaderCallback`]s, with per-SUN `urls` fallback lists and a
/// single-load-per-SUN guarantee (spec §4.E, §5).
#[derive(Default)]
pub struct Dispatcher {
    callbacks: Vec<Box<dyn LoaderCallback>>,
    url_lists: HashMap<SourceUnitName, Vec<String>>,
    attempted: HashSet<SourceUnitName>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback at the end of the ordered list.
    pub fn register(&mut self, callback: impl LoaderCallback + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Registers an already-boxed callback at the end of the ordered list.
    pub fn register_boxed(&mut self, callback: Box<dyn LoaderCallback>) {
        self.callbacks.push(callback);
    }

    /// Associates a `urls` fallback list with `sun`, as carried by a standard-JSON
    /// `{"urls": [...]}` source entry (spec §4.E step 1, §6).
    pub fn set_urls(&mut self, sun: SourceUnitName, urls: Vec<String>) {
        self.url_lists.insert(sun, urls);
    }

    /// Ensures `sun` is present in `vfs`, invoking registered callbacks if it is not.
    ///
    /// Returns `Ok(())` once `vfs.contains(sun)` is true. Guarantees that a given SUN is only
    /// ever passed to the registered callbacks once per dispatcher instance, regardless of how
    /// many times `load` is called for it (spec §5: "the first successful load for a SUN is the
    /// one stored").
    pub fn load(&mut self, vfs: &mut Vfs, sun: &SourceUnitName) -> Result<()> {
        if vfs.contains(sun) {
            return Ok(());
        }
        if self.attempted.contains(sun) {
            return Err(ResolverError::FileNotFound { sun: sun.clone() });
        }
        self.attempted.insert(sun.clone());

        let targets: Vec<String> = match self.url_lists.get(sun) {
            Some(urls) => urls.clone(),
            None => vec![sun.as_str().to_owned()],
        };

        for target in &targets {
            for callback in &self.callbacks {
                match callback.load(target) {
                    LoadOutcome::Bytes(bytes) => {
                        debug!(%sun, target, "loader callback produced bytes");
                        vfs.insert(sun.clone(), bytes, Origin::Callback)?;
                        return Ok(());
                    }
                    LoadOutcome::NotFound => continue,
                    LoadOutcome::Error(message) => {
                        warn!(%sun, target, %message, "loader callback reported an error");
                        return Err(ResolverError::CallbackError { sun: sun.clone(), message });
                    }
                }
            }
        }

        warn!(%sun, "no loader callback produced bytes");
        Err(ResolverError::FileNotFound { sun: sun.clone() })
    }
}
