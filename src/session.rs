//! Ties the VFS, remapping engine and loader dispatcher together into the single entry point a
//! parsing driver calls into while walking a file's imports (spec §2 "Data flow").

use crate::{
    error::Result,
    loader::Dispatcher,
    remapping::RemappingEngine,
    resolver::ImportResolver,
    sun::SourceUnitName,
    vfs::{SourceUnit, Vfs},
};

/// A single compilation session: one VFS, one remapping list, one dispatcher, sharing nothing
/// mutable with any other session (spec §5).
pub struct Session {
    vfs: Vfs,
    remappings: RemappingEngine,
    dispatcher: Dispatcher,
}

impl Session {
    pub(crate) fn new(vfs: Vfs, remappings: RemappingEngine, dispatcher: Dispatcher) -> Self {
        Self { vfs, remappings, dispatcher }
    }

    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    pub fn remappings(&self) -> &RemappingEngine {
        &self.remappings
    }

    /// Resolves `import_path` as it appears in `importer`, loading it into the VFS on demand if
    /// it isn't already present. Returns the final SUN and its now-guaranteed-present content.
    ///
    /// This is the composition spec §2 describes: "During parsing, each import statement is
    /// handed to [the resolver] along with the importer's SUN; [it] consults [the remapping
    /// engine] and returns a new SUN. If that SUN is not in [the VFS], [the dispatcher] is
    /// invoked."
    pub fn resolve_import(
        &mut self,
        importer: &SourceUnitName,
        import_path: &str,
    ) -> Result<(SourceUnitName, &SourceUnit)> {
        let sun = ImportResolver::new(&self.remappings).resolve(importer, import_path)?;
        self.dispatcher.load(&mut self.vfs, &sun)?;
        let unit = self.vfs.get(&sun).expect("dispatcher guarantees presence on success");
        Ok((sun, unit))
    }

    /// Resolves without forcing a load; useful for diagnostics that want the SUN an import would
    /// produce without triggering disk/network access.
    pub fn resolve_only(
        &self,
        importer: &SourceUnitName,
        import_path: &str,
    ) -> Result<SourceUnitName> {
        ImportResolver::new(&self.remappings).resolve(importer, import_path)
    }
}
