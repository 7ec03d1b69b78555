//! The Import Resolver: maps `(importer SUN, import path literal)` to a final SUN
//! (spec §4.D).

use crate::{
    error::{ResolverError, Result},
    path_utils,
    remapping::RemappingEngine,
    sun::SourceUnitName,
};

/// Resolves import path literals to source unit names.
///
/// Holds only a reference-shaped view of the session's remapping list; it owns nothing mutable
/// and never touches the VFS (spec §5: "the resolver never writes").
#[derive(Clone, Copy, Debug)]
pub struct ImportResolver<'a> {
    remappings: &'a RemappingEngine,
}

impl<'a> ImportResolver<'a> {
    pub fn new(remappings: &'a RemappingEngine) -> Self {
        Self { remappings }
    }

    /// Resolves `import_path` as it appears in the source file named `importer` to a SUN.
    ///
    /// Never fails except on an empty import literal (spec §4.D: "resolution itself never
    /// fails"). `importer` is only ever passed to [`path_utils::strip_last_segment`] — it is
    /// never normalized, which is what lets a `scheme://host/...`-shaped importer keep its `//`
    /// intact across ancestor walks (spec §4.D's critical invariant).
    pub fn resolve(
        &self,
        importer: &SourceUnitName,
        import_path: &str,
    ) -> Result<SourceUnitName> {
        if import_path.is_empty() {
            return Err(ResolverError::ImportPathEmpty { importer: importer.clone() });
        }

        let candidate = if path_utils::is_relative_import(import_path) {
            self.resolve_relative(importer, import_path)
        } else {
            SourceUnitName::new(import_path)
        };

        Ok(self.remappings.apply(importer, &candidate))
    }

    fn resolve_relative(&self, importer: &SourceUnitName, import_path: &str) -> SourceUnitName {
        let normalized = path_utils::normalize(import_path);
        let (k, tail) = path_utils::count_leading_parent(&normalized);

        let mut prefix = path_utils::strip_last_segment(importer.as_str());
        for _ in 0..k {
            prefix = path_utils::strip_last_segment(&prefix);
        }

        SourceUnitName::new(path_utils::join_non_empty(&prefix, tail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sun(s: &str) -> SourceUnitName {
        SourceUnitName::new(s)
    }

    fn resolve(remaps: &RemappingEngine, importer: &str, path: &str) -> String {
        ImportResolver::new(remaps).resolve(&sun(importer), path).unwrap().into_string()
    }

    #[test]
    fn direct_import_with_no_remap_is_unchanged() {
        let engine = RemappingEngine::new();
        assert_eq!(resolve(&engine, "lib/math.sol", "lib/util.sol"), "lib/util.sol");
    }

    #[test]
    fn relative_import_within_root_less_tree() {
        let engine = RemappingEngine::new();
        assert_eq!(resolve(&engine, "lib/math.sol", "./util.sol"), "lib/util.sol");
        assert_eq!(resolve(&engine, "lib/math.sol", "../token.sol"), "token.sol");
    }

    #[test]
    fn relative_import_under_absolute_importer() {
        let engine = RemappingEngine::new();
        assert_eq!(
            resolve(&engine, "/project/lib/math.sol", "./util.sol"),
            "/project/lib/util.sol"
        );
        assert_eq!(
            resolve(&engine, "/project/lib/math.sol", "../token.sol"),
            "/project/token.sol"
        );
    }

    #[test]
    fn unnormalized_importer_is_preserved_across_ancestor_walks() {
        let engine = RemappingEngine::new();
        assert_eq!(
            resolve(&engine, "lib/src/../contract.sol", "./util/./util.sol"),
            "lib/src/../util/util.sol"
        );
        assert_eq!(
            resolve(&engine, "lib/src/../contract.sol", "../util/../array/util.sol"),
            "lib/src/array/util.sol"
        );
        assert_eq!(
            resolve(&engine, "lib/src/../contract.sol", "../.././../util.sol"),
            "util.sol"
        );
    }

    #[test]
    fn url_style_importer_keeps_scheme_slashes_intact() {
        let engine = RemappingEngine::new();
        assert_eq!(
            resolve(&engine, "https://example.com/a/b.sol", "./c.sol"),
            "https://example.com/a/c.sol"
        );
    }

    #[test]
    fn remapping_does_not_apply_to_relative_import_literal_itself() {
        let mut engine = RemappingEngine::new();
        engine.add_rule("./=A").unwrap();
        // First resolves to /p/u.sol, then `./=A` doesn't match because the *result* doesn't
        // start with `./`.
        assert_eq!(resolve(&engine, "/p/x.sol", "./u.sol"), "/p/u.sol");
    }

    #[test]
    fn empty_import_path_is_rejected() {
        let engine = RemappingEngine::new();
        let err = ImportResolver::new(&engine).resolve(&sun("a.sol"), "").unwrap_err();
        assert!(matches!(err, ResolverError::ImportPathEmpty { .. }));
    }

    #[test]
    fn empty_importer_with_relative_import() {
        let engine = RemappingEngine::new();
        assert_eq!(resolve(&engine, "", "./util.sol"), "util.sol");
    }

    #[test]
    fn more_parent_segments_than_importer_has_are_absorbed_silently() {
        let engine = RemappingEngine::new();
        assert_eq!(resolve(&engine, "a.sol", "../../../b.sol"), "b.sol");
    }

    #[test]
    fn remapping_target_without_trailing_slash_concatenates_without_inserting_one() {
        let mut engine = RemappingEngine::new();
        engine.add_rule("a/=X").unwrap();
        assert_eq!(resolve(&engine, "k.sol", "a/b.sol"), "Xb.sol");
    }

    #[test]
    fn resolution_result_never_contains_dot_segment() {
        let engine = RemappingEngine::new();
        let result = resolve(&engine, "a/b/c.sol", "./x/./y.sol");
        assert!(!result.split('/').any(|seg| seg == "."));
    }
}
