//! A minimal, explicitly non-core import-path extractor.
//!
//! Spec §1 keeps "parsing of source files" out of the resolution core entirely: the resolver
//! only ever consumes import path literals a real parser has already extracted. This module is
//! that narrow collaborator's stand-in — just enough regex to drive the CLI and the integration
//! tests end-to-end without pulling in a Solidity grammar. It is not a parser and must never be
//! treated as one; nothing in `vfs`, `remapping`, `resolver` or `loader` depends on it.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches `import "path";`, `import "path" as X;`, `import {A, B} from "path";`, and
/// `import * as X from "path";`.
static RE_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*import\s+(?:[^"';]+from\s+)?"([^"]*)"(?:\s+as\s+\w+)?\s*;"#).unwrap()
});

/// Extracts the literal import path strings from Solidity-ish source text, in source order.
pub fn extract_import_paths(content: &str) -> Vec<String> {
    RE_IMPORT.captures_iter(content).map(|cap| cap[1].to_owned()).collect()
}
