//! Typed `serde` shapes for the standard-JSON `sources` fragment (spec §6, SPEC_FULL §10.4).
//!
//! Serializing the outer `{"language", "sources", "settings"}` envelope stays a host concern —
//! this module only exposes the `sources`-shaped fragment as typed Rust values, so a host can
//! embed it directly in its own standard-JSON-like payload instead of reaching for
//! `serde_json::Value`.

use crate::sun::SourceUnitName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of the standard-JSON `sources` map: either inline `content` or a `urls` fallback
/// list (spec §4.B, §6).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceEntry {
    /// `{"content": "..."}`
    Content {
        /// The verbatim source text.
        content: String,
    },
    /// `{"urls": ["...", ...]}`
    Urls {
        /// Fallback URL list, tried in declared order by the loader dispatcher (spec §4.E).
        urls: Vec<String>,
    },
}

/// The `sources` map keyed by the verbatim JSON key, which is the SUN itself (spec §4.B).
///
/// `BTreeMap` keeps iteration order stable for anything that serializes this back out, matching
/// the teacher's `Sources` alias (`BTreeMap<PathBuf, Source>` in
/// `crates/artifacts/src/sources.rs`).
pub type StandardJsonSources = BTreeMap<SourceUnitName, SourceEntry>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_entry_round_trips() {
        let json = r#"{"content": "contract A {}"}"#;
        let entry: SourceEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry, SourceEntry::Content { content: "contract A {}".into() });
        let back = serde_json::to_string(&entry).unwrap();
        assert_eq!(serde_json::from_str::<SourceEntry>(&back).unwrap(), entry);
    }

    #[test]
    fn urls_entry_round_trips() {
        let json = r#"{"urls": ["https://mirror-a/x.sol", "https://mirror-b/x.sol"]}"#;
        let entry: SourceEntry = serde_json::from_str(json).unwrap();
        assert_eq!(
            entry,
            SourceEntry::Urls {
                urls: vec!["https://mirror-a/x.sol".into(), "https://mirror-b/x.sol".into()]
            }
        );
    }

    #[test]
    fn sources_map_keys_are_verbatim_suns() {
        let json = r#"{"lib/util.sol": {"content": "library Util {}"}}"#;
        let sources: StandardJsonSources = serde_json::from_str(json).unwrap();
        assert!(sources.contains_key(&SourceUnitName::new("lib/util.sol")));
    }
}
