//! The remapping engine: parses `[context:]prefix=[target]` rules and selects, for a given
//! `(importer, candidate)` pair, the single rule that rewrites the candidate SUN (spec §4.C).

use crate::{
    error::{ResolverError, Result},
    sun::SourceUnitName,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single parsed remapping rule.
///
/// `context` may be empty (matches every importer). `prefix` is always non-empty. `target`
/// defaults to `prefix` (an identity remap) when the right-hand side of `=` was omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remapping {
    pub context: String,
    pub prefix: String,
    pub target: String,
    /// Declaration order; ties among equally-specific rules are broken by highest ordinal
    /// (spec §3: "last-declared wins ties").
    pub ordinal: usize,
}

impl Remapping {
    /// Parses a single `[context:]prefix=[target]` rule.
    ///
    /// The first unescaped `=` splits the left-hand side from the target. On the left-hand side,
    /// the first `:` at column > 0 delimits context from prefix; a rule meant to have an empty
    /// context but whose prefix contains a `:` (e.g. a URL scheme) must be written with a leading
    /// `:`, e.g. `:https://example.com/=/local/` (spec §4.C, §9 open question — this is the
    /// documented workaround, adopted here as the single rule).
    pub fn parse(raw: &str, ordinal: usize) -> Result<Self> {
        let Some(eq) = raw.find('=') else {
            return Err(ResolverError::InvalidRemapping {
                raw: raw.to_owned(),
                reason: "missing '='".into(),
            });
        };
        let (lhs, rhs) = (&raw[..eq], &raw[eq + 1..]);

        let (context, prefix) = match lhs.find(':') {
            Some(0) => ("", &lhs[1..]),
            Some(colon) => (&lhs[..colon], &lhs[colon + 1..]),
            None => ("", lhs),
        };

        if prefix.is_empty() {
            return Err(ResolverError::InvalidRemapping {
                raw: raw.to_owned(),
                reason: "empty prefix".into(),
            });
        }

        let target = if rhs.is_empty() { prefix } else { rhs };

        Ok(Self { context: context.to_owned(), prefix: prefix.to_owned(), target: target.to_owned(), ordinal })
    }
}

impl fmt::Display for Remapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.context.is_empty() {
            write!(f, ":{}={}", self.prefix, self.target)
        } else {
            write!(f, "{}:{}={}", self.context, self.prefix, self.target)
        }
    }
}

/// Ordered collection of remapping rules plus the selection algorithm (spec §4.C).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RemappingEngine {
    rules: Vec<Remapping>,
}

impl RemappingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and appends a rule, assigning it the next ordinal.
    pub fn add_rule(&mut self, raw: &str) -> Result<&Remapping> {
        let ordinal = self.rules.len();
        let rule = Remapping::parse(raw, ordinal)?;
        self.rules.push(rule);
        Ok(self.rules.last().unwrap())
    }

    pub fn push(&mut self, rule: Remapping) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Remapping] {
        &self.rules
    }

    /// Applies at most one remapping to `candidate`, given the importer's SUN.
    ///
    /// Selection: among rules where `importer` starts with `context` and `candidate` starts with
    /// `prefix`, the longest `prefix` wins; ties are broken by highest `ordinal`. The winning
    /// rule rewrites exactly the leading `prefix` with `target` — no slash is inserted and no
    /// normalization is applied. If no rule matches, `candidate` is returned unchanged. The
    /// output is never fed back into this function (spec §4.C: "cascade prohibition").
    pub fn apply(&self, importer: &SourceUnitName, candidate: &SourceUnitName) -> SourceUnitName {
        let best = self
            .rules
            .iter()
            .filter(|r| importer.starts_with(&r.context) && candidate.starts_with(&r.prefix))
            .max_by_key(|r| (r.prefix.len(), r.ordinal));

        match best {
            Some(rule) => {
                trace!(%importer, %candidate, rule = %rule, "remapping selected");
                let rewritten = format!("{}{}", rule.target, &candidate.as_str()[rule.prefix.len()..]);
                SourceUnitName::new(rewritten)
            }
            None => candidate.clone(),
        }
    }
}

impl fmt::Display for RemappingEngine {
    /// Re-emits the configured rule set, one `[context:]prefix=[target]` rule per line in
    /// declaration order, round-tripping through the same grammar [`Remapping::parse`] consumes
    /// (spec §6: "the core must expose the ordered rule set exactly as configured"; SPEC_FULL
    /// §11's "remapping round-trip exposure").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sun(s: &str) -> SourceUnitName {
        SourceUnitName::new(s)
    }

    #[test]
    fn parses_identity_remap_when_target_omitted() {
        let r = Remapping::parse("a/b/=", 0).unwrap();
        assert_eq!(r.prefix, "a/b/");
        assert_eq!(r.target, "a/b/");
    }

    #[test]
    fn rejects_empty_prefix() {
        assert!(Remapping::parse("=target/", 0).is_err());
        assert!(Remapping::parse("ctx:=target/", 0).is_err());
    }

    #[test]
    fn leading_colon_means_empty_context() {
        let r = Remapping::parse(":https://h/=/local/", 0).unwrap();
        assert_eq!(r.context, "");
        assert_eq!(r.prefix, "https://h/");
        assert_eq!(r.target, "/local/");
    }

    #[test]
    fn first_colon_at_column_gt_zero_delimits_context() {
        let r = Remapping::parse("m1:g/=new/", 0).unwrap();
        assert_eq!(r.context, "m1");
        assert_eq!(r.prefix, "g/");
        assert_eq!(r.target, "new/");
    }

    #[test]
    fn longest_prefix_then_last_ordinal_wins() {
        let mut engine = RemappingEngine::new();
        engine.add_rule("a/=X").unwrap();
        engine.add_rule("a/b/=Y").unwrap();
        engine.add_rule("a/b/=Z").unwrap();
        let result = engine.apply(&sun("k.sol"), &sun("a/b/c.sol"));
        assert_eq!(result.as_str(), "Zc.sol");
    }

    #[test]
    fn context_gates_selection() {
        let mut engine = RemappingEngine::new();
        engine.add_rule("m1:g/=new/").unwrap();
        engine.add_rule("m2:g/=old/").unwrap();
        let result = engine.apply(&sun("m2/x.sol"), &sun("g/lib.sol"));
        assert_eq!(result.as_str(), "old/lib.sol");
    }

    #[test]
    fn empty_context_with_scheme_workaround() {
        let mut engine = RemappingEngine::new();
        engine.add_rule(":https://h/=/local/").unwrap();
        let result = engine.apply(&sun("anything.sol"), &sun("https://h/a.sol"));
        assert_eq!(result.as_str(), "/local/a.sol");
    }

    #[test]
    fn no_match_returns_candidate_unchanged() {
        let engine = RemappingEngine::new();
        let result = engine.apply(&sun("k.sol"), &sun("lib/util.sol"));
        assert_eq!(result.as_str(), "lib/util.sol");
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let r = Remapping::parse("m1:g/=new/", 0).unwrap();
        let rendered = r.to_string();
        assert_eq!(rendered, "m1:g/=new/");
        let reparsed = Remapping::parse(&rendered, 0).unwrap();
        assert_eq!(r, reparsed);
    }

    #[test]
    fn engine_display_reemits_the_configured_rule_set_in_order() {
        let mut engine = RemappingEngine::new();
        engine.add_rule("a/=X").unwrap();
        engine.add_rule("m1:g/=new/").unwrap();
        engine.add_rule(":https://h/=/local/").unwrap();

        let rendered = engine.to_string();
        assert_eq!(rendered, "a/=X\nm1:g/=new/\n:https://h/=/local/");

        let mut reparsed = RemappingEngine::new();
        for (ordinal, line) in rendered.lines().enumerate() {
            reparsed.push(Remapping::parse(line, ordinal).unwrap());
        }
        assert_eq!(reparsed.rules(), engine.rules());
    }

    #[test]
    fn empty_engine_displays_as_empty_string() {
        assert_eq!(RemappingEngine::new().to_string(), "");
    }
}
