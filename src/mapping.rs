use crate::catalog::Scheme;
use crate::construct::{Lookup, OtherHasher, Part, QualifiedVerse, SchemeId, Verse};
use crate::error::Result;
use crate::source::RuleSource;

// ------------- SchemeTable -------------
/// The ordered rule set of one non-hub scheme, indexed for both
/// directions. Built once from a rule source, eagerly, so that a failed
/// build happens at construction time and can be memoized; never rebuilt
/// and freely shared across threads afterwards.
///
/// Three indexes are kept: scheme verse to qualified hub verses (splits
/// yield several entries, in rule order), exact (hub verse, part) back to
/// scheme verses, and hub verse back to every scheme verse tied to it
/// regardless of part (the "full range").
#[derive(Debug)]
pub struct SchemeTable {
    scheme: SchemeId,
    forward: Lookup<Verse, QualifiedVerse, OtherHasher>,
    backward: Lookup<(Verse, Part), Verse, OtherHasher>,
    backward_all: Lookup<Verse, Verse, OtherHasher>,
}
impl SchemeTable {
    /// Reads all rules for the scheme and builds the indexes.
    pub fn build(scheme: &Scheme, hub: &Scheme, source: &dyn RuleSource) -> Result<SchemeTable> {
        let rules = source.load(scheme, hub)?;
        let mut forward = Lookup::new();
        let mut backward = Lookup::new();
        let mut backward_all = Lookup::new();
        for rule in &rules {
            forward.insert(rule.source().clone(), rule.target().clone());
            if let QualifiedVerse::Mapped { verse, part } = rule.target() {
                backward.insert((verse.clone(), part.clone()), rule.source().clone());
                backward_all.insert(verse.clone(), rule.source().clone());
            }
        }
        Ok(Self {
            scheme: scheme.id(),
            forward,
            backward,
            backward_all,
        })
    }
    pub fn scheme(&self) -> SchemeId {
        self.scheme
    }
    /// Translates a verse of this scheme into its qualified hub verses,
    /// in rule order. More than one entry means the verse splits across
    /// hub locations; an `Unmappable` entry means a rule fired but the
    /// verse has no hub counterpart; an empty list means no rule covers
    /// the verse.
    pub fn map(&self, verse: &Verse) -> Vec<QualifiedVerse> {
        match self.forward.lookup(verse) {
            Some(found) => found.to_vec(),
            None => Vec::new(),
        }
    }
    /// Translates a qualified hub verse back into this scheme: the exact
    /// sub-range when a rule covers the (verse, part) pair, the full
    /// range tied to the hub verse when no finer rule exists, and nothing
    /// for an `Unmappable` entry.
    pub fn unmap(&self, qualified: &QualifiedVerse) -> Vec<Verse> {
        let QualifiedVerse::Mapped { verse, part } = qualified else {
            return Vec::new();
        };
        if let Some(found) = self.backward.lookup(&(verse.clone(), part.clone())) {
            return found.to_vec();
        }
        match self.backward_all.lookup(verse) {
            Some(found) => found.to_vec(),
            None => Vec::new(),
        }
    }
}
