use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use lazy_static::lazy_static;
use regex::Regex;

use crate::catalog::Scheme;
use crate::construct::{OtherHasher, Part, QualifiedVerse, Verse};
use crate::error::{Result, VersemapError};

// ------------- MappingRule -------------
/// An ordered rule record tying a verse in its owning scheme to a
/// qualified counterpart in the hub scheme. Rule sets are immutable once
/// loaded for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRule {
    source: Verse,
    target: QualifiedVerse,
}
impl MappingRule {
    pub fn new(source: Verse, target: QualifiedVerse) -> Self {
        Self { source, target }
    }
    pub fn source(&self) -> &Verse {
        &self.source
    }
    pub fn target(&self) -> &QualifiedVerse {
        &self.target
    }
}
impl fmt::Display for MappingRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.source, self.target)
    }
}

// ------------- RuleSource -------------
/// The rule-source collaborator: produces the ordered rule records for a
/// scheme, or fails with a read/parse error. Called at most once per
/// scheme per process lifetime, at table construction.
pub trait RuleSource {
    fn load(&self, scheme: &Scheme, hub: &Scheme) -> Result<Vec<MappingRule>>;
}

// ------------- rule text format -------------
// One rule per line:
//   Gen.31.55 = Gen.32.1
//   Ps.13.5 = Ps.13.5!a Ps.13.6!b
//   Dan.3.24 = ?
// The left-hand side is a verse in the owning scheme, the right-hand side
// a whitespace-separated list of hub verses with optional !part tags, or
// ? when the verse has no hub counterpart. Lines starting with # and
// blank lines are skipped.
lazy_static! {
    static ref RULE_LINE: Regex = Regex::new(r"^([^=\s]+)\s*=\s*(.+?)\s*$").unwrap();
    static ref VERSE_REF: Regex =
        Regex::new(r"^([0-9A-Za-z]+)\.([0-9]{1,3})\.([0-9]{1,3})(?:!([a-z]+))?$").unwrap();
}

fn parse_verse(token: &str, scheme: &Scheme, number: usize) -> Result<(Verse, Part)> {
    let captures = VERSE_REF.captures(token).ok_or(VersemapError::Parse {
        message: format!("malformed verse reference '{}'", token),
        line: Some(number),
    })?;
    // the regex limits chapter and verse to three digits, so they fit in u16
    let chapter: u16 = captures[2].parse().unwrap();
    let verse: u16 = captures[3].parse().unwrap();
    let part = match captures.get(4) {
        Some(section) => Part::Section(section.as_str().to_owned()),
        None => Part::Whole,
    };
    Ok((Verse::new(scheme.id(), &captures[1], chapter, verse), part))
}

/// Parses a mapping script into ordered rule records. The line number of
/// the first offending line is carried in the parse error.
pub fn parse_rules(text: &str, scheme: &Scheme, hub: &Scheme) -> Result<Vec<MappingRule>> {
    let mut rules = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let captures = RULE_LINE.captures(line).ok_or(VersemapError::Parse {
            message: format!("expected 'verse = targets', got '{}'", line),
            line: Some(number),
        })?;
        let (source, source_part) = parse_verse(&captures[1], scheme, number)?;
        if source_part != Part::Whole {
            return Err(VersemapError::Parse {
                message: format!("part tags belong on the hub side, got '{}'", &captures[1]),
                line: Some(number),
            });
        }
        for token in captures[2].split_whitespace() {
            let target = if token == "?" {
                QualifiedVerse::unmappable(Part::Whole)
            } else {
                let (verse, part) = parse_verse(token, hub, number)?;
                QualifiedVerse::mapped(verse, part)
            };
            rules.push(MappingRule::new(source.clone(), target));
        }
    }
    Ok(rules)
}

// ------------- FileRuleSource -------------
/// Reads per-scheme mapping scripts from packaged files, one
/// `<scheme-name>.map` per scheme under a common directory. A missing or
/// malformed file fails the load; the caller memoizes that failure.
#[derive(Debug)]
pub struct FileRuleSource {
    dir: PathBuf,
}
impl FileRuleSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}
impl RuleSource for FileRuleSource {
    fn load(&self, scheme: &Scheme, hub: &Scheme) -> Result<Vec<MappingRule>> {
        let path = self.dir.join(format!("{}.map", scheme.name()));
        let text = std::fs::read_to_string(&path).map_err(|e| {
            VersemapError::Source(format!("cannot read {}: {}", path.display(), e))
        })?;
        parse_rules(&text, scheme, hub)
    }
}

// ------------- TextRuleSource -------------
/// An in-memory rule source holding one mapping script per scheme name.
/// Counts load calls, so callers can observe the at-most-once contract.
#[derive(Debug, Default)]
pub struct TextRuleSource {
    scripts: HashMap<String, String, OtherHasher>,
    loads: AtomicUsize,
}
impl TextRuleSource {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with(mut self, scheme_name: &str, text: &str) -> Self {
        self.scripts.insert(scheme_name.to_owned(), text.to_owned());
        self
    }
    /// How many times `load` has been called, over all schemes.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}
impl RuleSource for TextRuleSource {
    fn load(&self, scheme: &Scheme, hub: &Scheme) -> Result<Vec<MappingRule>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match self.scripts.get(scheme.name()) {
            Some(text) => parse_rules(text, scheme, hub),
            None => Err(VersemapError::Source(format!(
                "no mapping script for scheme {}",
                scheme.name()
            ))),
        }
    }
}
