use serde::{Deserialize, Serialize};

// indexes use HashMap with a fast hasher
use core::hash::{BuildHasher, BuildHasherDefault};
use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::hash::Hash;
use seahash::SeaHasher;

// used to print out readable forms of a construct
use std::fmt;

// ------------- SchemeId -------------
/// Opaque identity of a versification scheme, assigned by the [`crate::catalog::Catalog`].
pub type SchemeId = u64;

pub type SchemeHasher = BuildHasherDefault<SeaHasher>;
pub type OtherHasher = BuildHasherDefault<SeaHasher>;

// ------------- Verse -------------
/// A located verse in a structured text under a specific scheme.
/// Two verses are equal only if their schemes are equal and all coordinates match.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Verse {
    scheme: SchemeId,
    book: String,
    chapter: u16,
    verse: u16,
}
impl Verse {
    pub fn new(scheme: SchemeId, book: &str, chapter: u16, verse: u16) -> Self {
        Self {
            scheme,
            book: book.to_owned(),
            chapter,
            verse,
        }
    }
    // Coordinates are encapsulated and only exposed through "getters",
    // which yields true immutability for verses after creation.
    pub fn scheme(&self) -> SchemeId {
        self.scheme
    }
    pub fn book(&self) -> &str {
        &self.book
    }
    pub fn chapter(&self) -> u16 {
        self.chapter
    }
    pub fn verse(&self) -> u16 {
        self.verse
    }
    /// The same coordinates relocated into another scheme. This is a
    /// renaming, not a mapping, so it is only meaningful where a
    /// same-coordinates assumption is explicitly wanted.
    pub fn relocate(&self, scheme: SchemeId) -> Verse {
        Verse {
            scheme,
            book: self.book.clone(),
            chapter: self.chapter,
            verse: self.verse,
        }
    }
}
impl fmt::Display for Verse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}.{}", self.book, self.chapter, self.verse)
    }
}

// ------------- Part -------------
/// Sub-verse alignment tag. `Whole` is the unqualified default, while
/// `Section` names a fragment (such as "a" or "b") relative to the
/// mapping rule that produced it.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Part {
    Whole,
    Section(String),
}
impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Part::Whole => Ok(()),
            Part::Section(s) => write!(f, "!{}", s),
        }
    }
}

// ------------- QualifiedVerse -------------
/// A verse qualified with split/merge alignment, produced when a mapping
/// rule is applied. `Mapped` carries the counterpart verse, while
/// `Unmappable` records that a rule fired but the location has no
/// representable counterpart, which is distinct from "no rule found".
/// Never mutated after creation; the part is carried unchanged across the
/// hub hop.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum QualifiedVerse {
    Mapped { verse: Verse, part: Part },
    Unmappable { part: Part },
}
impl QualifiedVerse {
    pub fn mapped(verse: Verse, part: Part) -> Self {
        QualifiedVerse::Mapped { verse, part }
    }
    pub fn unmappable(part: Part) -> Self {
        QualifiedVerse::Unmappable { part }
    }
    pub fn verse(&self) -> Option<&Verse> {
        match self {
            QualifiedVerse::Mapped { verse, .. } => Some(verse),
            QualifiedVerse::Unmappable { .. } => None,
        }
    }
    pub fn part(&self) -> &Part {
        match self {
            QualifiedVerse::Mapped { part, .. } => part,
            QualifiedVerse::Unmappable { part } => part,
        }
    }
}
impl fmt::Display for QualifiedVerse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QualifiedVerse::Mapped { verse, part } => write!(f, "{}{}", verse, part),
            QualifiedVerse::Unmappable { part } => write!(f, "?{}", part),
        }
    }
}

// ------------- VerseSet -------------
/// The scheme-typed result set: an ordered, duplicate-free union of
/// verses, built incrementally in encounter order. May be empty, which is
/// the designed signal for "no mapping could be determined".
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct VerseSet {
    scheme: SchemeId,
    verses: Vec<Verse>,
}
impl VerseSet {
    pub fn new(scheme: SchemeId) -> Self {
        Self {
            scheme,
            verses: Vec::new(),
        }
    }
    pub fn scheme(&self) -> SchemeId {
        self.scheme
    }
    /// Union a verse into the set, keeping encounter order. Verses from a
    /// different scheme are refused since the set is scheme-typed.
    pub fn push(&mut self, verse: Verse) -> bool {
        if verse.scheme() != self.scheme || self.verses.contains(&verse) {
            return false;
        }
        self.verses.push(verse);
        true
    }
    pub fn contains(&self, verse: &Verse) -> bool {
        self.verses.contains(verse)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Verse> {
        self.verses.iter()
    }
    pub fn len(&self) -> usize {
        self.verses.len()
    }
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}
impl fmt::Display for VerseSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::new();
        for v in self.iter() {
            s += &(v.to_string() + ",");
        }
        s.pop();
        write!(f, "{{{}}}", s)
    }
}

// ------------- Lookup -------------
/// A one-to-many index that preserves insertion order per key, so that
/// rule order survives lookup. Duplicate values under the same key are
/// kept once.
#[derive(Debug)]
pub struct Lookup<K, V, H = RandomState> {
    index: HashMap<K, Vec<V>, H>,
}
impl<K: Eq + Hash, V: PartialEq, H: BuildHasher + Default> Lookup<K, V, H> {
    pub fn new() -> Self {
        Self {
            index: HashMap::<K, Vec<V>, H>::default(),
        }
    }
    pub fn insert(&mut self, key: K, value: V) {
        let list = self.index.entry(key).or_insert(Vec::<V>::new());
        if !list.contains(&value) {
            list.push(value);
        }
    }
    pub fn lookup(&self, key: &K) -> Option<&[V]> {
        self.index.get(key).map(|list| list.as_slice())
    }
}
impl<K: Eq + Hash, V: PartialEq, H: BuildHasher + Default> Default for Lookup<K, V, H> {
    fn default() -> Self {
        Self::new()
    }
}
