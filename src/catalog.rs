use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::construct::{OtherHasher, SchemeHasher, SchemeId, Verse, VerseSet};

// ------------- Book -------------
/// A book within a scheme, with the verse count of every chapter.
/// Chapter and verse numbering is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    name: String,
    chapter_verses: Vec<u16>,
}
impl Book {
    pub fn new(name: &str, chapter_verses: Vec<u16>) -> Self {
        Self {
            name: name.to_owned(),
            chapter_verses,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn chapters(&self) -> u16 {
        self.chapter_verses.len() as u16
    }
    pub fn verses(&self, chapter: u16) -> u16 {
        if chapter == 0 {
            return 0;
        }
        *self
            .chapter_verses
            .get(chapter as usize - 1)
            .unwrap_or(&0)
    }
}

// ------------- Scheme -------------
/// A versification scheme: a named book/chapter/verse numbering
/// convention. Immutable once the catalog hands it out.
#[derive(Debug)]
pub struct Scheme {
    scheme: SchemeId, // the catalog-assigned identity we can "talk" about
    name: String,
    books: HashMap<String, Book, OtherHasher>,
}
impl Scheme {
    fn new(scheme: SchemeId, name: &str, books: Vec<Book>) -> Self {
        let mut kept = HashMap::<String, Book, OtherHasher>::default();
        for book in books {
            kept.insert(book.name().to_owned(), book);
        }
        Self {
            scheme,
            name: name.to_owned(),
            books: kept,
        }
    }
    pub fn id(&self) -> SchemeId {
        self.scheme
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn book(&self, name: &str) -> Option<&Book> {
        self.books.get(name)
    }
    /// Whether the given coordinates exist under this scheme.
    pub fn contains(&self, book: &str, chapter: u16, verse: u16) -> bool {
        match self.books.get(book) {
            Some(b) => verse >= 1 && verse <= b.verses(chapter),
            None => false,
        }
    }
    /// The existence lookup used by the guess fallback: a scheme-typed
    /// verse when the coordinates exist, and a not-found signal otherwise.
    pub fn verse(&self, book: &str, chapter: u16, verse: u16) -> Option<Verse> {
        if self.contains(book, chapter, verse) {
            Some(Verse::new(self.scheme, book, chapter, verse))
        } else {
            None
        }
    }
}
impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ------------- Catalog -------------
/// The reference-system catalog: owns every known scheme and designates
/// the hub scheme through which all mapping is routed. Schemes are added
/// during construction and the catalog is shared immutably afterwards.
#[derive(Debug)]
pub struct Catalog {
    kept: HashMap<String, Arc<Scheme>, OtherHasher>,
    lookup: HashMap<SchemeId, Arc<Scheme>, SchemeHasher>, // double indexing, but schemes are few so it's not a big deal
    hub: SchemeId,
    lower_bound: SchemeId,
}
impl Catalog {
    /// Creates the catalog with its hub scheme, which always gets the
    /// first identity.
    pub fn new(hub_name: &str, hub_books: Vec<Book>) -> Self {
        let mut catalog = Self {
            kept: HashMap::default(),
            lookup: HashMap::default(),
            hub: 0,
            lower_bound: 0,
        };
        catalog.hub = catalog.add_scheme(hub_name, hub_books);
        catalog
    }
    pub fn add_scheme(&mut self, name: &str, books: Vec<Book>) -> SchemeId {
        if let Some(existing) = self.kept.get(name) {
            return existing.id();
        }
        self.lower_bound += 1;
        let scheme = Arc::new(Scheme::new(self.lower_bound, name, books));
        self.kept.insert(name.to_owned(), Arc::clone(&scheme));
        self.lookup.insert(scheme.id(), scheme);
        self.lower_bound
    }
    pub fn hub(&self) -> SchemeId {
        self.hub
    }
    pub fn hub_scheme(&self) -> Arc<Scheme> {
        // the hub is inserted in new() and entries are never removed
        Arc::clone(self.lookup.get(&self.hub).unwrap())
    }
    pub fn scheme(&self, scheme: SchemeId) -> Option<Arc<Scheme>> {
        self.lookup.get(&scheme).map(Arc::clone)
    }
    pub fn scheme_by_name(&self, name: &str) -> Option<Arc<Scheme>> {
        self.kept.get(name).map(Arc::clone)
    }
    /// Constructs the empty scheme-typed result set that mapping results
    /// are unioned into.
    pub fn empty_set(&self, scheme: SchemeId) -> VerseSet {
        VerseSet::new(scheme)
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}
