//! Versemap – a cross-versification reference mapping engine.
//!
//! Different editions of a structured text disagree on how its content is
//! divided into verses: a verse boundary in one numbering scheme may
//! correspond to a verse split across two locations, merged with a
//! neighbor, or shifted, in another. Versemap translates a single
//! [`construct::Verse`] from an arbitrary source scheme into an arbitrary
//! target scheme through a designated *hub* scheme:
//! * A [`catalog::Scheme`] is one book/chapter/verse numbering convention,
//!   registered in the [`catalog::Catalog`] that also designates the hub.
//! * A [`source::MappingRule`] ties a scheme verse to a qualified hub
//!   verse; per-scheme rule sets come from a [`source::RuleSource`].
//! * A [`mapping::SchemeTable`] indexes one scheme's rules in both
//!   directions, preserving split/merge fidelity via
//!   [`construct::QualifiedVerse`] part tags.
//! * The [`mapper::VerseMapper`] drives the two-hop translation and owns
//!   the process-wide [`mapper::MappingCache`].
//!
//! ## Modules
//! * [`construct`] – Fundamental building blocks: verses, parts, qualified
//!   verses, scheme-typed result sets and the ordered lookup index.
//! * [`catalog`] – The reference-system catalog of known schemes.
//! * [`source`] – Mapping rules, the rule text format and its sources
//!   (packaged files or in-memory scripts).
//! * [`mapping`] – The per-scheme bidirectional mapping table.
//! * [`mapper`] – The cache and the public mapping entry point.
//! * [`settings`] – Config-file/environment settings for wiring a mapper.
//!
//! ## Degradation policy
//! Mapping data is optional packaged data. When a scheme's rules cannot be
//! loaded the engine does not fail the lookup; it assumes identical
//! coordinates across schemes (logged, and filtered against the target
//! scheme's catalog), since an approximate answer is more useful to a
//! reader than none. A load failure is memoized permanently and the
//! public operation never raises for data-availability reasons: the
//! result set is simply smaller, possibly empty.
//!
//! ## Quick Start
//! ```
//! use std::sync::Arc;
//! use versemap::catalog::{Book, Catalog};
//! use versemap::construct::Verse;
//! use versemap::mapper::VerseMapper;
//! use versemap::source::TextRuleSource;
//!
//! let mut catalog = Catalog::new("KJV", vec![Book::new("Gen", vec![31, 25])]);
//! let synodal = catalog.add_scheme("Synodal", vec![Book::new("Gen", vec![31, 25])]);
//! let source = TextRuleSource::new().with("Synodal", "Gen.1.5 = Gen.1.6\n");
//! let mapper = VerseMapper::new(Arc::new(catalog), Arc::new(source));
//!
//! let verse = Verse::new(synodal, "Gen", 1, 5);
//! let hub = mapper.catalog().hub();
//! let result = mapper.map(&verse, hub);
//! assert_eq!(result.iter().next().unwrap().verse(), 6);
//! ```

pub mod construct;
pub mod catalog;
pub mod source;
pub mod mapping;
pub mod mapper;
pub mod settings;
pub mod error;
