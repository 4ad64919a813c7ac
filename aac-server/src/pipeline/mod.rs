//! Content-resolution pipeline
//!
//! Pool Store -> (category filter) -> Deduplicator -> Seed Resolver
//! (board path only) -> per-concept fan-out to the Translation and
//! Image resolvers and the Locale Mapper -> board/list assembly.
//!
//! Nothing in this pipeline raises under normal operation: every stage
//! degrades (fallback pool, untranslated label, placeholder image)
//! rather than failing a request.

pub mod board;
pub mod dedupe;
pub mod image;
pub mod locale;
pub mod pool;
pub mod seed;
pub mod translate;

pub use board::{BoardBuilder, SymbolItem, Tile};
pub use dedupe::dedupe;
pub use image::{load_concept_map, ConceptMap, ImageResolver, IMAGE_CACHE_VERSION};
pub use locale::tts_locale_for_lang;
pub use pool::{ConceptPool, PoolStore};
pub use seed::resolve_seed;
pub use translate::TranslationResolver;
