//! # Lexgate
//!
//! A lexical validation and OCR post-correction engine for historical
//! periodical corpora.
//!
//! Lexgate decides, for OCR-scanned text, whether each token is a genuine
//! word of the target language — judged against curated word lists rather
//! than a general dictionary — and, when it is not, searches an ordered set
//! of heuristic repair strategies for a replacement. It also reassembles
//! words that OCR has broken apart with spurious spaces.
//!
//! ## Features
//!
//! - Word-validity oracle with compound- and hyphen-aware recognition
//! - Pluggable compounding strategies (generic, Swedish, German)
//! - Multi-strategy candidate-correction search with frequency gating
//! - Spaced-word detection and reassembly
//! - Sliding-window frequency aggregation over temporally ordered batches
//! - Batch corpus processing with per-file parallelism

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod correction;
pub mod document;
pub mod error;
pub mod frequency;
pub mod lexicon;
pub mod reassembly;
pub mod util;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
