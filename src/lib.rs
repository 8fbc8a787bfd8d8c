// ABOUTME: Library module for the slidev-deck tools.
// ABOUTME: Renders, patches, validates, audits and exports Slidev decks described in JSON.

// Reexport modules
pub mod assets;
pub mod audit;
pub mod config;
pub mod deck;
pub mod errors;
pub mod export;
pub mod introspect;
pub mod listing;
pub mod model;
pub mod patch;
pub mod scaffold;
pub mod schema;
pub mod slide;
pub mod utils;
pub mod validate;

// Reexport common types and functions
pub use assets::{write_asset, write_assets};
pub use audit::{audit_project, extract_sources, AuditReport};
pub use config::Config;
pub use deck::{render_deck, render_deck_json, render_manifest, DeckOutcome};
pub use errors::{DeckError, Result};
pub use export::{export_deck, ExportConfig, ExportFormat};
pub use introspect::{introspect_project, Introspection};
pub use listing::{list_slides, read_slide, SlideEntry, SlideText};
pub use model::{Asset, AssetSource, Deck, Mapping, Slide};
pub use patch::{apply_patch, apply_patch_json, PatchOutcome};
pub use scaffold::{init_deck, init_project, InitOptions, ScaffoldEntry};
pub use schema::SchemaKind;
pub use slide::{parse_slide, render_slide, ParsedSlide};
pub use validate::{normalize, validate_document, validate_json, Document, NormalizedDocument};
