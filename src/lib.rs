// src/lib.rs

pub mod core;
pub mod error;
pub mod service;
pub mod store;

pub use crate::core::alphabet::GlyphCatalog;
pub use crate::core::renderer::{RenderingEngine, GLYPH_HEIGHT};
pub use crate::error::{Result, WordArtError};
pub use crate::service::RenderingService;
pub use crate::store::db::Database;
pub use crate::store::words::{PageInfo, Statistics, WordPage, WordRecord, WordStore, WordUpdate};
