//! Rendering assets. Nothing in the analytics core depends on this module.

pub mod font;

pub use font::{
    AssetError, FontCache, FontFetcher, FontResolution, FontResolver, FontSource, FontStrategy,
    StrategyFailure, DEFAULT_FONT_FILE, SYSTEM_FONT_PATHS,
};
