use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};

/// CJK font file name, looked up relative to the working directory.
pub const DEFAULT_FONT_FILE: &str = "SimHei.ttf";

/// Well-known locations of CJK-capable fonts, tried in this order.
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
    "C:\\Windows\\Fonts\\msyh.ttc",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("Font file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Font file is empty: {}", .0.display())]
    Empty(PathBuf),

    #[error("IO error reading {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("No candidate system font path exists")]
    NoSystemFont,

    #[error("No font fetcher configured")]
    NoFetcher,

    #[error("Font fetch failed: {0}")]
    Fetch(String),
}

/// Network download of a font, supplied by the embedding application.
pub trait FontFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError>;
}

/// Memo for the network strategy.
///
/// The first fetch result, success or failure, is kept for the lifetime of
/// the cache; later calls never reach the fetcher again, whatever url they
/// pass.
#[derive(Debug, Default)]
pub struct FontCache {
    cell: OnceCell<Result<Arc<Vec<u8>>, AssetError>>,
}

static GLOBAL_FONT_CACHE: Lazy<Arc<FontCache>> = Lazy::new(|| Arc::new(FontCache::new()));

impl FontCache {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// The process-wide cache.
    pub fn global() -> Arc<FontCache> {
        Arc::clone(&GLOBAL_FONT_CACHE)
    }

    pub fn is_populated(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn get_or_fetch(
        &self,
        url: &str,
        fetcher: &dyn FontFetcher,
    ) -> Result<Arc<Vec<u8>>, AssetError> {
        self.cell
            .get_or_init(|| {
                tracing::debug!(url, "fetching font");
                match fetcher.fetch(url) {
                    Ok(bytes) if bytes.is_empty() => Err(AssetError::Fetch("empty body".into())),
                    Ok(bytes) => Ok(Arc::new(bytes)),
                    Err(err) => Err(err),
                }
            })
            .clone()
    }
}

/// One probing step, tried in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontStrategy {
    LocalFile(PathBuf),
    SystemPaths(Vec<PathBuf>),
    Network { url: String },
    Builtin,
}

impl fmt::Display for FontStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontStrategy::LocalFile(path) => write!(f, "local file {}", path.display()),
            FontStrategy::SystemPaths(paths) => write!(f, "system paths ({})", paths.len()),
            FontStrategy::Network { url } => write!(f, "network {url}"),
            FontStrategy::Builtin => write!(f, "builtin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    LocalFile(PathBuf),
    SystemPath(PathBuf),
    Network(String),
    /// The renderer's own default font; carries no data.
    Builtin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyFailure {
    pub strategy: String,
    pub error: AssetError,
}

/// What the resolver settled on, plus every strategy that failed before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontResolution {
    pub source: FontSource,
    pub data: Option<Arc<Vec<u8>>>,
    pub failures: Vec<StrategyFailure>,
}

impl FontResolution {
    pub fn is_fallback(&self) -> bool {
        self.source == FontSource::Builtin
    }
}

/// Ordered, deterministic font lookup. Never fails: when every strategy
/// misses, the result is the built-in fallback.
pub struct FontResolver {
    strategies: Vec<FontStrategy>,
    fetcher: Option<Arc<dyn FontFetcher>>,
    cache: Arc<FontCache>,
}

impl fmt::Debug for FontResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontResolver")
            .field("strategies", &self.strategies)
            .field("fetcher", &self.fetcher.is_some())
            .finish()
    }
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::with_defaults(None)
    }
}

impl FontResolver {
    pub fn new(strategies: Vec<FontStrategy>) -> Self {
        Self {
            strategies,
            fetcher: None,
            cache: FontCache::global(),
        }
    }

    /// Local file (explicit path, else [`DEFAULT_FONT_FILE`]), then system
    /// paths, then builtin. A network step is added by [`Self::with_fetcher`].
    pub fn with_defaults(local: Option<PathBuf>) -> Self {
        let local = local.unwrap_or_else(|| PathBuf::from(DEFAULT_FONT_FILE));
        Self::new(vec![
            FontStrategy::LocalFile(local),
            FontStrategy::SystemPaths(SYSTEM_FONT_PATHS.iter().map(PathBuf::from).collect()),
            FontStrategy::Builtin,
        ])
    }

    /// Insert a network step before the builtin fallback.
    pub fn with_fetcher(mut self, url: impl Into<String>, fetcher: Arc<dyn FontFetcher>) -> Self {
        let step = FontStrategy::Network { url: url.into() };
        let at = self
            .strategies
            .iter()
            .position(|s| *s == FontStrategy::Builtin)
            .unwrap_or(self.strategies.len());
        self.strategies.insert(at, step);
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_cache(mut self, cache: Arc<FontCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn strategies(&self) -> &[FontStrategy] {
        &self.strategies
    }

    pub fn resolve(&self) -> FontResolution {
        let mut failures = Vec::new();

        for strategy in &self.strategies {
            match self.attempt(strategy) {
                Ok((source, data)) => {
                    tracing::debug!(%strategy, "font resolved");
                    return FontResolution {
                        source,
                        data,
                        failures,
                    };
                }
                Err(error) => {
                    tracing::warn!(%strategy, %error, "font strategy failed");
                    failures.push(StrategyFailure {
                        strategy: strategy.to_string(),
                        error,
                    });
                }
            }
        }

        FontResolution {
            source: FontSource::Builtin,
            data: None,
            failures,
        }
    }

    fn attempt(
        &self,
        strategy: &FontStrategy,
    ) -> Result<(FontSource, Option<Arc<Vec<u8>>>), AssetError> {
        match strategy {
            FontStrategy::LocalFile(path) => {
                let data = read_font(path)?;
                Ok((FontSource::LocalFile(path.clone()), Some(data)))
            }
            FontStrategy::SystemPaths(paths) => {
                let path = paths
                    .iter()
                    .find(|p| p.is_file())
                    .ok_or(AssetError::NoSystemFont)?;
                let data = read_font(path)?;
                Ok((FontSource::SystemPath(path.clone()), Some(data)))
            }
            FontStrategy::Network { url } => {
                let fetcher = self.fetcher.as_deref().ok_or(AssetError::NoFetcher)?;
                let data = self.cache.get_or_fetch(url, fetcher)?;
                Ok((FontSource::Network(url.clone()), Some(data)))
            }
            FontStrategy::Builtin => Ok((FontSource::Builtin, None)),
        }
    }
}

fn read_font(path: &Path) -> Result<Arc<Vec<u8>>, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|e| AssetError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if bytes.is_empty() {
        return Err(AssetError::Empty(path.to_path_buf()));
    }
    Ok(Arc::new(bytes))
}
