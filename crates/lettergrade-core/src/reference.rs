//! Reference answer sources
//!
//! A source turns a variant index into the raw bytes of that variant's
//! reference CSV. The engine only depends on [`ReferenceSource`]; where the
//! bytes live is up to the implementation.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{LetterError, Result};
use crate::variant::VariantIndex;

/// Placeholder substituted with the variant index in file patterns and URLs
pub const VARIANT_PLACEHOLDER: &str = "{variant}";

/// Substitute `{variant}` in a template
pub fn render_template(template: &str, variant: VariantIndex) -> String {
    template.replace(VARIANT_PLACEHOLDER, &variant.to_string())
}

/// Read-only provider of reference answer bytes
pub trait ReferenceSource {
    /// Location of the variant's reference data, for diagnostics
    fn key(&self, variant: VariantIndex) -> String;

    /// Fetch the raw reference CSV for a variant
    fn fetch(&self, variant: VariantIndex) -> Result<Arc<[u8]>>;
}

impl<S: ReferenceSource + ?Sized> ReferenceSource for &S {
    fn key(&self, variant: VariantIndex) -> String {
        (**self).key(variant)
    }

    fn fetch(&self, variant: VariantIndex) -> Result<Arc<[u8]>> {
        (**self).fetch(variant)
    }
}

fn unavailable(variant: VariantIndex, key: String, reason: impl std::fmt::Display) -> LetterError {
    LetterError::ReferenceUnavailable {
        variant: variant.get(),
        key,
        reason: reason.to_string(),
    }
}

/// Reference files laid out as `<base_dir>/<file_pattern>`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    base_dir: PathBuf,
    file_pattern: String,
}

impl DirectorySource {
    pub fn new(base_dir: impl Into<PathBuf>, file_pattern: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            file_pattern: file_pattern.into(),
        }
    }

    pub fn path(&self, variant: VariantIndex) -> PathBuf {
        self.base_dir.join(render_template(&self.file_pattern, variant))
    }
}

impl ReferenceSource for DirectorySource {
    fn key(&self, variant: VariantIndex) -> String {
        self.path(variant).display().to_string()
    }

    fn fetch(&self, variant: VariantIndex) -> Result<Arc<[u8]>> {
        let path = self.path(variant);
        debug!(path = %path.display(), %variant, "read_reference");
        fs::read(&path)
            .map(Arc::from)
            .map_err(|e| unavailable(variant, path.display().to_string(), e))
    }
}

/// In-memory reference data
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: HashMap<VariantIndex, Arc<[u8]>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, variant: VariantIndex, csv: impl AsRef<[u8]>) {
        self.entries.insert(variant, Arc::from(csv.as_ref()));
    }

    pub fn with(mut self, variant: VariantIndex, csv: impl AsRef<[u8]>) -> Self {
        self.insert(variant, csv);
        self
    }
}

impl ReferenceSource for MemorySource {
    fn key(&self, variant: VariantIndex) -> String {
        format!("memory:{variant}")
    }

    fn fetch(&self, variant: VariantIndex) -> Result<Arc<[u8]>> {
        self.entries
            .get(&variant)
            .cloned()
            .ok_or_else(|| unavailable(variant, self.key(variant), "no such variant"))
    }
}

/// Per-variant memo over another source
///
/// Successful fetches are kept as immutable bytes; failures are not cached.
#[derive(Debug)]
pub struct Memoized<S> {
    inner: S,
    cache: Mutex<HashMap<VariantIndex, Arc<[u8]>>>,
}

impl<S: ReferenceSource> Memoized<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn cached_variants(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl<S: ReferenceSource> ReferenceSource for Memoized<S> {
    fn key(&self, variant: VariantIndex) -> String {
        self.inner.key(variant)
    }

    fn fetch(&self, variant: VariantIndex) -> Result<Arc<[u8]>> {
        if let Ok(cache) = self.cache.lock() {
            if let Some(bytes) = cache.get(&variant) {
                debug!(%variant, "reference_cache_hit");
                return Ok(Arc::clone(bytes));
            }
        }

        debug!(%variant, "reference_cache_miss");
        let bytes = self.inner.fetch(variant)?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(variant, Arc::clone(&bytes));
        }
        Ok(bytes)
    }
}
