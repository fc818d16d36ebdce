//! Environment resolution for gateway settings.
//!
//! Settings are looked up through an ordered chain of [`EnvSource`]s; the
//! first source holding a non-blank value wins and the value is returned
//! trimmed. Nothing is cached: every call re-reads every source, so values
//! injected after startup are picked up on the next request.
//!
//! The standard chain is:
//!
//! 1. [`Bindings`]: values handed to the gateway by its hosting runtime.
//! 2. [`ProcessEnv`]: the process environment, read at call time.
//! 3. [`DotenvFile`]: a `.env` file captured at startup as a global fallback.
//!
//! ```rust
//! use idgate::env::{Bindings, EnvResolver};
//!
//! let env = EnvResolver::new()
//!     .with_source(Bindings::from_pairs([("ALIYUN_OCR_APPCODE", "  abc  ")]))
//!     .with_source(|key: &str| (key == "ALIYUN_OCR_URL").then(|| "http://vendor".to_owned()));
//!
//! assert_eq!(env.resolve("ALIYUN_OCR_APPCODE").as_deref(), Some("abc"));
//! assert_eq!(env.vendor_url(), "http://vendor");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use ocr::{DEFAULT_OCR_URL, PLACEHOLDER_APPCODE};

/// Vendor credential key.
pub const APPCODE_KEY: &str = "ALIYUN_OCR_APPCODE";

/// Vendor endpoint key.
pub const OCR_URL_KEY: &str = "ALIYUN_OCR_URL";

/// A single place configuration values can come from.
pub trait EnvSource: Send + Sync {
    /// Raw value for `key`, if the source has one. Blank handling is done by
    /// the resolver.
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<F> EnvSource for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn lookup(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Key/value bindings supplied by the hosting runtime.
///
/// Keys are matched case-insensitively, since layered config loaders may
/// fold them to lowercase.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: HashMap<String, String>,
}

impl Bindings {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self::from_pairs(values)
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_ascii_uppercase(), v.into()))
            .collect();
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl EnvSource for Bindings {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(&key.to_ascii_uppercase()).cloned()
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Errors raised while loading a dotenv file.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to read env file {path}: {source}")]
    Dotenv {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Values parsed from a dotenv file, without touching the process environment.
#[derive(Debug, Clone, Default)]
pub struct DotenvFile {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl DotenvFile {
    /// Parse `path`. A missing file yields an empty source.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let path = path.as_ref().to_path_buf();

        let iter = match dotenvy::from_path_iter(&path) {
            Ok(iter) => iter,
            Err(err) if err.not_found() => {
                tracing::debug!(path = %path.display(), "env file not found, fallback source is empty");
                return Ok(Self {
                    path,
                    values: HashMap::new(),
                });
            }
            Err(source) => return Err(EnvError::Dotenv { path, source }),
        };

        let mut values = HashMap::new();
        for item in iter {
            match item {
                Ok((key, value)) => {
                    values.insert(key, value);
                }
                Err(source) => return Err(EnvError::Dotenv { path, source }),
            }
        }
        tracing::debug!(path = %path.display(), keys = values.len(), "loaded env file");
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl EnvSource for DotenvFile {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Vendor credential. Its formatting never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Ordered chain of [`EnvSource`]s.
#[derive(Default)]
pub struct EnvResolver {
    sources: Vec<Box<dyn EnvSource>>,
}

impl EnvResolver {
    /// Empty chain; resolves nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runtime bindings, then the process environment, then `fallback`.
    pub fn standard(bindings: Bindings, fallback: DotenvFile) -> Self {
        Self::new()
            .with_source(bindings)
            .with_source(ProcessEnv)
            .with_source(fallback)
    }

    /// Append a source with lower precedence than those already present.
    pub fn with_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// First non-blank value for `key`, trimmed.
    pub fn resolve(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| {
            source
                .lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        })
    }

    /// The vendor credential, or `None` when unset or still the placeholder.
    pub fn credential(&self) -> Option<Credential> {
        self.resolve(APPCODE_KEY)
            .filter(|value| value != PLACEHOLDER_APPCODE)
            .map(Credential)
    }

    /// Configured vendor endpoint, or the built-in default.
    pub fn vendor_url(&self) -> String {
        self.resolve(OCR_URL_KEY)
            .unwrap_or_else(|| DEFAULT_OCR_URL.to_owned())
    }
}

impl fmt::Debug for EnvResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvResolver")
            .field("sources", &self.sources.len())
            .finish()
    }
}
