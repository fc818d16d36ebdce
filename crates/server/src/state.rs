use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::spa::{DocumentServer, NoDocuments, StaticDocuments};
use idgate::{Bindings, DotenvFile, EnvResolver, HttpUpstream, OcrUpstream};
use std::sync::Arc;

/// Shared application state
///
/// Nothing here is mutated after startup; every request reads the
/// environment chain on its own.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Ordered environment sources for the vendor credential and URL
    pub env: Arc<EnvResolver>,

    /// Vendor transport
    pub upstream: Arc<dyn OcrUpstream>,

    /// Client application delegate for non-API paths
    pub documents: Arc<dyn DocumentServer>,
}

impl ServerState {
    /// Create new server state
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let fallback = DotenvFile::load(&config.env_file)?;
        let env = EnvResolver::standard(Bindings::new(config.bindings.clone()), fallback);
        let upstream = HttpUpstream::with_timeout(config.upstream_timeout())?;

        let documents: Arc<dyn DocumentServer> = if config.static_dir.is_dir() {
            Arc::new(StaticDocuments::new(&config.static_dir))
        } else {
            tracing::warn!(
                static_dir = %config.static_dir.display(),
                "static directory not found; non-API paths will return 404"
            );
            Arc::new(NoDocuments)
        };

        Ok(Self::with_parts(config, env, Arc::new(upstream), documents))
    }

    /// Assemble state from explicit parts.
    pub fn with_parts(
        config: ServerConfig,
        env: EnvResolver,
        upstream: Arc<dyn OcrUpstream>,
        documents: Arc<dyn DocumentServer>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            env: Arc::new(env),
            upstream,
            documents,
        }
    }
}
