//! Shared application state for the logtree server.
//!
//! Startup order:
//! 1) build the sink from config
//! 2) attach containers (each one is registered, then built against the sink)
//! 3) run the duplicate-address check if configured
//!
//! After `build()` the container set is fixed.

use std::sync::Arc;

use serde_json::Value;

use logtree_core::combine::combine;
use logtree_core::error::{LogTreeError, Result};
use logtree_core::{Container, Flush, Registry, Sink};

use crate::config::ServerConfig;
use crate::obs::{FlushMetrics, HttpMetrics};
use crate::sink::build_sink;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    registry: Registry,
    containers: Vec<Arc<dyn Flush>>,
    http: Arc<HttpMetrics>,
    flush: Arc<FlushMetrics>,
}

/// Collects containers before the state is frozen.
pub struct AppStateBuilder {
    cfg: ServerConfig,
    sink: Arc<dyn Sink>,
    registry: Registry,
    containers: Vec<Arc<dyn Flush>>,
}

impl AppStateBuilder {
    /// The sink every attached container is bound to.
    pub fn sink(&self) -> Arc<dyn Sink> {
        Arc::clone(&self.sink)
    }

    /// Register `C`, build one instance bound to the sink, and keep it for
    /// flushing. The returned handle is how callers record into it.
    pub fn attach<C: Container>(&mut self) -> Result<Arc<C>> {
        if !self.registry.register::<C>() {
            return Err(LogTreeError::BadConfig(format!(
                "container {} attached twice",
                std::any::type_name::<C>()
            )));
        }
        let container = Arc::new(C::build(self.sink())?);
        self.containers.push(Arc::clone(&container) as Arc<dyn Flush>);
        Ok(container)
    }

    pub fn build(mut self) -> Result<AppState> {
        let http = self.attach::<HttpMetrics>()?;
        let flush = self.attach::<FlushMetrics>()?;

        if self.cfg.registry.validate_on_startup {
            self.registry.validate_no_duplicate_addresses()?;
        } else {
            tracing::warn!("registry.validate_on_startup is off; metric addresses are unchecked");
        }

        tracing::info!(containers = self.containers.len(), sink = ?self.cfg.sink.kind, "logtree state ready");
        Ok(AppState {
            inner: Arc::new(AppStateInner {
                cfg: self.cfg,
                registry: self.registry,
                containers: self.containers,
                http,
                flush,
            }),
        })
    }
}

impl AppState {
    /// Start building state with the sink named in `cfg`.
    pub fn builder(cfg: ServerConfig) -> AppStateBuilder {
        let sink = build_sink(cfg.sink.kind);
        Self::builder_with_sink(cfg, sink)
    }

    /// Start building state around an explicit sink (ignores `cfg.sink`).
    pub fn builder_with_sink(cfg: ServerConfig, sink: Arc<dyn Sink>) -> AppStateBuilder {
        AppStateBuilder {
            cfg,
            sink,
            registry: Registry::new(),
            containers: Vec::new(),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn http(&self) -> Arc<HttpMetrics> {
        Arc::clone(&self.inner.http)
    }

    pub fn flush_metrics(&self) -> Arc<FlushMetrics> {
        Arc::clone(&self.inner.flush)
    }

    /// Current values of every container, merged into one tree.
    pub fn snapshot(&self) -> Result<Value> {
        let trees = self
            .inner
            .containers
            .iter()
            .map(|c| c.tree())
            .collect::<Result<Vec<_>>>()?;
        Ok(combine(trees))
    }

    /// Emit every record of every container to the sink, as one flush cycle.
    pub fn flush_all(&self) -> Result<()> {
        let flush = &self.inner.flush;
        let _timer = flush.duration.time();
        flush.cycles.run_result(|| {
            for c in &self.inner.containers {
                c.flush()?;
            }
            Ok(())
        })
    }
}
