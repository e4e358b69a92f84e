//! Explicit async execution context
//!
//! Clients that issue background requests are handed a context instead of
//! reaching for whatever runtime happens to be current.

use crate::error::{Error, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::debug;

/// Runtime created by an [`ExecutionContext`]
///
/// Shut down in the background on drop, so the last clone of a context may
/// be released from inside async code.
#[derive(Debug)]
struct OwnedRuntime(Option<Runtime>);

impl OwnedRuntime {
    fn runtime(&self) -> Result<&Runtime> {
        self.0
            .as_ref()
            .ok_or_else(|| Error::Runtime("owned runtime already shut down".to_string()))
    }
}

impl Drop for OwnedRuntime {
    fn drop(&mut self) {
        if let Some(runtime) = self.0.take() {
            runtime.shutdown_background();
        }
    }
}

/// Handle to the tokio runtime used for client work
#[derive(Clone, Debug)]
pub struct ExecutionContext {
    handle: Handle,
    /// Set when this context created the runtime itself
    owned: Option<Arc<OwnedRuntime>>,
}

impl ExecutionContext {
    /// Reuse the current runtime, or create one when none is active
    pub fn ensure() -> Result<Self> {
        match Handle::try_current() {
            Ok(handle) => {
                debug!("Reusing active tokio runtime");
                Ok(Self::from_handle(handle))
            }
            Err(_) => {
                debug!("No active tokio runtime, creating one");
                let runtime = Builder::new_multi_thread()
                    .enable_all()
                    .build()
                    .map_err(|e| Error::Runtime(format!("Failed to create runtime: {}", e)))?;
                Ok(Self {
                    handle: runtime.handle().clone(),
                    owned: Some(Arc::new(OwnedRuntime(Some(runtime)))),
                })
            }
        }
    }

    /// Wrap an existing runtime handle
    pub fn from_handle(handle: Handle) -> Self {
        Self {
            handle,
            owned: None,
        }
    }

    /// Runtime handle for spawning work
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Whether the runtime was created by this context
    pub fn is_owned(&self) -> bool {
        self.owned.is_some()
    }

    /// Drive `future` to completion on the owned runtime
    ///
    /// Only available when this context created its runtime; a borrowed
    /// runtime must be awaited from async code instead.
    pub fn block_on<F: Future>(&self, future: F) -> Result<F::Output> {
        match &self.owned {
            Some(owned) => Ok(owned.runtime()?.block_on(future)),
            None => Err(Error::Runtime(
                "block_on requires a runtime owned by the execution context".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_runtime_when_none_active() {
        let ctx = ExecutionContext::ensure().unwrap();
        assert!(ctx.is_owned());

        let value = ctx.block_on(async { 40 + 2 }).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_owned_context_drops_inside_another_runtime() {
        let ctx = ExecutionContext::ensure().unwrap();
        let clone = ctx.clone();
        drop(ctx);

        let caller = Runtime::new().unwrap();
        let value = caller.block_on(async move {
            let spawned = clone.handle().spawn(async { 7 }).await.unwrap();
            drop(clone);
            spawned
        });
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_reuses_active_runtime() {
        let ctx = ExecutionContext::ensure().unwrap();
        assert!(!ctx.is_owned());

        let joined = ctx.handle().spawn(async { "done" }).await.unwrap();
        assert_eq!(joined, "done");
    }

    #[tokio::test]
    async fn test_block_on_rejected_for_borrowed_runtime() {
        let ctx = ExecutionContext::from_handle(Handle::current());
        assert!(matches!(ctx.block_on(async {}), Err(Error::Runtime(_))));
    }
}
