//! Progress reporting for trail accumulation.

use std::sync::Arc;

/// One merged layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailProgress {
    /// Layers merged so far (1-based).
    pub current: usize,
    pub total: usize,
}

/// Optional observer invoked once per merged layer. Calls may come from worker threads.
#[derive(Clone, Default)]
pub struct ProgressCallback(Option<Arc<dyn Fn(TrailProgress) + Send + Sync>>);

impl ProgressCallback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(TrailProgress) + Send + Sync + 'static,
    {
        Self(Some(Arc::new(f)))
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub(crate) fn report(&self, current: usize, total: usize) {
        if let Some(f) = self.0.as_ref() {
            f(TrailProgress { current, total });
        }
    }
}

impl std::fmt::Debug for ProgressCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            None => write!(f, "ProgressCallback::None"),
            Some(_) => write!(f, "ProgressCallback::Some(...)"),
        }
    }
}
