use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};

/// In-flight analyses keyed by page context (a tab, a file, a worker slot).
/// At most one analysis runs per context; contexts never block each other.
#[derive(Clone)]
pub struct AnalysisTracker {
    in_flight: Arc<DashMap<String, Uuid>>,
}

impl AnalysisTracker {
    pub fn new() -> Self {
        Self {
            in_flight: Arc::new(DashMap::with_capacity(10)),
        }
    }

    /// Claim `context` for a new request. The returned guard releases it on
    /// drop.
    pub fn begin(&self, context: &str) -> Result<InFlightAnalysis> {
        match self.in_flight.entry(context.to_string()) {
            Entry::Occupied(entry) => {
                log::warn!(
                    "[ANALYZE] Context {} busy with request {}",
                    context,
                    entry.get()
                );
                Err(AppError::AnalysisInProgress(context.to_string()))
            }
            Entry::Vacant(entry) => {
                let request_id = Uuid::new_v4();
                entry.insert(request_id);
                log::debug!("[ANALYZE] Request {} started for {}", request_id, context);
                Ok(InFlightAnalysis {
                    context: context.to_string(),
                    request_id,
                    in_flight: Arc::clone(&self.in_flight),
                })
            }
        }
    }

    pub fn is_busy(&self, context: &str) -> bool {
        self.in_flight.contains_key(context)
    }

    pub fn request_for(&self, context: &str) -> Option<Uuid> {
        self.in_flight.get(context).map(|id| *id)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }
}

impl Default for AnalysisTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that a context is claimed.
pub struct InFlightAnalysis {
    context: String,
    request_id: Uuid,
    in_flight: Arc<DashMap<String, Uuid>>,
}

impl InFlightAnalysis {
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

impl Drop for InFlightAnalysis {
    fn drop(&mut self) {
        // Only clear the entry this guard created.
        self.in_flight
            .remove_if(&self.context, |_, id| *id == self.request_id);
        log::trace!(
            "[ANALYZE] Request {} released {}",
            self.request_id,
            self.context
        );
    }
}
