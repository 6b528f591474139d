//! # Simulated Backend
//!
//! Stands in for a remote inventory API.
//!
//! ## Fetch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_products(count)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sleep(latency)           ← suspend point; other tasks may run          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  roll failure_rate ──── hit ──► Err(Transient("simulated ..."))         │
//! │       │                                                                 │
//! │      miss                                                               │
//! │       ▼                                                                 │
//! │  Ok(generate_products(count))                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Clones share one RNG, so two overlapping fetches from clones of the same
//! backend still draw from a single reproducible stream.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

use stockroom_core::Product;

use crate::config::BackendSettings;
use crate::error::{StoreError, StoreResult};
use crate::generator::generate_products;

#[derive(Clone)]
pub struct MockBackend {
    settings: BackendSettings,
    rng: Arc<Mutex<StdRng>>,
}

impl MockBackend {
    /// Creates a backend. A failure rate outside `[0, 1]` is clamped.
    pub fn new(mut settings: BackendSettings) -> Self {
        let rate = settings.failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            warn!(failure_rate = rate, "Clamping failure rate into [0, 1]");
            settings.failure_rate = if rate > 1.0 { 1.0 } else { 0.0 };
        }

        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        MockBackend {
            settings,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    /// Fetches `count` freshly generated products, or fails transiently.
    pub async fn fetch_products(&self, count: usize) -> StoreResult<Vec<Product>> {
        let latency = self.settings.latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        if rng.gen_bool(self.settings.failure_rate) {
            debug!(count, "Simulated fetch failure");
            return Err(StoreError::Transient(
                "simulated network failure while fetching products".to_string(),
            ));
        }

        let products = generate_products(count, &mut *rng);
        debug!(count = products.len(), "Simulated fetch returned products");
        Ok(products)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        MockBackend::new(BackendSettings::default())
    }
}

impl fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockBackend")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
