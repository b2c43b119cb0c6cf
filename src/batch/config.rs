//! Batch configuration.

use crate::{Error, ErrorContext, Result};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub batch_size: usize,
    pub inter_batch_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            inter_batch_delay: Duration::from_millis(100),
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    pub fn with_inter_batch_delay(mut self, delay: Duration) -> Self {
        self.inter_batch_delay = delay;
        self
    }

    /// Number of batches needed for `total` addresses.
    pub fn batch_count(&self, total: usize) -> usize {
        if self.batch_size == 0 {
            return 0;
        }
        total.div_ceil(self.batch_size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::configuration_with_context(
                "batch size must be at least 1",
                ErrorContext::new()
                    .with_field_path("GEOCODER_BATCH_SIZE")
                    .with_details("got 0")
                    .with_source("batch_config"),
            ));
        }
        Ok(())
    }
}
