use std::{path::PathBuf, time::Duration};

use crate::{
    consts::consts::DEFAULT_REQUEST_TIMEOUT,
    model::activity::{load_catalog, seed_catalog, ActivityCatalog, CatalogError},
};

/// Where the activity catalog is loaded from at startup
#[derive(Debug, Clone, PartialEq)]
pub enum SeedSource {
    /// The catalog compiled into the binary
    BuiltIn,
    /// A JSON file with the same shape as `GET /activities`
    File(PathBuf),
}

impl SeedSource {
    pub fn load(&self) -> Result<ActivityCatalog, CatalogError> {
        match self {
            SeedSource::BuiltIn => seed_catalog(),
            SeedSource::File(path) => load_catalog(path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub seed: SeedSource,
    pub enforce_capacity: bool,
    pub request_timeout: Duration,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl DatabaseOptions {
    pub fn set_seed(mut self, seed: SeedSource) -> Self {
        self.seed = seed;
        self
    }

    /// Defines whether a signup is rejected once an activity's roster reaches `max_participants`
    pub fn set_enforce_capacity(mut self, enforce_capacity: bool) -> Self {
        self.enforce_capacity = enforce_capacity;
        self
    }

    /// How long a request manager waits on the database before giving up
    pub fn set_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            seed: SeedSource::BuiltIn,
            enforce_capacity: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
