// Session-scoped memoization of the loaded tables, keyed by file identity
// (path + modification time). An explicit object rather than global state:
// each session owns its own cache.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use log::{debug, info};
use snafu::prelude::*;

use crate::atlas::{load_and_process, AtlasResult, LoadedAtlas, MissingFileSnafu};

pub struct LoadCache {
    entries: HashMap<(PathBuf, PathBuf), CacheEntry>,
}

struct CacheEntry {
    countries_stamp: SystemTime,
    types_stamp: SystemTime,
    data: Arc<LoadedAtlas>,
}

impl LoadCache {
    pub fn new() -> LoadCache {
        LoadCache {
            entries: HashMap::new(),
        }
    }

    /// Returns the loaded tables for the given pair of input files,
    /// re-reading them only when either file changed on disk since the
    /// last load.
    pub fn get_or_load(
        &mut self,
        countries_path: &str,
        types_path: &str,
    ) -> AtlasResult<Arc<LoadedAtlas>> {
        let key = (PathBuf::from(countries_path), PathBuf::from(types_path));
        let countries_stamp = modified(countries_path)?;
        let types_stamp = modified(types_path)?;

        if let Some(entry) = self.entries.get(&key) {
            if entry.countries_stamp == countries_stamp && entry.types_stamp == types_stamp {
                debug!("cache hit for {:?}", key);
                return Ok(entry.data.clone());
            }
            info!("input files changed on disk, reloading {:?}", key);
        }

        let data = Arc::new(load_and_process(countries_path, types_path)?);
        self.entries.insert(
            key,
            CacheEntry {
                countries_stamp,
                types_stamp,
                data: data.clone(),
            },
        );
        Ok(data)
    }

    /// Drops every cached load. The next `get_or_load` re-reads from disk.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }
}

impl Default for LoadCache {
    fn default() -> Self {
        LoadCache::new()
    }
}

fn modified(path: &str) -> AtlasResult<SystemTime> {
    let meta = fs::metadata(path).ok().context(MissingFileSnafu { path })?;
    meta.modified().ok().context(MissingFileSnafu { path })
}
