// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Short-lived cache of gateway sensor reports.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use super::SensorReport;

/// Reuses a gateway report for devices polled within the same tick.
///
/// Every device behind a gateway reads the same report, so without a cache
/// N devices cost N identical requests per polling interval. A zero TTL
/// disables caching.
#[derive(Debug, Clone)]
pub struct ReportCache {
    ttl: Duration,
    entries: Arc<Mutex<HashMap<String, (Instant, Arc<SensorReport>)>>>,
}

impl ReportCache {
    /// Creates a cache keeping reports for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns `true` if caching is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Returns a fresh report for the gateway, if one is cached.
    #[must_use]
    pub fn get(&self, gateway_id: &str) -> Option<Arc<SensorReport>> {
        if !self.is_enabled() {
            return None;
        }

        let mut entries = self.entries.lock();
        match entries.get(gateway_id) {
            Some((fetched_at, report)) if fetched_at.elapsed() < self.ttl => Some(Arc::clone(report)),
            Some(_) => {
                entries.remove(gateway_id);
                None
            }
            None => None,
        }
    }

    /// Stores a report for the gateway.
    pub fn insert(&self, gateway_id: &str, report: Arc<SensorReport>) {
        if self.is_enabled() {
            self.entries
                .lock()
                .insert(gateway_id.to_string(), (Instant::now(), report));
        }
    }

    /// Drops the cached report for the gateway.
    ///
    /// Called after a command so the next poll sees the provider's view
    /// rather than the report fetched before the command.
    pub fn invalidate(&self, gateway_id: &str) {
        self.entries.lock().remove(gateway_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::SensorReading;

    fn report() -> Arc<SensorReport> {
        Arc::new(SensorReport::new(vec![SensorReading::new("d", "lock", "locked")]))
    }

    #[test]
    fn disabled_cache_stores_nothing() {
        let cache = ReportCache::new(Duration::ZERO);
        cache.insert("gw", report());
        assert!(cache.get("gw").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire() {
        let cache = ReportCache::new(Duration::from_secs(5));
        cache.insert("gw", report());
        assert!(cache.get("gw").is_some());

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(cache.get("gw").is_none());
    }

    #[test]
    fn invalidate_removes_entry() {
        let cache = ReportCache::new(Duration::from_secs(60));
        cache.insert("gw", report());
        cache.invalidate("gw");
        assert!(cache.get("gw").is_none());
    }
}
