//! The configuration store contract.

use crate::error::EngineResult;
use crate::models::CompetencyPeriod;

use super::loader::ConfigLoader;
use super::types::ConfigurationSnapshot;

/// A source of per-period payroll configuration.
///
/// Implementations are called once per payroll run and must return fresh
/// values; the engine never caches or mutates what they return. Retrying a
/// failed fetch is the caller's decision.
pub trait ConfigurationStore {
    /// Fetches the configuration in force for `period`.
    fn fetch(&self, period: CompetencyPeriod) -> EngineResult<ConfigurationSnapshot>;
}

impl ConfigurationStore for ConfigLoader {
    fn fetch(&self, period: CompetencyPeriod) -> EngineResult<ConfigurationSnapshot> {
        Ok(self.snapshot_for(period))
    }
}

/// A fixed snapshot serves as a store for every period.
impl ConfigurationStore for ConfigurationSnapshot {
    fn fetch(&self, _period: CompetencyPeriod) -> EngineResult<ConfigurationSnapshot> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_store_returns_copy() {
        let snapshot = ConfigurationSnapshot::default();
        let period = CompetencyPeriod::new(2025, 1).unwrap();

        let fetched = snapshot.fetch(period).unwrap();
        assert_eq!(fetched, snapshot);
    }

    #[test]
    fn test_loader_store_selects_by_period() {
        let loader = ConfigLoader::load("./config/default").unwrap();
        let period = CompetencyPeriod::new(2025, 1).unwrap();

        let fetched = loader.fetch(period).unwrap();
        assert_eq!(fetched, loader.snapshot_for(period));
    }

    #[test]
    fn test_store_is_object_safe() {
        let snapshot = ConfigurationSnapshot::default();
        let store: &dyn ConfigurationStore = &snapshot;
        let period = CompetencyPeriod::new(2025, 1).unwrap();
        assert!(store.fetch(period).is_ok());
    }
}
