//! The payroll engine entry point.

use std::sync::Arc;

use tracing::debug;

use crate::config::ConfigurationStore;
use crate::error::EngineResult;
use crate::models::{CalculationResult, CompetencyPeriod, WorkerContext};
use crate::rules::LegacyRubricTable;

use super::payroll_run::PayrollRun;

/// Runs payrolls against a configuration store.
///
/// The engine holds only the legacy rubric table, shared behind an `Arc`,
/// so it is cheap to clone and may be used from many threads. Every call to
/// [`PayrollEngine::calculate`] fetches a fresh snapshot.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{CompetencyPeriod, WorkerContext};
/// use payroll_engine::orchestrator::PayrollEngine;
/// use payroll_engine::rules::LegacyRubricTable;
/// use rust_decimal::Decimal;
///
/// let store = ConfigLoader::load("./config/default")?;
/// let engine = PayrollEngine::new(LegacyRubricTable::builtin()?);
///
/// let worker = WorkerContext::new("w-001", Decimal::new(350000, 2));
/// let result = engine.calculate(&store, CompetencyPeriod::new(2025, 6)?, &worker)?;
/// println!("net pay: {}", result.net_pay());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PayrollEngine {
    legacy: Arc<LegacyRubricTable>,
}

impl PayrollEngine {
    /// Creates an engine over a legacy rubric table.
    pub fn new(legacy: impl Into<Arc<LegacyRubricTable>>) -> Self {
        Self {
            legacy: legacy.into(),
        }
    }

    /// The legacy table consulted on fallback.
    pub fn legacy(&self) -> &LegacyRubricTable {
        &self.legacy
    }

    /// Fetches the configuration for `period` and executes one run.
    pub fn calculate<S>(
        &self,
        store: &S,
        period: CompetencyPeriod,
        worker: &WorkerContext,
    ) -> EngineResult<CalculationResult>
    where
        S: ConfigurationStore + ?Sized,
    {
        debug!(worker_id = %worker.worker_id, period = %period, "Fetching configuration snapshot");
        let snapshot = store.fetch(period)?;

        let mut run = PayrollRun::new(period, worker, &snapshot, &self.legacy);
        run.execute()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, ConfigurationSnapshot};
    use crate::error::{EngineError, ErrorKind};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn engine() -> PayrollEngine {
        PayrollEngine::new(LegacyRubricTable::builtin().unwrap())
    }

    struct UnavailableStore;

    impl ConfigurationStore for UnavailableStore {
        fn fetch(&self, _period: CompetencyPeriod) -> EngineResult<ConfigurationSnapshot> {
            Err(EngineError::ConfigNotFound {
                path: "unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PayrollEngine>();
    }

    #[test]
    fn test_calculate_against_bundled_configuration() {
        let store = ConfigLoader::load("./config/default").unwrap();
        let worker = WorkerContext::new("w-001", dec("3000.00"));

        let result = engine()
            .calculate(&store, CompetencyPeriod::new(2025, 6).unwrap(), &worker)
            .unwrap();

        assert_eq!(result.worker_id(), "w-001");
        assert!(result.net_pay() > Decimal::ZERO);
        assert!(result.net_pay() < dec("3000.00"));
    }

    #[test]
    fn test_store_errors_propagate() {
        let worker = WorkerContext::new("w-001", dec("3000.00"));
        let err = engine()
            .calculate(&UnavailableStore, CompetencyPeriod::new(2025, 6).unwrap(), &worker)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigurationStore);
    }

    #[test]
    fn test_dyn_store_is_accepted() {
        let snapshot = ConfigurationSnapshot::default();
        let store: &dyn ConfigurationStore = &snapshot;
        let worker = WorkerContext::new("w-001", dec("3000.00"));

        let err = engine()
            .calculate(store, CompetencyPeriod::new(2025, 6).unwrap(), &worker)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigurationMissing);
    }

    #[test]
    fn test_clones_share_the_legacy_table() {
        let engine = engine();
        let clone = engine.clone();
        assert!(std::ptr::eq(engine.legacy(), clone.legacy()));
    }
}
