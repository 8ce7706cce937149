//! Shared application state for the payroll API.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::PayrollConfig;
use crate::service::PayrollService;
use crate::store::{EmployeeStore, PeriodStore};

/// The service type held by the API, with its stores boxed.
pub type SharedService =
    PayrollService<Box<dyn EmployeeStore + Send>, Box<dyn PeriodStore + Send>>;

/// Shared application state.
///
/// The service sits behind one async mutex, so requests are handled one at
/// a time against the stores.
#[derive(Clone)]
pub struct AppState {
    service: Arc<Mutex<SharedService>>,
}

impl AppState {
    /// Wraps an already-built service.
    pub fn new(service: SharedService) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
        }
    }

    /// Builds the service from a pair of stores.
    pub fn from_stores<E, P>(employees: E, periods: P, config: PayrollConfig) -> Self
    where
        E: EmployeeStore + Send + 'static,
        P: PeriodStore + Send + 'static,
    {
        Self::new(PayrollService::new(
            Box::new(employees),
            Box::new(periods),
            config,
        ))
    }

    /// The guarded service.
    pub fn service(&self) -> &Mutex<SharedService> {
        &self.service
    }
}
