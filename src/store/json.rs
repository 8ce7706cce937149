//! JSON file storage.
//!
//! Employees live in one pretty-printed JSON array. Each payroll period is a
//! self-contained snapshot in its own file, `payroll_YYYYMM.json`, inside a
//! periods directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, NewEmployee, PayrollPeriod, PeriodKey};

use super::{EmployeeStore, PeriodStore};

const SNAPSHOT_PREFIX: &str = "payroll_";
const SNAPSHOT_SUFFIX: &str = ".json";

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> EngineResult<()> {
    let path_str = path.display().to_string();
    let write_error = |message: String| EngineError::StorageWrite {
        path: path_str.clone(),
        message,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
    }

    let content = serde_json::to_string_pretty(value).map_err(|e| write_error(e.to_string()))?;
    fs::write(path, content).map_err(|e| write_error(e.to_string()))
}

/// Employee records in a single JSON file.
///
/// A missing or unreadable file reads as an empty collection; the next save
/// replaces it. Rows that fail employee validation are skipped with a warning
/// and dropped on the next save.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::models::Employee;
/// use payroll_engine::store::{EmployeeStore, JsonEmployeeStore};
/// use rust_decimal::Decimal;
///
/// let mut store = JsonEmployeeStore::new("./data/employees.json");
/// let ana = Employee::new("1234567890", "Ana Lopez", Decimal::new(800, 0), "Ventas", "Asesora")?;
/// store.save(&ana)?;
/// assert!(store.get("1234567890")?.is_some());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonEmployeeStore {
    path: PathBuf,
}

impl JsonEmployeeStore {
    /// Creates a store backed by the file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Vec<Employee> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Employee file unreadable, treating as empty");
                return Vec::new();
            }
        };

        let rows: Vec<NewEmployee> = match serde_json::from_str(&content) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Employee file corrupt, treating as empty");
                return Vec::new();
            }
        };

        rows.into_iter()
            .filter_map(|row| {
                let employee_id = row.id.clone();
                match Employee::try_from(row) {
                    Ok(employee) => Some(employee),
                    Err(e) => {
                        warn!(
                            path = %self.path.display(),
                            employee_id = %employee_id,
                            error = %e,
                            "Skipping invalid employee record"
                        );
                        None
                    }
                }
            })
            .collect()
    }

    fn write_all(&self, employees: &[Employee]) -> EngineResult<()> {
        write_json(&self.path, employees)
    }
}

impl EmployeeStore for JsonEmployeeStore {
    fn save(&mut self, employee: &Employee) -> EngineResult<()> {
        let mut employees = self.read_all();
        match employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee.clone(),
            None => employees.push(employee.clone()),
        }
        self.write_all(&employees)?;
        debug!(employee_id = %employee.id, "Saved employee");
        Ok(())
    }

    fn get(&self, id: &str) -> EngineResult<Option<Employee>> {
        Ok(self.read_all().into_iter().find(|e| e.id == id))
    }

    fn list_all(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.read_all())
    }

    fn delete(&mut self, id: &str) -> EngineResult<bool> {
        let mut employees = self.read_all();
        let before = employees.len();
        employees.retain(|e| e.id != id);
        if employees.len() == before {
            return Ok(false);
        }
        self.write_all(&employees)?;
        debug!(employee_id = %id, "Deleted employee");
        Ok(true)
    }
}

/// Payroll period snapshots, one JSON file per period.
#[derive(Debug, Clone)]
pub struct JsonPeriodStore {
    dir: PathBuf,
}

impl JsonPeriodStore {
    /// Creates a store that keeps snapshots in `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The snapshot directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The snapshot file for `period_key`.
    pub fn snapshot_path(&self, period_key: &PeriodKey) -> PathBuf {
        self.dir
            .join(format!("{}{}{}", SNAPSHOT_PREFIX, period_key, SNAPSHOT_SUFFIX))
    }
}

impl PeriodStore for JsonPeriodStore {
    fn save(&mut self, period: &PayrollPeriod) -> EngineResult<()> {
        let path = self.snapshot_path(period.period_key());
        write_json(&path, period)?;
        debug!(path = %path.display(), "Wrote payroll snapshot");
        Ok(())
    }

    fn get(&self, period_key: &PeriodKey) -> EngineResult<Option<PayrollPeriod>> {
        let path = self.snapshot_path(period_key);
        let path_str = path.display().to_string();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(EngineError::StorageRead {
                    path: path_str,
                    message: e.to_string(),
                });
            }
        };

        let period: PayrollPeriod =
            serde_json::from_str(&content).map_err(|e| EngineError::CorruptSnapshot {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        if period.period_key() != period_key {
            return Err(EngineError::CorruptSnapshot {
                path: path_str,
                message: format!(
                    "snapshot is for period {}, expected {}",
                    period.period_key(),
                    period_key
                ),
            });
        }

        Ok(Some(period))
    }

    fn list_keys(&self) -> EngineResult<Vec<PeriodKey>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(EngineError::StorageRead {
                    path: self.dir.display().to_string(),
                    message: e.to_string(),
                });
            }
        };

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| EngineError::StorageRead {
                path: self.dir.display().to_string(),
                message: e.to_string(),
            })?;

            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(label) = name
                .strip_prefix(SNAPSHOT_PREFIX)
                .and_then(|rest| rest.strip_suffix(SNAPSHOT_SUFFIX))
            else {
                continue;
            };

            match PeriodKey::parse(label) {
                Ok(key) => keys.push(key),
                Err(_) => debug!(file = name, "Skipping file with invalid period key"),
            }
        }

        keys.sort();
        Ok(keys)
    }

    fn contains(&self, period_key: &PeriodKey) -> EngineResult<bool> {
        Ok(self.snapshot_path(period_key).is_file())
    }
}
