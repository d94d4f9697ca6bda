//! Employee lookup for the API.
//!
//! The calculator takes [`EmployeeFacts`] directly; the API only receives an
//! employee id and resolves it through an [`EmployeeDirectory`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::EmployeeFacts;

/// Resolves employee ids to the facts a settlement needs.
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up an employee.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmployeeNotFound`] if the id is unknown.
    fn find(&self, id: &str) -> EngineResult<EmployeeFacts>;
}

/// An [`EmployeeDirectory`] held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    employees: HashMap<String, EmployeeFacts>,
}

#[derive(Debug, Deserialize)]
struct Roster {
    employees: Vec<EmployeeFacts>,
}

impl InMemoryDirectory {
    /// Creates a directory from a list of employees. Later duplicates win.
    pub fn new(employees: impl IntoIterator<Item = EmployeeFacts>) -> Self {
        Self {
            employees: employees
                .into_iter()
                .map(|employee| (employee.id.clone(), employee))
                .collect(),
        }
    }

    /// Loads a YAML roster of the form `employees: [{id, base_salary, admission_date}]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file cannot be read, and
    /// `ConfigParseError` if it is not a valid roster or an entry has a
    /// non-positive salary.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let roster: Roster =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        for employee in &roster.employees {
            employee
                .validate()
                .map_err(|e| EngineError::ConfigParseError {
                    path: path_str.clone(),
                    message: format!("employee '{}': {}", employee.id, e),
                })?;
        }

        debug!(path = %path_str, employees = roster.employees.len(), "Loaded employee roster");

        Ok(Self::new(roster.employees))
    }

    /// Number of employees in the directory.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true if the directory holds no employees.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

impl EmployeeDirectory for InMemoryDirectory {
    fn find(&self, id: &str) -> EngineResult<EmployeeFacts> {
        self.employees
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }
}
