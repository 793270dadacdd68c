//! Scheduler configuration, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::recordio::DEFAULT_MAX_RECORD_SIZE;

/// Seconds a disconnected framework is kept by the master before its
/// tasks are torn down (one day).
pub const DEFAULT_FAILOVER_TIMEOUT: f64 = 86_400.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// `http(s)://host:port` of any master, or `zk://hosts/path`.
    pub master_url: String,
    /// Framework ID to register as. A random UUID is used when unset.
    pub framework_id: Option<String>,
    pub user: Option<String>,
    pub name: Option<String>,
    pub failover_timeout: f64,
    pub roles: Vec<String>,
    /// Accept any server certificate. Never on by default.
    pub disable_tls_verification: bool,
    pub enable_gpu_resources: bool,
    pub min_allocatable_cpu: f64,
    pub min_allocatable_mem: f64,
    pub min_allocatable_gpu: f64,
    pub min_allocatable_disk: f64,
    /// Upper bound on a single event frame, in bytes.
    pub max_record_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            master_url: String::new(),
            framework_id: None,
            user: None,
            name: None,
            failover_timeout: DEFAULT_FAILOVER_TIMEOUT,
            roles: Vec::new(),
            disable_tls_verification: false,
            enable_gpu_resources: false,
            min_allocatable_cpu: 0.0,
            min_allocatable_mem: 0.0,
            min_allocatable_gpu: 0.0,
            min_allocatable_disk: 0.0,
            max_record_size: DEFAULT_MAX_RECORD_SIZE,
        }
    }
}

impl SchedulerConfig {
    pub fn new(master_url: impl Into<String>) -> Self {
        Self {
            master_url: master_url.into(),
            ..Default::default()
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the settings the lifecycle cannot run without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.master_url.trim().is_empty() {
            return Err(ConfigError::MissingMaster);
        }
        if self.max_record_size == 0 {
            return Err(ConfigError::Invalid(
                "max_record_size must be greater than zero".to_string(),
            ));
        }
        if self.failover_timeout.is_nan() {
            return Err(ConfigError::Invalid(
                "failover_timeout must be a number".to_string(),
            ));
        }
        Ok(())
    }
}
