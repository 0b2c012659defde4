//! Deal parameter resolution
//!
//! Layers, lowest to highest precedence:
//! 1. Reference-form defaults (`DealParameters::default()`)
//! 2. JSON parameter file (partial documents allowed)
//! 3. Environment variables `DEAL_*`
//! 4. Explicit overrides (CLI flags)
//!
//! Only parsing happens here; range checks belong to `DealParameters::validate`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::deal::DealParameters;

pub const ENV_PROPERTY_VALUE: &str = "DEAL_PROPERTY_VALUE";
pub const ENV_SELLER_DOWN_PAYMENT: &str = "DEAL_SELLER_DOWN_PAYMENT";
pub const ENV_BANK_INTEREST_RATE: &str = "DEAL_BANK_INTEREST_RATE";
pub const ENV_LOAN_TERM_YEARS: &str = "DEAL_LOAN_TERM_YEARS";
pub const ENV_SELLER_INTEREST_RATE: &str = "DEAL_SELLER_INTEREST_RATE";
pub const ENV_SELLER_TERM_MONTHS: &str = "DEAL_SELLER_TERM_MONTHS";
pub const ENV_SELLER_MONTHLY_PAYMENT: &str = "DEAL_SELLER_MONTHLY_PAYMENT";
pub const ENV_HOLD_YEARS: &str = "DEAL_HOLD_YEARS";

/// Errors raised while resolving parameters
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read parameter file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse parameter file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("environment variable {var} has unparseable value '{value}'")]
    InvalidEnv { var: &'static str, value: String },
}

/// Optional per-field overrides applied on top of a base parameter set
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParameterOverrides {
    pub property_value: Option<f64>,
    pub seller_down_payment: Option<f64>,
    pub bank_interest_rate: Option<f64>,
    pub loan_term_years: Option<u32>,
    pub seller_interest_rate: Option<f64>,
    pub seller_term_months: Option<u32>,
    pub seller_monthly_payment: Option<f64>,
    pub hold_years: Option<f64>,
}

impl ParameterOverrides {
    /// Read overrides from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read overrides through an arbitrary key lookup (environment, map, ...)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            property_value: parse_var(&lookup, ENV_PROPERTY_VALUE)?,
            seller_down_payment: parse_var(&lookup, ENV_SELLER_DOWN_PAYMENT)?,
            bank_interest_rate: parse_var(&lookup, ENV_BANK_INTEREST_RATE)?,
            loan_term_years: parse_var(&lookup, ENV_LOAN_TERM_YEARS)?,
            seller_interest_rate: parse_var(&lookup, ENV_SELLER_INTEREST_RATE)?,
            seller_term_months: parse_var(&lookup, ENV_SELLER_TERM_MONTHS)?,
            seller_monthly_payment: parse_var(&lookup, ENV_SELLER_MONTHLY_PAYMENT)?,
            hold_years: parse_var(&lookup, ENV_HOLD_YEARS)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite every field that has an override
    pub fn apply(&self, params: &mut DealParameters) {
        if let Some(v) = self.property_value {
            params.property_value = v;
        }
        if let Some(v) = self.seller_down_payment {
            params.seller_down_payment = v;
        }
        if let Some(v) = self.bank_interest_rate {
            params.bank_interest_rate = v;
        }
        if let Some(v) = self.loan_term_years {
            params.loan_term_years = v;
        }
        if let Some(v) = self.seller_interest_rate {
            params.seller_interest_rate = v;
        }
        if let Some(v) = self.seller_term_months {
            params.seller_term_months = v;
        }
        if let Some(v) = self.seller_monthly_payment {
            params.seller_monthly_payment = v;
        }
        if let Some(v) = self.hold_years {
            params.hold_years = v;
        }
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .replace(['_', ','], "")
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value: raw }),
    }
}

/// Load a (possibly partial) JSON parameter document
pub fn load_parameters_file(path: &Path) -> Result<DealParameters, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Where deal parameters come from
#[derive(Debug, Clone, Default)]
pub struct ParameterSource {
    /// Optional JSON parameter file
    pub file: Option<PathBuf>,
    /// Whether `DEAL_*` environment variables are consulted
    pub use_env: bool,
    /// Highest-precedence overrides
    pub overrides: ParameterOverrides,
}

impl ParameterSource {
    /// Resolve against the process environment
    pub fn resolve(&self) -> Result<DealParameters, ConfigError> {
        let env = if self.use_env {
            ParameterOverrides::from_env()?
        } else {
            ParameterOverrides::default()
        };
        self.resolve_layers(env)
    }

    /// Resolve using a custom environment lookup
    pub fn resolve_with<F>(&self, lookup: F) -> Result<DealParameters, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = if self.use_env {
            ParameterOverrides::from_lookup(lookup)?
        } else {
            ParameterOverrides::default()
        };
        self.resolve_layers(env)
    }

    fn resolve_layers(&self, env: ParameterOverrides) -> Result<DealParameters, ConfigError> {
        let mut params = match &self.file {
            Some(path) => load_parameters_file(path)?,
            None => DealParameters::default(),
        };

        env.apply(&mut params);
        self.overrides.apply(&mut params);

        Ok(params)
    }
}
