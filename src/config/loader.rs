//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{PayrollError, PayrollResult};

use super::types::{JurisdictionMetadata, PayrollConfig, TaxYearConfig};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query the parameter table of a tax year.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/gr/
/// ├── jurisdiction.yaml   # Country metadata
/// └── tax_years/
///     └── 2025.yaml       # Contribution, bracket and exemption parameters
/// ```
///
/// # Example
///
/// ```no_run
/// use greek_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/gr").unwrap();
/// let year = loader.get_tax_year(2025).unwrap();
/// println!("Contribution rate: {}", year.contributions.rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/gr")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A tax-year table is internally inconsistent or duplicated
    ///
    /// # Example
    ///
    /// ```no_run
    /// use greek_payroll::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/gr")?;
    /// # Ok::<(), greek_payroll::error::PayrollError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let jurisdiction_path = path.join("jurisdiction.yaml");
        let metadata = Self::load_yaml::<JurisdictionMetadata>(&jurisdiction_path)?;

        let tax_years_dir = path.join("tax_years");
        let tax_years = Self::load_tax_years(&tax_years_dir)?;

        Ok(Self {
            config: PayrollConfig::new(metadata, tax_years),
        })
    }

    /// Builds a loader from already-constructed parts, validating each tax year.
    pub fn from_parts(
        metadata: JurisdictionMetadata,
        tax_years: Vec<TaxYearConfig>,
    ) -> PayrollResult<Self> {
        if tax_years.is_empty() {
            return Err(PayrollError::ConfigNotFound {
                path: "(no tax years provided)".to_string(),
            });
        }
        for tax_year in &tax_years {
            tax_year.validate()?;
        }
        Self::reject_duplicates(&tax_years)?;
        Ok(Self {
            config: PayrollConfig::new(metadata, tax_years),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates all tax-year files from the tax_years directory.
    fn load_tax_years(tax_years_dir: &Path) -> PayrollResult<Vec<TaxYearConfig>> {
        let dir_str = tax_years_dir.display().to_string();

        let entries = fs::read_dir(tax_years_dir).map_err(|_| PayrollError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut tax_years = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| PayrollError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let tax_year = Self::load_yaml::<TaxYearConfig>(&path)?;
                tax_year.validate()?;
                debug!(
                    year = tax_year.year,
                    brackets = tax_year.income_tax.brackets.len(),
                    path = %path.display(),
                    "Loaded tax year"
                );
                tax_years.push(tax_year);
            }
        }

        if tax_years.is_empty() {
            return Err(PayrollError::ConfigNotFound {
                path: format!("{} (no tax year files found)", dir_str),
            });
        }

        Self::reject_duplicates(&tax_years)?;
        Ok(tax_years)
    }

    fn reject_duplicates(tax_years: &[TaxYearConfig]) -> PayrollResult<()> {
        let mut years: Vec<i32> = tax_years.iter().map(|t| t.year).collect();
        years.sort_unstable();
        match years.windows(2).find(|w| w[0] == w[1]) {
            Some(w) => Err(PayrollError::InvalidConfig {
                year: w[0],
                message: "tax year is configured more than once".to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        self.config.jurisdiction()
    }

    /// Gets the parameter table for a tax year.
    ///
    /// # Returns
    ///
    /// Returns the table if configured, or `TaxYearNotFound` error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use greek_payroll::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/gr")?;
    /// let year = loader.get_tax_year(2025)?;
    /// println!("Annual contribution cap: €{}", year.contributions.annual_cap());
    /// # Ok::<(), greek_payroll::error::PayrollError>(())
    /// ```
    pub fn get_tax_year(&self, year: i32) -> PayrollResult<&TaxYearConfig> {
        self.config
            .tax_years()
            .iter()
            .find(|t| t.year == year)
            .ok_or(PayrollError::TaxYearNotFound { year })
    }

    /// Returns the most recent configured tax year.
    pub fn latest_tax_year(&self) -> &TaxYearConfig {
        let tax_years = self.config.tax_years();
        // both constructors reject an empty list
        &tax_years[tax_years.len() - 1]
    }

    /// Resolves an optional requested year, falling back to the latest one.
    pub fn resolve_tax_year(&self, year: Option<i32>) -> PayrollResult<&TaxYearConfig> {
        match year {
            Some(year) => self.get_tax_year(year),
            None => Ok(self.latest_tax_year()),
        }
    }
}
