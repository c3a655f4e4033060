use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, GradeError};
use crate::models::Subject;

pub const TIERS: usize = 5;

/// Population fractions for grades 1 (best) through 5 (worst).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeQuota([f64; TIERS]);

impl GradeQuota {
    pub const STANDARD: GradeQuota = GradeQuota([0.10, 0.24, 0.32, 0.24, 0.10]);

    pub fn new(fractions: [f64; TIERS]) -> Result<Self, ConfigError> {
        let sum: f64 = fractions.iter().sum();
        let valid = fractions.iter().all(|f| f.is_finite() && *f >= 0.0) && (sum - 1.0).abs() < 1e-9;
        if !valid {
            return Err(ConfigError::InvalidQuota(fractions));
        }
        Ok(Self(fractions))
    }

    pub fn fractions(&self) -> &[f64; TIERS] {
        &self.0
    }
}

impl Default for GradeQuota {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Years and subjects the grader accepts. The quota is fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct GradingConfig {
    pub quota: GradeQuota,
    pub years: Vec<u8>,
    pub subjects: Vec<Subject>,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            quota: GradeQuota::STANDARD,
            years: vec![1, 2, 3],
            subjects: Subject::ALL.to_vec(),
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    years: Option<Vec<u8>>,
    subjects: Option<Vec<String>>,
}

impl GradingConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        debug!(path = %path.display(), years = ?config.years, subjects = ?config.subjects, "loaded grading config");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        let mut config = Self::default();

        if let Some(years) = file.years {
            if years.is_empty() {
                return Err(ConfigError::EmptyYears);
            }
            config.years = years;
        }

        if let Some(names) = file.subjects {
            if names.is_empty() {
                return Err(ConfigError::EmptySubjects);
            }
            config.subjects = names
                .iter()
                .map(|name| name.parse::<Subject>())
                .collect::<Result<_, _>>()?;
        }

        Ok(config)
    }

    pub fn check_year(&self, year: u8) -> Result<(), GradeError> {
        if self.years.contains(&year) {
            Ok(())
        } else {
            Err(GradeError::InvalidYear(year))
        }
    }

    pub fn check_subject(&self, subject: Subject) -> Result<(), GradeError> {
        if self.subjects.contains(&subject) {
            Ok(())
        } else {
            Err(GradeError::InvalidSubject(subject.to_string()))
        }
    }
}
