use std::str::FromStr;

use rust_decimal::Decimal;

pub const SALARY_THRESHOLD_VAR: &str = "OXIDQ_SALARY_THRESHOLD";
pub const TRACE_ACCESS_VAR: &str = "OXIDQ_TRACE_ACCESS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Salaries at or above this count as "high" in the demo reports.
    pub salary_threshold: Decimal,
    /// Log every employee the high-salary filter looks at.
    pub trace_access: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            salary_threshold: Decimal::from(50000),
            trace_access: true,
        }
    }
}

impl DemoConfig {
    pub fn new() -> DemoConfig {
        // Read environment variables 'OXIDQ_SALARY_THRESHOLD' and 'OXIDQ_TRACE_ACCESS'
        // If not set or unparsable, use the defaults
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> DemoConfig {
        let defaults = DemoConfig::default();
        let salary_threshold = match lookup(SALARY_THRESHOLD_VAR) {
            Some(val) => Decimal::from_str(val.trim()).unwrap_or(defaults.salary_threshold),
            None => defaults.salary_threshold,
        };
        let trace_access = match lookup(TRACE_ACCESS_VAR) {
            Some(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => defaults.trace_access,
            },
            None => defaults.trace_access,
        };
        DemoConfig {
            salary_threshold,
            trace_access,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(DemoConfig::from_lookup(lookup_in(&[])), DemoConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = DemoConfig::from_lookup(lookup_in(&[(SALARY_THRESHOLD_VAR, " 60000.25 "), (TRACE_ACCESS_VAR, "off")]));
        assert_eq!(config.salary_threshold, Decimal::new(6000025, 2));
        assert!(!config.trace_access);
    }

    #[test]
    fn test_falls_back_on_garbage() {
        let config = DemoConfig::from_lookup(lookup_in(&[(SALARY_THRESHOLD_VAR, "lots"), (TRACE_ACCESS_VAR, "maybe")]));
        assert_eq!(config, DemoConfig::default());
    }
}
