//! Build-scoped subprocess environment.
//!
//! One `BuildEnv` is constructed per build at provisioning time and applied
//! explicitly to every subprocess spawned afterward. Nothing here touches the
//! process-global environment, so concurrent builds in one process cannot
//! interfere with each other.

use std::path::{Path, PathBuf};

/// User-package root pip installs into (never the system site).
pub const USER_BASE_ENV: &str = "PYTHONUSERBASE";

/// Diagnostic toggle read by the bundled handler: "true" hides tracebacks.
pub const PRODUCTION_ENV: &str = "PYBALE_PRODUCTION";

/// The environment values every subprocess of one build receives.
#[derive(Debug, Clone)]
pub struct BuildEnv {
    user_base: PathBuf,
    production: bool,
}

impl BuildEnv {
    pub fn new(user_base: impl Into<PathBuf>, production: bool) -> Self {
        Self {
            user_base: user_base.into(),
            production,
        }
    }

    pub fn user_base(&self) -> &Path {
        &self.user_base
    }

    pub fn production(&self) -> bool {
        self.production
    }

    /// The toggle as subprocesses and the artifact environment see it.
    pub fn production_value(&self) -> &'static str {
        if self.production {
            "true"
        } else {
            "false"
        }
    }

    /// Key/value pairs to apply to a subprocess invocation.
    pub fn vars(&self) -> Vec<(String, String)> {
        vec![
            (
                USER_BASE_ENV.to_string(),
                self.user_base.to_string_lossy().into_owned(),
            ),
            (PRODUCTION_ENV.to_string(), self.production_value().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vars_carry_both_values() {
        let env = BuildEnv::new("/tmp/pybale-pkg-x", true);
        let vars = env.vars();
        assert!(vars.contains(&("PYTHONUSERBASE".to_string(), "/tmp/pybale-pkg-x".to_string())));
        assert!(vars.contains(&("PYBALE_PRODUCTION".to_string(), "true".to_string())));
    }

    #[test]
    fn test_production_toggle_mirrors_flag() {
        assert_eq!(BuildEnv::new("/p", false).production_value(), "false");
        assert_eq!(BuildEnv::new("/p", true).production_value(), "true");
    }
}
