//! Entrypoint identifiers.
//!
//! An entrypoint names the module to serve, as a slash-separated path
//! relative to the source root, with an optional handler attribute after the
//! first dot: `api/index.handler`. A trailing `.py` is treated as a file
//! suffix rather than an attribute, so `api/index.py` and `api/index` are
//! equivalent.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid entrypoint {raw:?}: {reason}")]
pub struct InvalidEntrypoint {
    pub raw: String,
    pub reason: &'static str,
}

/// A parsed entrypoint identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrypoint {
    raw: String,
    module: String,
    attribute: Option<String>,
}

impl Entrypoint {
    pub fn parse(raw: &str) -> Result<Self, InvalidEntrypoint> {
        let invalid = |reason| InvalidEntrypoint {
            raw: raw.to_string(),
            reason,
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty"));
        }

        let (module, attribute) = match trimmed.split_once('.') {
            None => (trimmed, None),
            Some((module, "py")) => (module, None),
            Some((module, attr)) => (module, Some(attr)),
        };

        if module.is_empty() {
            return Err(invalid("missing module path"));
        }
        if module.split('/').any(str::is_empty) {
            return Err(invalid("empty path segment"));
        }
        if let Some(attr) = attribute {
            if attr.split('.').any(str::is_empty) {
                return Err(invalid("empty attribute segment"));
            }
        }

        Ok(Self {
            raw: trimmed.to_string(),
            module: module.to_string(),
            attribute: attribute.map(str::to_string),
        })
    }

    /// The identifier as given, used as the artifact map key.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Slash-separated module path relative to the source root.
    pub fn module_path(&self) -> &str {
        &self.module
    }

    /// Directory containing the entrypoint module, relative to the source
    /// root. Empty for top-level modules.
    pub fn module_dir(&self) -> &Path {
        Path::new(&self.module).parent().unwrap_or(Path::new(""))
    }

    /// Handler attribute named in the identifier, if any.
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Dotted import path of the module.
    pub fn wsgi_module(&self) -> String {
        self.module.replace('/', ".")
    }

    /// Fully-qualified application object reference. The identifier's own
    /// attribute wins; otherwise `default_attr` (the configured application
    /// name) applies.
    pub fn wsgi_application(&self, default_attr: &str) -> String {
        format!(
            "{}.{}",
            self.wsgi_module(),
            self.attribute.as_deref().unwrap_or(default_attr)
        )
    }
}

impl std::fmt::Display for Entrypoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_with_attribute() {
        let ep = Entrypoint::parse("api/index.handler").unwrap();
        assert_eq!(ep.module_path(), "api/index");
        assert_eq!(ep.attribute(), Some("handler"));
        assert_eq!(ep.wsgi_module(), "api.index");
        assert_eq!(ep.wsgi_application("application"), "api.index.handler");
    }

    #[test]
    fn test_module_without_attribute_uses_default() {
        let ep = Entrypoint::parse("api/index").unwrap();
        assert_eq!(ep.attribute(), None);
        assert_eq!(ep.wsgi_application("application"), "api.index.application");
        assert_eq!(ep.wsgi_application("app"), "api.index.app");
    }

    #[test]
    fn test_py_suffix_is_not_an_attribute() {
        let ep = Entrypoint::parse("index.py").unwrap();
        assert_eq!(ep.module_path(), "index");
        assert_eq!(ep.attribute(), None);
        assert_eq!(ep.wsgi_application("application"), "index.application");
    }

    #[test]
    fn test_module_dir() {
        assert_eq!(
            Entrypoint::parse("api/v1/index.handler").unwrap().module_dir(),
            Path::new("api/v1")
        );
        assert_eq!(Entrypoint::parse("index").unwrap().module_dir(), Path::new(""));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Entrypoint::parse("").is_err());
        assert!(Entrypoint::parse("  ").is_err());
        assert!(Entrypoint::parse(".handler").is_err());
        assert!(Entrypoint::parse("api//index").is_err());
        assert!(Entrypoint::parse("api/index.").is_err());
    }
}
