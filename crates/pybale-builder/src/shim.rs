//! The bundled WSGI compatibility shim.
//!
//! Every artifact's handler is the shim, never the user's application object
//! directly; the shim adapts platform events to WSGI and finds the
//! application through `WSGI_APPLICATION`. The Python sources are embedded
//! at compile time and staged on demand for pip to install.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Handler string every artifact advertises.
pub const HANDLER: &str = "pybale_shim.wsgi_handler";

/// Environment key the shim reads to locate the application object.
pub const WSGI_APPLICATION_ENV: &str = "WSGI_APPLICATION";

const SETUP_PY: &str = include_str!("../../../shim/setup.py");
const INIT_PY: &str = include_str!("../../../shim/pybale_shim/__init__.py");
const HANDLER_PY: &str = include_str!("../../../shim/pybale_shim/handler.py");

/// Write the embedded shim package under `into`, returning the staged
/// directory suitable as a pip install target argument.
pub fn stage(into: &Path) -> io::Result<PathBuf> {
    let root = into.join("pybale-shim");
    let package = root.join("pybale_shim");
    fs::create_dir_all(&package)?;
    fs::write(root.join("setup.py"), SETUP_PY)?;
    fs::write(package.join("__init__.py"), INIT_PY)?;
    fs::write(package.join("handler.py"), HANDLER_PY)?;
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_writes_installable_package() {
        let dir = tempfile::tempdir().unwrap();
        let root = stage(dir.path()).unwrap();

        assert_eq!(root, dir.path().join("pybale-shim"));
        assert!(root.join("setup.py").is_file());
        assert!(root.join("pybale_shim/__init__.py").is_file());
        assert!(root.join("pybale_shim/handler.py").is_file());
    }

    #[test]
    fn test_handler_constant_matches_embedded_source() {
        assert!(HANDLER_PY.contains("def wsgi_handler"));
        assert!(INIT_PY.contains("wsgi_handler"));
        assert!(HANDLER_PY.contains(WSGI_APPLICATION_ENV));
    }
}
