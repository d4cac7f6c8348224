//! The runtimes command: list the supported runtimes and whether their
//! interpreter is present on this image.

use anyhow::Result;

use pybale_builder::runtime;
use pybale_builder::SUPPORTED_RUNTIMES;
use pybale_core::DEFAULT_RUNTIME;

pub fn cmd_runtimes() -> Result<()> {
    for name in SUPPORTED_RUNTIMES {
        let located = runtime::locate_interpreter(name).ok();
        let mut line = name.to_string();
        if name == DEFAULT_RUNTIME {
            line.push_str(" (default)");
        }
        match located {
            Some(interpreter) => {
                line.push_str(&format!(" -> {}", interpreter.executable.display()))
            }
            None => line.push_str(" -> not installed"),
        }
        println!("{line}");
    }
    Ok(())
}
