use std::{fs, path::Path};

use crate::config::Config;
use crate::{LingoplayError, Result};

const HEADER: &str = "# lingoplay configuration file\n\n";

/// Writes the default configuration to `path`, creating parent directories
pub(super) fn create_default_config_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| LingoplayError::io(e, parent))?;
    }

    let body = Config::default().to_toml()?;
    fs::write(path, format!("{HEADER}{body}")).map_err(|e| LingoplayError::io(e, path))?;

    Ok(())
}
