use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::PathBuf;

use crate::config::{get_config_path, Config};

const HEADER: &str = "\
# house-score configuration
#
# theme: auto | dark | light
# animation: how long the round total counts up (e.g. 700ms, 1s)
# Card rules (applies_to): '*', 'color=NAME', 'kind=NAME', terms joined with '&'
";

/// Render the fully populated default config as YAML, with a comment header
pub fn render_default_config() -> Result<String> {
    let yaml = serde_saphyr::to_string(&Config::with_defaults())
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
    Ok(format!("{}\n{}", HEADER, yaml))
}

/// Write the default config file.
///
/// Uses the default path when `path` is None. Refuses to replace an existing
/// file unless `force` is set. The write is atomic, so an interrupted write
/// never leaves a truncated config behind.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let contents = render_default_config()?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(&config_path)
        .with_context(|| format!("Failed to open atomic write file at {}", config_path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    file.commit().context("Failed to save config")?;

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::env;

    #[test]
    fn test_write_then_load_roundtrip() {
        let path = env::temp_dir().join("house_score_test_init_roundtrip.yaml");
        let _ = std::fs::remove_file(&path);

        let written = write_default_config(Some(path.clone()), false).unwrap();
        assert_eq!(written, path);

        let loaded = load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded, Config::with_defaults());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_refuses_overwrite_without_force() {
        let path = env::temp_dir().join("house_score_test_init_overwrite.yaml");
        std::fs::write(&path, "theme: dark\n").unwrap();

        let err = write_default_config(Some(path.clone()), false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "theme: dark\n");

        write_default_config(Some(path.clone()), true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("# house-score"));

        let _ = std::fs::remove_file(&path);
    }
}
