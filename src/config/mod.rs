pub mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{Config, ThemeMode, DEFAULT_ANIMATION};

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::calculator::bonus_slug;
use crate::scoring::validate_board;

/// Get the config directory path (~/.config/house-score/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("house-score"))
}

/// Get the default config file path (~/.config/house-score/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    Ok(config)
}

/// Validate a loaded config. Returns all errors at once.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(board_errors) = validate_board(&config.board()) {
        errors.extend(board_errors);
    }

    if let Err(e) = config.animation_duration() {
        errors.push(format!("animation: {:#}", e));
    }

    let calculator = config.calculator();
    let mut slugs = HashSet::new();
    for (i, label) in calculator.bonuses.iter().enumerate() {
        let slug = bonus_slug(label);
        if slug.is_empty() {
            errors.push(format!(
                "calculator.bonuses[{}]: label needs at least one letter or digit",
                i
            ));
        } else if !slugs.insert(slug) {
            errors.push(format!("calculator.bonuses[{}]: duplicate bonus '{}'", i, label));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_missing_explicit_path_is_error() {
        let path = env::temp_dir().join("house_score_test_missing_config.yaml");
        let _ = fs::remove_file(&path);

        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_partial_config() {
        let path = env::temp_dir().join("house_score_test_partial_config.yaml");
        fs::write(
            &path,
            r#"
theme: light
animation: 1s
calculator:
  bonuses: [Sleigh, Elf]
"#,
        )
        .unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.animation_duration().unwrap().as_millis(), 1000);
        assert_eq!(config.calculator().bonuses, vec!["Sleigh", "Elf"]);
        assert_eq!(config.board(), crate::scoring::BoardConfig::default());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let path = env::temp_dir().join("house_score_test_invalid_config.yaml");
        fs::write(&path, "theme: [not, a, theme]\n").unwrap();

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config.theme, ThemeMode::Auto);
        assert!(config.board.is_none());
        assert_eq!(config.animation_duration().unwrap().as_millis(), 700);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_reports_every_section() {
        let mut config = Config::with_defaults();
        config.animation = Some("soon".to_string());
        if let Some(board) = config.board.as_mut() {
            board.cards[0].factor = 0;
        }
        config.calculator = Some(crate::calculator::CalculatorConfig {
            bonuses: vec!["Elf".into(), "ELF".into(), "!!".into()],
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].starts_with("board.cards[0].factor"));
        assert!(errors[1].starts_with("animation:"));
        assert!(errors[2].contains("duplicate bonus 'ELF'"));
        assert!(errors[3].starts_with("calculator.bonuses[2]"));
    }
}
