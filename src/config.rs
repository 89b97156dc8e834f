//! User configuration (`config.toml`).

use directories::ProjectDirs;
use rpnsheet_core::storage::DEFAULT_DELIMITER;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    verbose: Option<bool>,
    delimiter: Option<String>,
    parallel: Option<bool>,
}

/// Settings after merging the config file over the defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub verbose: bool,
    pub delimiter: char,
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            verbose: false,
            delimiter: DEFAULT_DELIMITER,
            parallel: false,
        }
    }
}

pub(crate) fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "rpnsheet")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Load configuration from `explicit` or the user config directory.
///
/// Never fails: problems are returned as warnings and defaults are used.
pub fn load_config(explicit: Option<&PathBuf>) -> (Config, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut config = Config::default();

    let Some(path) = explicit.cloned().or_else(user_config_path) else {
        return (config, warnings);
    };
    if !path.exists() {
        if explicit.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (config, warnings);
    }

    let Some(file) = read_config_file(&path, &mut warnings) else {
        return (config, warnings);
    };

    if let Some(verbose) = file.verbose {
        config.verbose = verbose;
    }
    if let Some(parallel) = file.parallel {
        config.parallel = parallel;
    }
    if let Some(delimiter) = file.delimiter {
        match parse_delimiter(&delimiter) {
            Ok(c) => config.delimiter = c,
            Err(err) => warnings.push(format!("{}: {}", path.display(), err)),
        }
    }

    (config, warnings)
}

fn read_config_file(path: &Path, warnings: &mut Vec<String>) -> Option<ConfigFile> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<ConfigFile>(&content) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    }
}

/// A delimiter must be exactly one character and cannot be a quote or line break.
pub fn parse_delimiter(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !matches!(c, '"' | '\n' | '\r') => Ok(c),
        _ => Err(format!("invalid delimiter {:?}: expected a single character", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "rpnsheet_config_{}_{}_{}.toml",
            name,
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos(),
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    struct Cleanup(PathBuf);
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[test]
    fn test_user_config_path_points_at_config_toml() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("config.toml"));
            assert_eq!(user_config_path(), Some(path));
        }
    }

    #[test]
    fn test_load_explicit_config() {
        let path = temp_config("full", "verbose = true\ndelimiter = \";\"\nparallel = true\n");
        let _cleanup = Cleanup(path.clone());
        let (config, warnings) = load_config(Some(&path));
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(
            config,
            Config {
                verbose: true,
                delimiter: ';',
                parallel: true,
            }
        );
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let path = temp_config("partial", "verbose = true\n");
        let _cleanup = Cleanup(path.clone());
        let (config, _) = load_config(Some(&path));
        assert!(config.verbose);
        assert_eq!(config.delimiter, ',');
        assert!(!config.parallel);
    }

    #[test]
    fn test_unknown_keys_warn_and_fall_back() {
        let path = temp_config("unknown", "colour = \"red\"\n");
        let _cleanup = Cleanup(path.clone());
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, Config::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failed to parse"));
    }

    #[test]
    fn test_bad_delimiter_warns() {
        let path = temp_config("delim", "delimiter = \"::\"\n");
        let _cleanup = Cleanup(path.clone());
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config.delimiter, ',');
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_missing_explicit_config_warns() {
        let path = std::env::temp_dir().join("rpnsheet_no_such_config.toml");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, Config::default());
        assert_eq!(
            warnings,
            vec![format!("Config file not found: {}", path.display())]
        );
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(','));
        assert_eq!(parse_delimiter("\t"), Ok('\t'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("\"").is_err());
    }
}
