//! Configuration loading and data directory resolution

use std::path::PathBuf;

/// Resolve the data directory holding the vocabulary pool and concept
/// map files, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable `AAC_DATA_DIR`
/// 3. `data_dir` key in the platform config file
/// 4. Compiled default `./data` (fallback)
///
/// The directory is not required to exist; missing files degrade to the
/// built-in fallback pool rather than failing startup.
pub fn resolve_data_dir(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("AAC_DATA_DIR") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: config file
    if let Some(config_path) = config_file_path() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(data_dir) = config.get("data_dir").and_then(|v| v.as_str()) {
                    return PathBuf::from(data_dir);
                }
            }
        }
    }

    // Priority 4: compiled default
    PathBuf::from("data")
}

/// Platform config file location (`~/.config/aacboard/config.toml` on
/// Linux/macOS, the equivalent AppData path on Windows).
fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("aacboard").join("config.toml"))
}

/// Split a comma-separated list (CORS origins, category names) into
/// trimmed non-empty entries.
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_arg_takes_priority() {
        let dir = resolve_data_dir(Some("/tmp/aac-data"));
        assert_eq!(dir, PathBuf::from("/tmp/aac-data"));
    }

    #[test]
    fn split_csv_trims_and_drops_empties() {
        assert_eq!(
            split_csv("core, actions ,,feelings "),
            vec!["core", "actions", "feelings"]
        );
        assert!(split_csv("").is_empty());
        assert!(split_csv(" , ").is_empty());
    }
}
