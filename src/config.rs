use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackerConfig {
    /// Path of the JSON data file
    pub database: Option<String>,
    /// How many tags the stats view shows
    pub top_tags: Option<usize>,
}

/// Stats shows this many tags when neither the flag nor the config says
/// otherwise
pub const DEFAULT_TOP_TAGS: usize = 5;

pub fn default_config_path() -> PathBuf {
    PathBuf::from("learntrack.toml")
}

/// CLI flag wins over the config file, which wins over the default.
pub fn resolve_top_tags(flag: Option<usize>, config: Option<&TrackerConfig>) -> usize {
    flag.or_else(|| config.and_then(|c| c.top_tags))
        .unwrap_or(DEFAULT_TOP_TAGS)
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("learning_db.json")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<TrackerConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: TrackerConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &TrackerConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learntrack.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learntrack.toml");

        let config = TrackerConfig {
            database: Some("notes/db.json".to_string()),
            top_tags: Some(3),
        };
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database.as_deref(), Some("notes/db.json"));
        assert_eq!(loaded.top_tags, Some(3));
    }

    #[test]
    fn test_top_tags_flag_beats_config_beats_default() {
        let config = TrackerConfig {
            database: None,
            top_tags: Some(3),
        };

        assert_eq!(resolve_top_tags(Some(8), Some(&config)), 8);
        assert_eq!(resolve_top_tags(None, Some(&config)), 3);
        assert_eq!(resolve_top_tags(None, None), DEFAULT_TOP_TAGS);

        let no_top = TrackerConfig::default();
        assert_eq!(resolve_top_tags(None, Some(&no_top)), DEFAULT_TOP_TAGS);
    }

    #[test]
    fn test_write_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learntrack.toml");

        write_config(&path, &TrackerConfig::default(), false).unwrap();
        assert!(write_config(&path, &TrackerConfig::default(), false).is_err());
        assert!(write_config(&path, &TrackerConfig::default(), true).is_ok());
    }
}
