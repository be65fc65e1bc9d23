//! Configuration management for hcloudctl
//!
//! Configuration is stored in TOML with support for multiple named
//! profiles, one per project/token pair. Values may reference environment
//! variables with `${VAR}` / `${VAR:-default}` syntax so tokens can stay
//! out of the file.

#[cfg(target_os = "macos")]
use directories::BaseDirs;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{CoreError, Result};

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Profile used when none is named on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Map of profile name -> profile configuration
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// One named connection profile
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Profile {
    /// API token used for bearer authentication
    pub api_token: String,
    /// Human-readable project label shown in listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Override of the API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl Config {
    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        check_permissions(config_path);

        let content = fs::read_to_string(config_path).map_err(|e| {
            CoreError::Config(format!(
                "failed to read {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let expanded = Self::expand_env_vars(&content);
        let config: Config = toml::from_str(&expanded)
            .map_err(|e| CoreError::Config(format!("invalid config file: {e}")))?;

        Ok(config)
    }

    /// Save configuration to the standard location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CoreError::Config(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CoreError::Config(format!("failed to serialize config: {e}")))?;

        fs::write(config_path, content).map_err(|e| {
            CoreError::Config(format!(
                "failed to write {}: {}",
                config_path.display(),
                e
            ))
        })?;

        // The file holds API tokens; keep it private to the owner.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(config_path, fs::Permissions::from_mode(0o600));
        }

        Ok(())
    }

    /// Resolve the profile to use.
    ///
    /// Order: explicit name, then `default_profile`, then the sole profile
    /// if exactly one exists.
    pub fn resolve_profile(&self, explicit: Option<&str>) -> Result<(&str, &Profile)> {
        if let Some(name) = explicit {
            let (name, profile) = self.profiles.get_key_value(name).ok_or_else(|| {
                CoreError::Config(format!("profile '{name}' not found"))
            })?;
            return Ok((name.as_str(), profile));
        }

        if let Some(name) = self.default_profile.as_deref() {
            let profile = self.profiles.get(name).ok_or_else(|| {
                CoreError::Config(format!(
                    "default profile '{name}' is set but does not exist"
                ))
            })?;
            return Ok((name, profile));
        }

        if self.profiles.len() == 1 {
            // Sole profile wins without any default being set
            let (name, profile) = self
                .profiles
                .iter()
                .next()
                .ok_or_else(|| CoreError::Config("no profiles configured".into()))?;
            return Ok((name.as_str(), profile));
        }

        Err(CoreError::Config(
            "no profile selected; use --profile or set a default_profile".into(),
        ))
    }

    /// Set or update a profile
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile by name, clearing the default if it pointed here
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        self.profiles.remove(name)
    }

    /// List all profiles sorted by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.profiles.iter().collect();
        profiles.sort_by_key(|(name, _)| *name);
        profiles
    }

    /// Get the path to the configuration file
    ///
    /// On Linux: ~/.config/hcloudctl/config.toml
    /// On Windows: %APPDATA%\hcloudctl\hcloudctl\config.toml
    ///
    /// On macOS the Linux-style ~/.config path is preferred when it exists,
    /// falling back to ~/Library/Application Support.
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(base_dirs) = BaseDirs::new() {
                let linux_style = base_dirs
                    .home_dir()
                    .join(".config")
                    .join("hcloudctl")
                    .join("config.toml");
                if linux_style.exists()
                    || linux_style.parent().map(|p| p.exists()).unwrap_or(false)
                {
                    return Ok(linux_style);
                }
            }
        }

        let proj_dirs = ProjectDirs::from("", "", "hcloudctl")
            .ok_or_else(|| CoreError::Config("could not determine config directory".into()))?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Expand `${VAR}` and `${VAR:-default}` references in config content.
    /// Unset variables are left as-is so unused profiles do not error.
    fn expand_env_vars(content: &str) -> String {
        shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok())
            .to_string()
    }
}

/// Warn when the config file is readable by group or others. It holds API
/// tokens, so 600 is expected.
#[cfg(unix)]
fn check_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Ok(meta) = fs::metadata(path) {
        let mode = meta.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            warn!(
                "config file {} has permissions {:o}; consider chmod 600",
                path.display(),
                mode
            );
        }
    }
}

#[cfg(not(unix))]
fn check_permissions(_path: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(token: &str) -> Profile {
        Profile {
            api_token: token.to_string(),
            project: None,
            api_url: None,
        }
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = Config::default();
        config.set_profile(
            "prod".to_string(),
            Profile {
                api_token: "tok-1".to_string(),
                project: Some("production".to_string()),
                api_url: None,
            },
        );
        config.default_profile = Some("prod".to_string());

        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config.default_profile, deserialized.default_profile);
        assert_eq!(deserialized.profiles["prod"].project.as_deref(), Some("production"));
    }

    #[test]
    fn explicit_profile_beats_default() {
        let mut config = Config::default();
        config.set_profile("a".to_string(), profile("tok-a"));
        config.set_profile("b".to_string(), profile("tok-b"));
        config.default_profile = Some("a".to_string());

        let (name, p) = config.resolve_profile(Some("b")).unwrap();
        assert_eq!(name, "b");
        assert_eq!(p.api_token, "tok-b");

        let (name, _) = config.resolve_profile(None).unwrap();
        assert_eq!(name, "a");
    }

    #[test]
    fn sole_profile_is_used_without_default() {
        let mut config = Config::default();
        config.set_profile("only".to_string(), profile("tok"));

        let (name, _) = config.resolve_profile(None).unwrap();
        assert_eq!(name, "only");
    }

    #[test]
    fn missing_profile_is_an_error() {
        let config = Config::default();
        assert!(config.resolve_profile(Some("nope")).is_err());
        assert!(config.resolve_profile(None).is_err());
    }

    #[test]
    fn removing_default_profile_clears_default() {
        let mut config = Config::default();
        config.set_profile("a".to_string(), profile("tok"));
        config.default_profile = Some("a".to_string());

        assert!(config.remove_profile("a").is_some());
        assert!(config.default_profile.is_none());
    }

    #[test]
    #[serial_test::serial]
    fn expands_env_vars_in_content() {
        unsafe {
            std::env::set_var("HCLOUDCTL_TEST_TOKEN", "expanded-token");
        }

        let content = r#"
[profiles.test]
api_token = "${HCLOUDCTL_TEST_TOKEN}"
"#;
        let config: Config = toml::from_str(&Config::expand_env_vars(content)).unwrap();
        assert_eq!(config.profiles["test"].api_token, "expanded-token");

        unsafe {
            std::env::remove_var("HCLOUDCTL_TEST_TOKEN");
        }
    }

    #[test]
    fn load_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_path(&dir.path().join("config.toml")).unwrap();
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set_profile("dev".to_string(), profile("tok-dev"));
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.profiles["dev"].api_token, "tok-dev");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o600);
        }
    }
}
