//! Connection management
//!
//! Resolves the profile and environment into an authenticated
//! [`CloudClient`]. Carries the loaded config plus the explicit config
//! path so profile commands can write back to the right file.

use hcloudctl_core::{CloudClient, Config};
use tracing::{debug, info};

use crate::error::{CliError, Result};

const USER_AGENT: &str = concat!("hcloudctl/", env!("CARGO_PKG_VERSION"));

/// Connection manager for creating authenticated clients
#[derive(Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<std::path::PathBuf>,
}

impl ConnectionManager {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            config_path: None,
        }
    }

    pub fn with_config_path(config: Config, config_path: Option<std::path::PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Save the configuration back to where it was loaded from
    pub fn save_config(&self) -> Result<()> {
        let result = if let Some(ref path) = self.config_path {
            self.config.save_to_path(path)
        } else {
            self.config.save()
        };
        result.map_err(CliError::from)
    }

    /// Create an authenticated client.
    ///
    /// `HCLOUD_TOKEN` / `HCLOUD_API_URL` override the profile, except when
    /// `--config-file` was given explicitly: an explicit file means the
    /// caller wants isolation from ambient environment state.
    pub fn create_client(&self, profile_name: Option<&str>) -> Result<CloudClient> {
        let use_env = self.config_path.is_none();
        if !use_env {
            debug!("--config-file specified, ignoring HCLOUD_* environment variables");
        }

        let env_token = use_env.then(|| std::env::var("HCLOUD_TOKEN").ok()).flatten();
        let env_url = use_env
            .then(|| std::env::var("HCLOUD_API_URL").ok())
            .flatten();

        let (token, api_url) = match env_token {
            Some(token) => {
                info!("using API token from HCLOUD_TOKEN");
                (token, env_url)
            }
            None => {
                let (name, profile) = self
                    .config
                    .resolve_profile(profile_name)
                    .map_err(|e| self.profile_error(profile_name, e))?;
                info!(profile = name, "using configured profile");
                (
                    profile.api_token.clone(),
                    env_url.or_else(|| profile.api_url.clone()),
                )
            }
        };

        let mut builder = CloudClient::builder()
            .api_token(token)
            .user_agent(USER_AGENT);
        if let Some(url) = api_url {
            builder = builder.base_url(url);
        }
        builder.build().map_err(CliError::from)
    }

    fn profile_error(&self, requested: Option<&str>, err: hcloudctl_core::CoreError) -> CliError {
        match requested {
            Some(name) if !self.config.profiles.contains_key(name) => CliError::ProfileNotFound {
                name: name.to_string(),
            },
            _ if self.config.profiles.is_empty() => CliError::NoProfileConfigured,
            _ => CliError::from(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hcloudctl_core::Profile;

    fn config_with(name: &str) -> Config {
        let mut config = Config::default();
        config.set_profile(
            name.to_string(),
            Profile {
                api_token: "tok".to_string(),
                project: None,
                api_url: Some("https://example.invalid/v1".to_string()),
            },
        );
        config
    }

    #[test]
    #[serial_test::serial]
    fn missing_named_profile_is_reported_as_such() {
        let mgr = ConnectionManager::new(config_with("dev"));
        let err = mgr.create_client(Some("prod")).unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { name } if name == "prod"));
    }

    #[test]
    #[serial_test::serial]
    fn empty_config_reports_no_profile() {
        // Explicit config path keeps HCLOUD_TOKEN from leaking in
        let mgr = ConnectionManager::with_config_path(
            Config::default(),
            Some(std::path::PathBuf::from("/tmp/none.toml")),
        );
        let err = mgr.create_client(None).unwrap_err();
        assert!(matches!(err, CliError::NoProfileConfigured));
    }

    #[test]
    #[serial_test::serial]
    fn env_token_wins_over_profile() {
        unsafe {
            std::env::set_var("HCLOUD_TOKEN", "env-token");
        }
        let mgr = ConnectionManager::new(config_with("dev"));
        assert!(mgr.create_client(None).is_ok());
        unsafe {
            std::env::remove_var("HCLOUD_TOKEN");
        }
    }

    #[test]
    #[serial_test::serial]
    fn explicit_config_path_ignores_env_token() {
        unsafe {
            std::env::set_var("HCLOUD_TOKEN", "env-token");
        }
        let mgr = ConnectionManager::with_config_path(
            Config::default(),
            Some(std::path::PathBuf::from("/tmp/none.toml")),
        );
        let err = mgr.create_client(None).unwrap_err();
        assert!(matches!(err, CliError::NoProfileConfigured));
        unsafe {
            std::env::remove_var("HCLOUD_TOKEN");
        }
    }
}
