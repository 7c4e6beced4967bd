//! Profile-based configuration loaded from `~/.config/linode`.
//!
//! The file is INI formatted. Every section is a profile; values missing
//! from a profile are inherited from the `[default]` section and then from
//! built-in defaults:
//!
//! ```ini
//! [default]
//! linode_api_token = abc123
//!
//! [beta]
//! linode_api_url = api.dev.linode.com
//! linode_api_version = v4beta
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ini::Ini;

use crate::error::{LinodeError, Result};

/// Host used when neither the profile nor the environment names one.
pub const DEFAULT_API_HOST: &str = "api.linode.com";

/// API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "v4";

/// Profile selected when none is requested.
pub const DEFAULT_PROFILE: &str = "default";

const KEY_TOKEN: &str = "linode_api_token";
const KEY_URL: &str = "linode_api_url";
const KEY_VERSION: &str = "linode_api_version";

/// Connection settings for one profile.
#[derive(Clone, PartialEq, Eq)]
pub struct ConfigProfile {
    pub api_token: String,
    pub api_url: String,
    pub api_version: String,
}

impl std::fmt::Debug for ConfigProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigProfile")
            .field("api_url", &self.api_url)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl Default for ConfigProfile {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            api_url: DEFAULT_API_HOST.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl ConfigProfile {
    fn overlay(&self, section: &ini::Properties) -> Self {
        let pick = |key: &str, current: &str| {
            section
                .get(key)
                .map(str::trim)
                .unwrap_or(current)
                .to_string()
        };
        Self {
            api_token: pick(KEY_TOKEN, &self.api_token),
            api_url: pick(KEY_URL, &self.api_url),
            api_version: pick(KEY_VERSION, &self.api_version),
        }
    }

    /// Ensure every setting is present.
    pub fn validate(&self, name: &str) -> Result<()> {
        for (key, value) in [
            (KEY_TOKEN, &self.api_token),
            (KEY_URL, &self.api_url),
            (KEY_VERSION, &self.api_version),
        ] {
            if value.is_empty() {
                return Err(LinodeError::Config(format!(
                    "unable to resolve {key} for profile {name}"
                )));
            }
        }
        Ok(())
    }

    /// Full API base URL, e.g. `https://api.linode.com/v4`.
    pub fn base_url(&self) -> String {
        build_base_url(&self.api_url, &self.api_version)
    }
}

/// Combine a host (or URL) and an API version into a base URL.
///
/// A bare host gets the `https` scheme; a trailing slash on the host is
/// ignored.
pub fn build_base_url(host: &str, version: &str) -> String {
    let host = host.trim_end_matches('/');
    let version = version.trim_matches('/');
    if host.contains("://") {
        format!("{host}/{version}")
    } else {
        format!("https://{host}/{version}")
    }
}

/// Where to read the configuration from and which profile to use.
#[derive(Debug, Clone, Default)]
pub struct LoadConfigOptions {
    /// Config file path, `~/.config/linode` when unset.
    pub path: Option<PathBuf>,
    /// Profile name, `default` when unset.
    pub profile: Option<String>,
}

impl LoadConfigOptions {
    pub fn profile(name: impl Into<String>) -> Self {
        Self {
            profile: Some(name.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    fn resolved_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(p) => Ok(p.clone()),
            None => default_config_path(),
        }
    }
}

/// `~/.config/linode`.
pub fn default_config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".config").join("linode"))
        .ok_or_else(|| LinodeError::ConfigMissing("unable to determine home directory".to_string()))
}

/// All profiles defined in a config file, keyed by lowercase name.
#[derive(Debug, Clone, Default)]
pub struct LinodeConfig {
    profiles: HashMap<String, ConfigProfile>,
}

impl LinodeConfig {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let ini = Ini::load_from_file(path)?;
        Ok(Self::from_ini(&ini))
    }

    /// Parse config file contents.
    pub fn parse(contents: &str) -> Result<Self> {
        let ini = Ini::load_from_str(contents)
            .map_err(|e| LinodeError::Config(e.to_string()))?;
        Ok(Self::from_ini(&ini))
    }

    fn from_ini(ini: &Ini) -> Self {
        let mut defaults = ConfigProfile::default();
        if let Some(general) = ini.section(None::<String>) {
            defaults = defaults.overlay(general);
        }
        for (name, props) in ini.iter() {
            if name.is_some_and(|n| n.eq_ignore_ascii_case(DEFAULT_PROFILE)) {
                defaults = defaults.overlay(props);
            }
        }

        let mut profiles = HashMap::new();
        profiles.insert(DEFAULT_PROFILE.to_string(), defaults.clone());
        for (name, props) in ini.iter() {
            let Some(name) = name else { continue };
            profiles.insert(name.to_lowercase(), defaults.overlay(props));
        }

        Self { profiles }
    }

    /// Look up a profile by (case-insensitive) name.
    pub fn profile(&self, name: &str) -> Result<&ConfigProfile> {
        let key = name.to_lowercase();
        self.profiles
            .get(&key)
            .ok_or(LinodeError::ProfileNotFound(key))
    }

    /// Look up a profile and check that it is complete.
    pub fn use_profile(&self, name: &str) -> Result<&ConfigProfile> {
        let profile = self.profile(name)?;
        profile.validate(&name.to_lowercase())?;
        Ok(profile)
    }

    /// Names of all profiles.
    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

/// Load the file and select the requested profile.
#[tracing::instrument]
pub fn load_profile(options: &LoadConfigOptions) -> Result<ConfigProfile> {
    let path = options.resolved_path()?;
    let name = options.profile.as_deref().unwrap_or(DEFAULT_PROFILE);
    tracing::debug!(path = %path.display(), profile = name, "loading config");

    let config = LinodeConfig::load(&path)?;
    config.use_profile(name).cloned()
}
