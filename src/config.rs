use crate::{links::LinkDeriver, video_id::Platform};
use anyhow::{bail, Context, Result};
use homedir::my_home;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.yaml";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_IMAGE_BASE: &str = "https://img.youtube.com/vi";
const DEFAULT_DOWNLOAD_PREFIX: &str = "youtube-thumbnail";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Language served at `/` and used by the CLI when `--lang` is absent
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Thumbnail urls are `<image_base>/<video id>/<suffix>.jpg`
    #[serde(default = "default_image_base")]
    pub image_base: String,

    #[serde(default = "default_canonical_hosts")]
    pub canonical_hosts: Vec<String>,

    #[serde(default = "default_short_hosts")]
    pub short_hosts: Vec<String>,

    /// Where `download` saves files. Current directory when unset.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,

    #[serde(default = "default_download_prefix")]
    pub download_prefix: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(skip_serializing, skip_deserializing)]
    pub(crate) base_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            default_language: default_language(),
            image_base: default_image_base(),
            canonical_hosts: default_canonical_hosts(),
            short_hosts: default_short_hosts(),
            download_dir: None,
            download_prefix: default_download_prefix(),
            request_timeout_secs: default_request_timeout_secs(),
            base_path: PathBuf::new(),
        }
    }
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_image_base() -> String {
    DEFAULT_IMAGE_BASE.to_string()
}

fn default_canonical_hosts() -> Vec<String> {
    Platform::default().canonical_hosts
}

fn default_short_hosts() -> Vec<String> {
    Platform::default().short_hosts
}

fn default_download_prefix() -> String {
    DEFAULT_DOWNLOAD_PREFIX.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// `$THUMBGRAB_BASE_PATH`, or `~/.local/share/thumbgrab`.
pub fn base_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("THUMBGRAB_BASE_PATH") {
        return Ok(PathBuf::from(path));
    }

    let home = my_home()
        .context("couldnt find home dir")?
        .context("couldnt find home dir")?;

    Ok(home.join(".local/share/thumbgrab"))
}

impl Config {
    fn validate(&mut self) -> Result<()> {
        self.image_base = self.image_base.trim_end_matches('/').to_string();

        let image_base = url::Url::parse(&self.image_base)
            .with_context(|| format!("image_base is not a valid url: {:?}", self.image_base))?;
        if !matches!(image_base.scheme(), "http" | "https") {
            bail!("image_base must be an http(s) url, got {:?}", self.image_base);
        }

        if self.canonical_hosts.is_empty() && self.short_hosts.is_empty() {
            bail!("at least one of canonical_hosts or short_hosts must be set");
        }

        for host in self.canonical_hosts.iter_mut().chain(self.short_hosts.iter_mut()) {
            *host = host.trim().to_ascii_lowercase();
        }

        if crate::i18n::Language::from_code(&self.default_language).is_none() {
            log::warn!(
                "default_language {:?} is not supported, falling back to en",
                self.default_language
            );
            self.default_language = DEFAULT_LANGUAGE.to_string();
        }

        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = 1;
        }

        Ok(())
    }

    pub fn load() -> Result<Self> {
        Self::load_with(&base_path()?)
    }

    pub fn load_with(base_path: &Path) -> Result<Self> {
        std::fs::create_dir_all(base_path)
            .with_context(|| format!("failed to create {}", base_path.display()))?;

        let config_path = base_path.join(CONFIG_FILE);

        // create new if does not exist
        if !config_path.exists() {
            std::fs::write(&config_path, serde_yml::to_string(&Self::default())?)?;
        }

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let mut config: Self = serde_yml::from_str(&config_str).context("config is malformed")?;

        config.base_path = base_path.to_path_buf();

        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_str = serde_yml::to_string(&self)?;
        std::fs::write(self.base_path.join(CONFIG_FILE), config_str)?;
        Ok(())
    }

    pub fn platform(&self) -> Platform {
        Platform {
            canonical_hosts: self.canonical_hosts.clone(),
            short_hosts: self.short_hosts.clone(),
        }
    }

    pub fn link_deriver(&self) -> LinkDeriver {
        LinkDeriver::new(&self.image_base, &self.download_prefix)
    }
}
