//! Thumbnail retrieval.
//!
//! A plain fetch of the image bytes, restricted to the configured image host.
//! Callers decide what a failure means; the CLI and the daemon both log it
//! and move on.

use crate::links::{LinkSet, Variant};
use image::GenericImageView;
use reqwest::StatusCode;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

const USER_AGENT_DEFAULT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0";

#[derive(thiserror::Error, Debug)]
pub enum DownloadError {
    #[error("url is outside the image host: {0}")]
    Forbidden(String),

    #[error("image host answered {0}")]
    Status(StatusCode),

    #[error("reqwest error: {0:?}")]
    Reqwest(#[from] reqwest::Error),

    #[error("io error: {0:?}")]
    IO(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct Fetched {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    /// `None` when the bytes could not be decoded as an image
    pub dimensions: Option<(u32, u32)>,
}

impl Fetched {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let mime_type = infer::get(&bytes)
            .map(|kind| kind.mime_type())
            .unwrap_or("application/octet-stream");

        let dimensions = image::load_from_memory(&bytes)
            .map(|img| img.dimensions())
            .ok();

        Self {
            bytes,
            mime_type,
            dimensions,
        }
    }
}

pub struct Downloader {
    client: reqwest::blocking::Client,
    image_base: String,
}

impl Downloader {
    pub fn new(image_base: &str, timeout: Duration) -> Result<Self, DownloadError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT_DEFAULT)
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            image_base: image_base.trim_end_matches('/').to_string(),
        })
    }

    /// Only urls below the image base may be fetched.
    pub fn is_allowed(&self, url: &str) -> bool {
        is_under_base(&self.image_base, url)
    }

    pub fn fetch(&self, url: &str) -> Result<Fetched, DownloadError> {
        if !self.is_allowed(url) {
            return Err(DownloadError::Forbidden(url.to_string()));
        }

        log::debug!("{url}: requesting");

        let resp = self.client.get(url).send()?;
        let status = resp.status();

        if !status.is_success() {
            log::debug!("{url}: {status}");
            return Err(DownloadError::Status(status));
        }

        let bytes = resp.bytes()?;

        Ok(Fetched::from_bytes(bytes.into()))
    }

    /// Fetches `url` and writes it into `dir` under a sanitized `filename`.
    pub fn save(&self, url: &str, dir: &Path, filename: &str) -> Result<PathBuf, DownloadError> {
        let fetched = self.fetch(url)?;

        std::fs::create_dir_all(dir)?;
        let path = dir.join(sanitize_filename(filename));
        std::fs::write(&path, &fetched.bytes)?;

        match fetched.dimensions {
            Some((w, h)) => log::info!("saved {} ({w}x{h}, {})", path.display(), fetched.mime_type),
            None => log::info!("saved {} ({})", path.display(), fetched.mime_type),
        }

        Ok(path)
    }

    /// Saves each variant of `link_set` into `dir`. A variant that fails is
    /// logged and skipped, the rest are still attempted.
    pub fn save_all(&self, link_set: &LinkSet, variants: &[Variant], dir: &Path) -> Vec<PathBuf> {
        let mut saved = Vec::new();

        for &variant in variants {
            let Some(link) = link_set.get(variant) else {
                log::warn!("{}: no {variant} link", link_set.video_id);
                continue;
            };

            match self.save(&link.url, dir, &link.filename) {
                Ok(path) => saved.push(path),
                Err(err) => log::error!("{}: {err}", link.url),
            }
        }

        log::info!("{} thumbnails saved to {}", saved.len(), dir.display());

        saved
    }
}

fn is_under_base(image_base: &str, url: &str) -> bool {
    let (Ok(base), Ok(url)) = (url::Url::parse(image_base), url::Url::parse(url)) else {
        return false;
    };

    base.scheme() == url.scheme()
        && base.host_str() == url.host_str()
        && base.port_or_known_default() == url.port_or_known_default()
        && url
            .path()
            .strip_prefix(base.path().trim_end_matches('/'))
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Keeps `[A-Za-z0-9._-]`, never returns an empty or dot-only name.
pub fn sanitize_filename(name: &str) -> String {
    let name: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_' || *c == '.')
        .collect();

    if name.chars().all(|c| c == '.') {
        "thumbnail.jpg".to_string()
    } else {
        name
    }
}
