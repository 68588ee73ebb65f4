//! Video identifier extraction.
//!
//! Recognizes the canonical, short-link and embed URL shapes of a video
//! platform and pulls out the 11 character identifier they all share.
//! Purely a string match, nothing here touches the network.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Identifiers are exactly 11 characters of `[A-Za-z0-9_-]`.
static VIDEO_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Failed to compile video id regex"));

/// Path prefixes on a canonical host that carry the identifier as the next segment.
const EMBED_PREFIXES: [&str; 5] = ["embed", "v", "e", "shorts", "live"];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("input is not a recognizable video url")]
    NotRecognizable,

    #[error("could not derive a video id from the url")]
    NoIdentifier,
}

/// Host conventions of the video platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Hosts serving `/watch?v=` and embed style paths.
    pub canonical_hosts: Vec<String>,
    /// Hosts where the identifier is the first path segment.
    pub short_hosts: Vec<String>,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            canonical_hosts: [
                "youtube.com",
                "www.youtube.com",
                "m.youtube.com",
                "music.youtube.com",
                "youtube-nocookie.com",
                "www.youtube-nocookie.com",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            short_hosts: vec!["youtu.be".to_string()],
        }
    }
}

/// A validated video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn parse(candidate: &str) -> Option<Self> {
        if VIDEO_ID_REGEX.is_match(candidate) {
            Some(Self(candidate.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

enum HostKind {
    Canonical,
    Short,
}

impl Platform {
    /// Parses the input as a URL on one of the platform hosts.
    fn recognize(&self, input: &str) -> Result<(Url, HostKind), ExtractError> {
        let input = input.trim();

        if input.is_empty() || input.chars().any(char::is_whitespace) {
            return Err(ExtractError::NotRecognizable);
        }

        let url = parse_lenient(input).ok_or(ExtractError::NotRecognizable)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ExtractError::NotRecognizable);
        }

        // `Url` already lowercases the host
        let host = url.host_str().ok_or(ExtractError::NotRecognizable)?;
        let host = host.trim_end_matches('.');

        let is_host = |hosts: &[String]| hosts.iter().any(|h| h.eq_ignore_ascii_case(host));

        let kind = if is_host(self.canonical_hosts.as_slice()) {
            HostKind::Canonical
        } else if is_host(self.short_hosts.as_slice()) {
            HostKind::Short
        } else {
            return Err(ExtractError::NotRecognizable);
        };

        Ok((url, kind))
    }

    /// Returns true when the input is a URL pointing at this platform.
    pub fn validate_url(&self, input: &str) -> bool {
        self.recognize(input).is_ok()
    }

    /// Extracts the video identifier from any supported URL shape.
    pub fn extract(&self, input: &str) -> Result<VideoId, ExtractError> {
        let (url, kind) = self.recognize(input)?;

        let segments = url
            .path_segments()
            .map(|s| s.filter(|s| !s.is_empty()).collect::<Vec<_>>())
            .unwrap_or_default();

        let candidate = match kind {
            HostKind::Short => segments.first().map(|id| id.to_string()),
            HostKind::Canonical => match segments.as_slice() {
                [] | ["watch"] => url
                    .query_pairs()
                    .find_map(|(key, value)| (key == "v").then(|| value.into_owned())),
                [prefix, id, ..] if EMBED_PREFIXES.contains(prefix) => Some(id.to_string()),
                _ => None,
            },
        };

        let id = candidate
            .as_deref()
            .and_then(VideoId::parse)
            .ok_or(ExtractError::NoIdentifier)?;

        log::debug!("extracted video id {id} from {}", url.as_str());

        Ok(id)
    }
}

/// Parses a URL, accepting protocol-relative and scheme-less input.
fn parse_lenient(input: &str) -> Option<Url> {
    if let Some(rest) = input.strip_prefix("//") {
        return Url::parse(&format!("https://{rest}")).ok();
    }

    let with_https = || Url::parse(&format!("https://{input}")).ok();

    match Url::parse(input) {
        // "host.tld:8080/path" reads as scheme "host.tld"
        Ok(url) if url.scheme().contains('.') => with_https(),
        Ok(url) if url.has_host() => Some(url),
        Ok(_) => None,
        // "youtu.be/xyz" has no scheme at all
        Err(url::ParseError::RelativeUrlWithoutBase) => with_https(),
        Err(_) => None,
    }
}
