//! Thumbnail link derivation.

use crate::video_id::{ExtractError, Platform, VideoId};
use serde::{Deserialize, Serialize};

/// A named resolution tier of the thumbnail image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[value(name = "maxres")]
    MaxRes,
    Hq,
    Mq,
    Sd,
    Default,
    Medium,
    High,
}

impl Variant {
    pub const ALL: [Variant; 7] = [
        Variant::MaxRes,
        Variant::Hq,
        Variant::Mq,
        Variant::Sd,
        Variant::Default,
        Variant::Medium,
        Variant::High,
    ];

    /// Variants offered in the "download by size" group.
    pub const BY_SIZE: [Variant; 4] = [Variant::MaxRes, Variant::Hq, Variant::Mq, Variant::Sd];

    pub fn key(self) -> &'static str {
        match self {
            Variant::MaxRes => "maxres",
            Variant::Hq => "hq",
            Variant::Mq => "mq",
            Variant::Sd => "sd",
            Variant::Default => "default",
            Variant::Medium => "medium",
            Variant::High => "high",
        }
    }

    /// File name (without extension) on the image host.
    pub fn suffix(self) -> &'static str {
        match self {
            Variant::MaxRes => "maxresdefault",
            Variant::Hq | Variant::High => "hqdefault",
            Variant::Mq | Variant::Medium => "mqdefault",
            Variant::Sd => "sddefault",
            Variant::Default => "default",
        }
    }

    /// Nominal (width, height) the image host serves for this variant.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Variant::MaxRes => (1280, 720),
            Variant::Hq | Variant::High => (480, 360),
            Variant::Mq | Variant::Medium => (320, 180),
            Variant::Sd => (640, 480),
            Variant::Default => (120, 90),
        }
    }

    pub fn size_label(self) -> String {
        let (w, h) = self.dimensions();
        format!("{w}x{h}")
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub variant: Variant,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub filename: String,
}

/// Every thumbnail url derivable for one video id, in [`Variant::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSet {
    pub video_id: VideoId,
    links: Vec<Link>,
}

impl LinkSet {
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn get(&self, variant: Variant) -> Option<&Link> {
        self.links.iter().find(|link| link.variant == variant)
    }

    pub fn url(&self, variant: Variant) -> Option<&str> {
        self.get(variant).map(|link| link.url.as_str())
    }
}

/// Builds thumbnail urls of the form `<image_base>/<id>/<suffix>.jpg`.
#[derive(Debug, Clone)]
pub struct LinkDeriver {
    image_base: String,
    filename_prefix: String,
}

impl LinkDeriver {
    pub fn new(image_base: &str, filename_prefix: &str) -> Self {
        Self {
            image_base: image_base.trim_end_matches('/').to_string(),
            filename_prefix: filename_prefix.to_string(),
        }
    }

    pub fn image_base(&self) -> &str {
        &self.image_base
    }

    pub fn url(&self, id: &VideoId, variant: Variant) -> String {
        format!("{}/{}/{}.jpg", self.image_base, id, variant.suffix())
    }

    pub fn filename(&self, variant: Variant) -> String {
        self.labelled_filename(variant.key())
    }

    /// `<prefix>-<label>.jpg`, used for variant files and the profile/cover tiles.
    pub fn labelled_filename(&self, label: &str) -> String {
        format!("{}-{label}.jpg", self.filename_prefix)
    }

    pub fn derive(&self, id: &VideoId) -> LinkSet {
        let links = Variant::ALL
            .into_iter()
            .map(|variant| {
                let (width, height) = variant.dimensions();
                Link {
                    variant,
                    url: self.url(id, variant),
                    width,
                    height,
                    filename: self.filename(variant),
                }
            })
            .collect();

        LinkSet {
            video_id: id.clone(),
            links,
        }
    }
}

/// Extracts the video id from `input` and derives its link set.
pub fn resolve(
    platform: &Platform,
    deriver: &LinkDeriver,
    input: &str,
) -> Result<LinkSet, ExtractError> {
    if !platform.validate_url(input) {
        return Err(ExtractError::NotRecognizable);
    }

    let id = platform.extract(input)?;
    Ok(deriver.derive(&id))
}
