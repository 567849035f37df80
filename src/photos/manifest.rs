use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::http::{get_json, EscapedUrl, FetchError, GetService};

/// Rendition of an image asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Small,
    Medium,
    Original,
    Thumbnail,
}

/// Default preview preference, most preferred first.
pub const DEFAULT_PREVIEW_VARIANTS: [Variant; 4] = [
    Variant::Small,
    Variant::Medium,
    Variant::Original,
    Variant::Thumbnail,
];

impl Variant {
    /// Maps the tag used in asset file names (`name~tag.ext`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "orig" => Some(Self::Original),
            "thumb" => Some(Self::Thumbnail),
            _ => None,
        }
    }

    /// Classifies an asset path of the form `<name>~<tag>.<ext>`.
    pub fn from_path(path: &str) -> Option<Self> {
        let parts: Vec<&str> = path.split('~').filter(|p| !p.is_empty()).collect();
        let [_, suffix] = parts.as_slice() else {
            return None;
        };
        let pieces: Vec<&str> = suffix.split('.').filter(|p| !p.is_empty()).collect();
        let [tag, _] = pieces.as_slice() else {
            return None;
        };
        Self::from_tag(tag)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Original => "original",
            Self::Thumbnail => "thumbnail",
        };
        f.write_str(name)
    }
}

/// Renditions available for one photo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoManifest {
    assets: HashMap<Variant, Url>,
}

impl PhotoManifest {
    /// Classifies each URL by its path. Unrecognised paths are ignored and a
    /// later URL for the same variant replaces an earlier one.
    pub fn from_urls<I>(urls: I) -> Self
    where
        I: IntoIterator<Item = Url>,
    {
        let mut assets = HashMap::new();
        for url in urls {
            if let Some(variant) = Variant::from_path(url.path()) {
                assets.insert(variant, url);
            }
        }
        Self { assets }
    }

    pub fn get(&self, variant: Variant) -> Option<&Url> {
        self.assets.get(&variant)
    }

    /// URL of the first variant in `matching` that is present.
    pub fn first_url(&self, matching: &[Variant]) -> Option<&Url> {
        matching.iter().find_map(|variant| self.assets.get(variant))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Source of asset manifests.
#[async_trait]
pub trait AssetManifestRepository: Send + Sync {
    async fn fetch_manifest(&self, url: &Url) -> Result<PhotoManifest, FetchError>;
}

/// Reads manifests served as a JSON array of asset URLs.
pub struct HttpAssetManifestRepository {
    service: Arc<dyn GetService>,
}

impl HttpAssetManifestRepository {
    pub fn new(service: Arc<dyn GetService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AssetManifestRepository for HttpAssetManifestRepository {
    async fn fetch_manifest(&self, url: &Url) -> Result<PhotoManifest, FetchError> {
        let entries: Vec<EscapedUrl> = get_json(self.service.as_ref(), url).await?;
        let total = entries.len();
        let manifest = PhotoManifest::from_urls(entries.into_iter().map(EscapedUrl::into_url));

        tracing::debug!(
            url = %url,
            entries = total,
            variants = manifest.len(),
            "Fetched asset manifest"
        );

        Ok(manifest)
    }
}
