use chrono::{DateTime, Utc};
use reqwest::Url;

use super::entity::PhotoEntity;
use crate::collection::{CollectionItem, LinkRelation};

/// A photo as presented by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: String,
    pub title: Option<String>,
    pub date_created: Option<DateTime<Utc>>,
    pub photographer: Option<String>,
    pub details: Option<String>,
    pub thumbnail_url: Option<Url>,
    /// Resolved from the asset manifest; unset until details are loaded.
    pub preview_url: Option<Url>,
    pub manifest_url: Option<Url>,
}

/// Builds [`Photo`]s from collection items.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoBuilder;

impl PhotoBuilder {
    /// Returns `None` for items without a metadata record.
    pub fn make_photo(&self, index: usize, item: CollectionItem<PhotoEntity>) -> Option<Photo> {
        let thumbnail_url = item.link(LinkRelation::Preview).map(|href| href.url().clone());
        let manifest_url = item.href.into_url();

        let Some(entity) = item.data.into_iter().next() else {
            tracing::trace!(index, manifest = %manifest_url, "Skipping item without data");
            return None;
        };

        Some(Photo {
            id: entity.nasa_id,
            title: entity.title,
            date_created: Some(entity.date_created),
            photographer: entity.photographer,
            details: entity.description,
            thumbnail_url,
            preview_url: None,
            manifest_url: Some(manifest_url),
        })
    }
}
