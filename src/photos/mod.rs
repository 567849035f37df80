//! Photo domain: search records, the [`Photo`] built from them, asset
//! manifests and the details model that resolves preview images.

mod builder;
mod details;
mod entity;
mod manifest;

pub use builder::{Photo, PhotoBuilder};
pub use details::PhotoDetailsModel;
pub use entity::PhotoEntity;
pub use manifest::{
    AssetManifestRepository, HttpAssetManifestRepository, PhotoManifest, Variant,
    DEFAULT_PREVIEW_VARIANTS,
};
