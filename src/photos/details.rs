use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use super::builder::Photo;
use super::manifest::{AssetManifestRepository, Variant};
use crate::http::FetchError;

/// Loads the preview image of a single photo.
///
/// The photo is observable; `reload()` looks up the asset manifest and
/// publishes a copy of the original photo with `preview_url` filled in.
/// Failures go to the error stream and leave the published photo unchanged.
pub struct PhotoDetailsModel {
    original: Photo,
    photo: watch::Sender<Photo>,
    errors: broadcast::Sender<Arc<FetchError>>,
    preview_variants: Vec<Variant>,
    repository: Arc<dyn AssetManifestRepository>,
}

impl PhotoDetailsModel {
    pub fn new(
        photo: Photo,
        preview_variants: Vec<Variant>,
        repository: Arc<dyn AssetManifestRepository>,
    ) -> Self {
        let (sender, _) = watch::channel(photo.clone());
        let (errors, _) = broadcast::channel(crate::pager::ERROR_CHANNEL_CAPACITY);
        Self {
            original: photo,
            photo: sender,
            errors,
            preview_variants,
            repository,
        }
    }

    pub fn photo(&self) -> watch::Receiver<Photo> {
        self.photo.subscribe()
    }

    pub fn current(&self) -> Photo {
        self.photo.borrow().clone()
    }

    pub fn errors(&self) -> broadcast::Receiver<Arc<FetchError>> {
        self.errors.subscribe()
    }

    pub async fn reload(&self) {
        let Some(manifest_url) = &self.original.manifest_url else {
            self.emit(FetchError::ResourceUnavailable(format!(
                "photo {} has no asset manifest",
                self.original.id
            )));
            return;
        };

        match self.repository.fetch_manifest(manifest_url).await {
            Ok(manifest) => {
                let mut photo = self.original.clone();
                photo.preview_url = manifest.first_url(&self.preview_variants).cloned();
                tracing::debug!(
                    id = %photo.id,
                    preview = photo.preview_url.as_ref().map(|u| u.as_str()),
                    "Resolved photo preview"
                );
                self.photo.send_replace(photo);
            }
            Err(e) => self.emit(e),
        }
    }

    fn emit(&self, error: FetchError) {
        tracing::warn!(
            id = %self.original.id,
            error_type = error.error_type(),
            error = %error,
            "Photo details unavailable"
        );
        let _ = self.errors.send(Arc::new(error));
    }
}
