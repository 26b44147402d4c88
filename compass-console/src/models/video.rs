//! Locally-held video asset and its revocable preview handle
//!
//! A [`VideoAsset`] is created when the operator selects a file; a preview
//! handle is created immediately after. The handle is scoped to exactly one
//! asset: whenever the asset is replaced or cleared, its handle is released
//! exactly once. Release is observable through a [`PreviewWatch`] so the
//! no-leak property can be asserted in tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// A video file held in memory, ready for multipart submission.
#[derive(Debug)]
pub struct VideoAsset {
    file_name: String,
    bytes: Vec<u8>,
    preview: PreviewUrl,
}

impl VideoAsset {
    /// Wrap raw file content. The preview handle is created immediately.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let preview = PreviewUrl::new(&file_name);
        tracing::debug!(
            file_name = %file_name,
            size_bytes = bytes.len(),
            preview = %preview.url(),
            "Video asset selected"
        );
        Self {
            file_name,
            bytes,
            preview,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    pub fn preview(&self) -> &PreviewUrl {
        &self.preview
    }

    /// Release the preview handle. Idempotent; also happens on drop.
    pub fn release_preview(&self) {
        self.preview.revoke();
    }
}

/// Revocable preview handle standing in for an object URL.
///
/// The handle is released at most once no matter how many times `revoke`
/// runs; dropping the owning [`VideoAsset`] releases it as a backstop.
#[derive(Debug)]
pub struct PreviewUrl {
    url: String,
    shared: Arc<PreviewShared>,
}

#[derive(Debug)]
struct PreviewShared {
    released: AtomicBool,
    release_count: AtomicUsize,
}

impl PreviewUrl {
    fn new(file_name: &str) -> Self {
        Self {
            url: format!("mem://{}/{}", Uuid::new_v4(), file_name),
            shared: Arc::new(PreviewShared {
                released: AtomicBool::new(false),
                release_count: AtomicUsize::new(0),
            }),
        }
    }

    /// The preview address handed to the rendering layer.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_released(&self) -> bool {
        self.shared.released.load(Ordering::SeqCst)
    }

    /// Release the handle. Only the first call counts.
    pub fn revoke(&self) {
        if !self.shared.released.swap(true, Ordering::SeqCst) {
            self.shared.release_count.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(preview = %self.url, "Preview handle released");
        }
    }

    /// Observer handle for tests and leak accounting.
    pub fn watch(&self) -> PreviewWatch {
        PreviewWatch(Arc::clone(&self.shared))
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        self.revoke();
    }
}

/// Read-only observer of a preview handle's release state.
#[derive(Debug, Clone)]
pub struct PreviewWatch(Arc<PreviewShared>);

impl PreviewWatch {
    pub fn is_released(&self) -> bool {
        self.0.released.load(Ordering::SeqCst)
    }

    /// How many times the underlying handle was actually released.
    /// The invariant is that this never exceeds 1.
    pub fn release_count(&self) -> usize {
        self.0.release_count.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_created_with_asset() {
        let asset = VideoAsset::from_bytes("interview.mp4", vec![0u8; 16]);
        assert!(asset.preview().url().starts_with("mem://"));
        assert!(asset.preview().url().ends_with("/interview.mp4"));
        assert!(!asset.preview().is_released());
    }

    #[test]
    fn revoke_is_counted_once() {
        let asset = VideoAsset::from_bytes("a.mp4", vec![1, 2, 3]);
        let watch = asset.preview().watch();

        asset.release_preview();
        asset.release_preview();
        drop(asset);

        assert!(watch.is_released());
        assert_eq!(watch.release_count(), 1);
    }

    #[test]
    fn drop_releases_preview() {
        let asset = VideoAsset::from_bytes("b.mov", vec![]);
        let watch = asset.preview().watch();
        assert!(!watch.is_released());
        drop(asset);
        assert!(watch.is_released());
        assert_eq!(watch.release_count(), 1);
    }
}
