//! Opaque references to uploaded or hosted images (logos, custom templates)

use base64::Engine;
use serde::{Deserialize, Serialize};

/// An image reference: hosted URL, site path or `data:` URL.
///
/// The jersey core never dereferences these; a blank reference is treated as
/// missing and the corresponding layer is simply not drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    /// Wrap a reference; blank input yields `None`
    pub fn new(reference: impl Into<String>) -> Option<Self> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            None
        } else {
            Some(AssetRef(reference))
        }
    }

    /// Build a `data:` URL from uploaded bytes
    pub fn from_upload(bytes: &[u8], mime: &str) -> Self {
        let mime = if mime.trim().is_empty() {
            "application/octet-stream"
        } else {
            mime.trim()
        };
        AssetRef(format!(
            "data:{};base64,{}",
            mime,
            base64::engine::general_purpose::STANDARD.encode(bytes)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_url(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// Usable for rendering (blank strings can still arrive through serde)
    pub fn is_present(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_reference_is_missing() {
        assert!(AssetRef::new("").is_none());
        assert!(AssetRef::new("   ").is_none());
        assert!(AssetRef::new("/logos/8twologo.jpg").is_some());
    }

    #[test]
    fn test_upload_becomes_data_url() {
        let asset = AssetRef::from_upload(b"PNG", "image/png");
        assert_eq!(asset.as_str(), "data:image/png;base64,UE5H");
        assert!(asset.is_data_url());
    }

    #[test]
    fn test_blank_from_serde_is_not_present() {
        let asset: AssetRef = serde_json::from_str("\"\"").unwrap();
        assert!(!asset.is_present());
    }
}
