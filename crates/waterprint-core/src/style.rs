//! The style descriptor handed back to callers

use serde::{Deserialize, Serialize};

/// Background style for a watermarked surface
///
/// The empty descriptor (every field `None`) means "nothing to apply" and
/// serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    /// `url(data:image/png;base64,...)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Tile width, e.g. `50px`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl StyleDescriptor {
    /// The "no watermark produced" sentinel
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(
        image_url: impl Into<String>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            background_image: Some(format!("url({})", image_url.into())),
            background_size: Some(size.into()),
            background_color: Some(color.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.background_image.is_none()
            && self.background_size.is_none()
            && self.background_color.is_none()
    }

    /// CSS declarations, one per set field
    pub fn to_css(&self) -> String {
        [
            ("background-image", &self.background_image),
            ("background-size", &self.background_size),
            ("background-color", &self.background_color),
        ]
        .iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| format!("{name}: {v};")))
        .collect::<Vec<_>>()
        .join(" ")
    }
}
