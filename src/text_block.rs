use serde::{Deserialize, Serialize};

/// A detected text region on a comic page
///
/// Blocks are created and owned by the page pipeline. Translation only ever
/// writes the `translation` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Raw OCR text of the region
    pub text: String,

    /// Translated text, empty until a backend fills it
    #[serde(default)]
    pub translation: String,

    /// Region in page pixels as `[x1, y1, x2, y2]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<[i32; 4]>,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_bounding_box(mut self, bounding_box: [i32; 4]) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    pub fn is_translated(&self) -> bool {
        !self.translation.is_empty()
    }
}
