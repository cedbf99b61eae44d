/*!
 * Page image helpers for vision-capable backends.
 *
 * Chat models receive the page as a base64 PNG. Gemini takes it as an
 * inline-data part of the message.
 */

use base64::{engine::general_purpose, Engine};
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

use crate::errors::ProviderError;
use crate::language_utils::is_cjk;

/// MIME type of every image sent to a backend
pub const PNG_MIME_TYPE: &str = "image/png";

/// Image attached inline to a Gemini message part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 encoded image bytes
    pub data: String,
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ProviderError> {
    let mut png_bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| ProviderError::ImageEncoding(e.to_string()))?;
    Ok(png_bytes)
}

/// Encode an image as a base64 PNG string
pub fn encode_png_base64(image: &DynamicImage) -> Result<String, ProviderError> {
    Ok(general_purpose::STANDARD.encode(encode_png(image)?))
}

/// Data URL form used by OpenAI image parts
pub fn to_data_url(image: &DynamicImage) -> Result<String, ProviderError> {
    Ok(format!("data:{};base64,{}", PNG_MIME_TYPE, encode_png_base64(image)?))
}

/// Convert an image to the inline-data part Gemini expects
pub fn to_inline_data(image: &DynamicImage) -> Result<InlineData, ProviderError> {
    Ok(InlineData {
        mime_type: PNG_MIME_TYPE.to_string(),
        data: encode_png_base64(image)?,
    })
}

/// Pick the image shown to a vision model
///
/// For CJK sources the inpainted page is used so the model does not see the
/// original glyphs.
pub fn select_llm_image<'a>(
    source_code: &str,
    image: &'a DynamicImage,
    inpainted: &'a DynamicImage,
) -> &'a DynamicImage {
    if is_cjk(source_code) {
        inpainted
    } else {
        image
    }
}
