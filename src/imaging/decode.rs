//! Base64 / data URL image decoding

use std::borrow::Cow;

use base64::{engine::general_purpose, Engine};
use image::RgbImage;

use crate::utils::error::Result;

/// Prefix shared by every data URL
const DATA_URL_PREFIX: &str = "data:";

/// Marker separating the data URL header from its payload
const BASE64_MARKER: &str = ";base64,";

/// Return the base64 payload of `input`.
///
/// Inputs of the form `data:image/<type>;base64,<payload>` have their header
/// removed. Anything else, including a `data:` string with a different header,
/// is returned unchanged.
pub fn strip_data_url(input: &str) -> &str {
    let Some(rest) = input.strip_prefix(DATA_URL_PREFIX) else {
        return input;
    };
    let Some((mime, payload)) = rest.split_once(BASE64_MARKER) else {
        return input;
    };
    let Some(subtype) = mime.strip_prefix("image/") else {
        return input;
    };

    let is_word = !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');

    if is_word && !payload.is_empty() {
        payload
    } else {
        input
    }
}

/// Drop ASCII whitespace from a payload, e.g. MIME line breaks every 76 chars
fn strip_whitespace(payload: &str) -> Cow<'_, str> {
    if payload.bytes().any(|b| b.is_ascii_whitespace()) {
        Cow::Owned(
            payload
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect(),
        )
    } else {
        Cow::Borrowed(payload)
    }
}

/// Decode a base64 string (or image data URL) into raw bytes
pub fn decode_base64(input: &str) -> Result<Vec<u8>> {
    let payload = strip_whitespace(strip_data_url(input.trim()));
    Ok(general_purpose::STANDARD.decode(payload.as_bytes())?)
}

/// Decode encoded image bytes into an RGB bitmap.
///
/// The image format is sniffed from the bytes. Alpha channels are dropped and
/// grayscale images are expanded to three channels.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<RgbImage> {
    Ok(image::load_from_memory(bytes)?.to_rgb8())
}

/// Decode a base64 string (or image data URL) into an RGB bitmap
pub fn decode_base64_image(input: &str) -> Result<RgbImage> {
    decode_image_bytes(&decode_base64(input)?)
}
