//! Image decoding and preprocessing
//!
//! - `decode`: base64 or data URL → RGB bitmap
//! - `preprocess`: RGB bitmap → normalized single-item batch

pub mod decode;
pub mod preprocess;

pub use decode::{decode_base64, decode_base64_image, decode_image_bytes, strip_data_url};
pub use preprocess::{preprocess_image, ImageBatch, CHANNELS};
