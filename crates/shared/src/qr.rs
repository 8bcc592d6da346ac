//! QR code rendering for registration tokens.
//!
//! The QR image is a convenience for scanning at the entrance; the token
//! itself remains the source of truth. Rendering is a pure function of the
//! token, so the same code can be regenerated for a resend without issuing
//! a new token.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;
use thiserror::Error;

/// Minimum rendered image dimensions in pixels.
const QR_IMAGE_SIZE: u32 = 300;

/// Error type for QR rendering failures.
#[derive(Debug, Error)]
pub enum QrError {
    #[error("QR encoding failed: {0}")]
    Encode(String),

    #[error("PNG rendering failed: {0}")]
    Render(String),
}

/// Renders a registration token as a PNG QR code, returned as a
/// `data:image/png;base64,...` URI suitable for embedding in emails and
/// web pages.
pub fn encode_token(token: &str) -> Result<String, QrError> {
    let code = QrCode::with_error_correction_level(token.as_bytes(), EcLevel::M)
        .map_err(|e| QrError::Encode(e.to_string()))?;

    let img = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_IMAGE_SIZE, QR_IMAGE_SIZE)
        .quiet_zone(true)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| QrError::Render(e.to_string()))?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_token_returns_data_uri() {
        let result = encode_token("reg_abc123").expect("encoding should succeed");
        assert!(result.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_encode_token_produces_valid_png() {
        let result = encode_token("reg_abc123").unwrap();
        let b64 = result.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = STANDARD.decode(b64).expect("valid base64");
        // PNG magic bytes
        assert_eq!(&bytes[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_token_is_reproducible() {
        let a = encode_token("reg_same-token").unwrap();
        let b = encode_token("reg_same-token").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_encode_different_tokens_differ() {
        let a = encode_token("reg_token-one").unwrap();
        let b = encode_token("reg_token-two").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_encode_oversized_input_fails() {
        // QR version 40 tops out around 3 KB of byte data
        let oversized = "x".repeat(8192);
        assert!(encode_token(&oversized).is_err());
    }
}
