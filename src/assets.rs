//! Embedded art assets
//!
//! The food image ships inline as SVG markup so no file has to be fetched.
//! The browser decodes it asynchronously; until it is ready (or if it never
//! is) the renderer draws the procedural fallback.

use crate::texture::Texture;

/// Apple drawn on food tiles
pub const APPLE_SVG: &str = r##"<svg xmlns='http://www.w3.org/2000/svg' width='128' height='128' viewBox='0 0 128 128'>
  <defs>
    <radialGradient id="g" cx="35%" cy="30%" r="65%">
      <stop offset="0%" stop-color="#fff" stop-opacity="0.85"/>
      <stop offset="35%" stop-color="#fff" stop-opacity="0.25"/>
      <stop offset="100%" stop-color="#fff" stop-opacity="0"/>
    </radialGradient>
  </defs>
  <g>
    <circle cx="64" cy="64" r="36" fill="#e53935"/>
    <path d="M64 30 q14 0 20 10 q-8 -6 -20 -6 q-12 0 -20 6 q6 -10 20 -10z" fill="#d32f2f" opacity="0.9"/>
    <rect x="58" y="28" width="12" height="14" rx="3" ry="3" fill="#5d4037" transform="rotate(-20 64 35)"/>
    <ellipse cx="76" cy="50" rx="8" ry="5" fill="url(#g)" opacity="0.9"/>
  </g>
</svg>"##;

/// Pixel size the SVG is rasterized at
pub const APPLE_RASTER_SIZE: u32 = 128;

/// Decode state of an embedded image
#[derive(Debug, Clone, Default)]
pub enum ImageAsset {
    /// Decode still running
    #[default]
    Pending,
    Ready(Texture),
    /// Decode failed; callers stay on the fallback for the whole session
    Failed,
}

impl ImageAsset {
    /// The decoded texture, if available
    pub fn texture(&self) -> Option<&Texture> {
        match self {
            ImageAsset::Ready(texture) => Some(texture),
            _ => None,
        }
    }

    /// Record the decode result. Later results never replace a settled asset.
    pub fn settle(&mut self, result: Result<Texture, String>) {
        if !matches!(self, ImageAsset::Pending) {
            return;
        }
        *self = match result {
            Ok(texture) => {
                log::info!("Food image decoded ({}x{})", texture.width, texture.height);
                ImageAsset::Ready(texture)
            }
            Err(reason) => {
                log::warn!("Could not load embedded food image, using fallback: {}", reason);
                ImageAsset::Failed
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_has_no_texture() {
        assert!(ImageAsset::default().texture().is_none());
    }

    #[test]
    fn test_failed_decode_stays_failed() {
        let mut asset = ImageAsset::Pending;
        asset.settle(Err("decode error".into()));
        assert!(matches!(asset, ImageAsset::Failed));

        asset.settle(Ok(Texture::transparent(1, 1)));
        assert!(asset.texture().is_none());
    }

    #[test]
    fn test_ready_exposes_texture() {
        let mut asset = ImageAsset::Pending;
        asset.settle(Ok(Texture::transparent(2, 2)));
        assert_eq!(asset.texture().map(|t| t.width), Some(2));
    }

    #[test]
    fn test_svg_is_self_contained() {
        assert!(APPLE_SVG.starts_with("<svg"));
        assert!(APPLE_SVG.trim_end().ends_with("</svg>"));
    }
}
