//! Maps `OptimizerSettings` to libwebp encoder options.

use image::DynamicImage;
use libwebp_sys::WebPConfig;
use tracing::debug;
use webp::{BitstreamFeatures, Encoder};

use crate::core::OptimizerSettings;
use crate::utils::{OptimizerError, OptimizerResult};

/// Pixel layout handed to the WebP encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Rgb,
    Rgba,
}

impl ChannelLayout {
    /// RGBA when the decoded image carries alpha (RGBA, LA, or a palette
    /// with transparency), RGB otherwise.
    pub fn for_image(image: &DynamicImage) -> Self {
        if image.color().has_alpha() {
            Self::Rgba
        } else {
            Self::Rgb
        }
    }
}

/// A WebP bitstream held in memory, ready to be written out.
#[derive(Debug)]
pub struct EncodedWebp {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub layout: ChannelLayout,
    /// Whether the bitstream carries an alpha channel. libwebp drops alpha
    /// from fully opaque input, so this can be false for `Rgba`.
    pub has_alpha: bool,
}

/// Encodes `image` as lossy WebP using the configured quality and method.
///
/// The image is first converted to 8-bit RGB or RGBA so the encoder always
/// receives a layout it supports; transparency survives the conversion.
pub fn encode_webp(image: &DynamicImage, settings: &OptimizerSettings) -> OptimizerResult<EncodedWebp> {
    let layout = ChannelLayout::for_image(image);
    let (width, height) = (image.width(), image.height());

    let config = webp_config(settings)?;

    let memory = match layout {
        ChannelLayout::Rgba => {
            let pixels = image.to_rgba8();
            Encoder::from_rgba(pixels.as_raw(), width, height)
                .encode_advanced(&config)
                .map_err(|e| OptimizerError::encode(format!("WebP encoding failed: {e:?}")))?
        }
        ChannelLayout::Rgb => {
            let pixels = image.to_rgb8();
            Encoder::from_rgb(pixels.as_raw(), width, height)
                .encode_advanced(&config)
                .map_err(|e| OptimizerError::encode(format!("WebP encoding failed: {e:?}")))?
        }
    };

    let has_alpha = BitstreamFeatures::new(&memory)
        .map(|features| features.has_alpha())
        .ok_or_else(|| OptimizerError::encode("Encoder produced an unreadable WebP bitstream"))?;

    debug!(
        "Encoded {}x{} {:?} WebP: {} bytes, alpha={} (q={}, method={})",
        width,
        height,
        layout,
        memory.len(),
        has_alpha,
        settings.webp_quality,
        settings.webp_method
    );

    Ok(EncodedWebp {
        data: memory.to_vec(),
        width,
        height,
        layout,
        has_alpha,
    })
}

fn webp_config(settings: &OptimizerSettings) -> OptimizerResult<WebPConfig> {
    let mut config = WebPConfig::new()
        .map_err(|_| OptimizerError::encode("Failed to initialise WebP encoder config"))?;
    config.lossless = 0;
    config.quality = f32::from(settings.webp_quality);
    config.method = i32::from(settings.webp_method);
    Ok(config)
}
