//! Decode embedded SVG markup into a CPU texture

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use super::js_error;
use crate::error::{ArcadeError, Result};
use crate::texture::Texture;

/// Rasterize `svg` at `size`×`size` through an offscreen 2D canvas
pub async fn decode_svg(document: &Document, svg: &str, size: u32) -> Result<Texture> {
    let image = HtmlImageElement::new_with_width_and_height(size, size)
        .map_err(|e| js_error("create image", e))?;
    let encoded: String = js_sys::encode_uri_component(svg).into();
    image.set_src(&format!("data:image/svg+xml;charset=utf-8,{}", encoded));
    JsFuture::from(image.decode())
        .await
        .map_err(|e| js_error("decode image", e))?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| js_error("create canvas", e))?
        .dyn_into()
        .map_err(|_| ArcadeError::Platform("created element is not a canvas".into()))?;
    canvas.set_width(size);
    canvas.set_height(size);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| js_error("get 2d context", e))?
        .ok_or_else(|| ArcadeError::Platform("2d context unavailable".into()))?
        .dyn_into()
        .map_err(|_| ArcadeError::Platform("unexpected 2d context type".into()))?;

    let edge = size as f64;
    context
        .draw_image_with_html_image_element_and_dw_and_dh(&image, 0.0, 0.0, edge, edge)
        .map_err(|e| js_error("draw image", e))?;
    let data = context
        .get_image_data(0.0, 0.0, edge, edge)
        .map_err(|e| js_error("read pixels", e))?;

    Texture::from_rgba8(size, size, &data.data().0)
        .ok_or_else(|| ArcadeError::Platform("image data has the wrong length".into()))
}
