//! PNG snapshots of the chart for embedding in reports.
//!
//! The same SVG that is shown on screen gets rasterized: through resvg on
//! native targets and through an offscreen canvas in the browser.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::core::readiness::EngineReady;
use crate::results::charts::{render_svg, ChartSpec};

pub const SNAPSHOT_WIDTH: u32 = 1200;
pub const SNAPSHOT_HEIGHT: u32 = 560;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

pub fn png_data_url(png: &[u8]) -> String {
    format!("{DATA_URL_PREFIX}{}", STANDARD.encode(png))
}

/// Chart snapshot as a PNG data URL, or `None` when it cannot be taken.
///
/// Never waits for the engine: if it has not come up yet the report simply
/// goes out without an image.
pub async fn chart_data_url(spec: &ChartSpec, engine: &EngineReady) -> Option<String> {
    if !engine.is_ready() {
        tracing::debug!("chart engine not ready; report will omit the chart");
        return None;
    }
    match capture_png(spec).await {
        Ok(png) => Some(png_data_url(&png)),
        Err(err) => {
            tracing::warn!(%err, "chart snapshot failed; report will omit the chart");
            None
        }
    }
}

pub async fn capture_png(spec: &ChartSpec) -> Result<Vec<u8>, String> {
    let svg = render_svg(spec, SNAPSHOT_WIDTH, SNAPSHOT_HEIGHT);

    #[cfg(target_arch = "wasm32")]
    {
        rasterize_web(&svg).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        rasterize_native(&svg)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn rasterize_native(svg: &str) -> Result<Vec<u8>, String> {
    let mut options = usvg::Options::default();
    options.fontdb = crate::results::fonts::database();

    let tree = usvg::Tree::from_str(svg, &options).map_err(|err| err.to_string())?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or("Unable to allocate snapshot surface")?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|err| err.to_string())
}

#[cfg(target_arch = "wasm32")]
async fn rasterize_web(svg: &str) -> Result<Vec<u8>, String> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url,
    };

    let opts = BlobPropertyBag::new();
    opts.set_type("image/svg+xml");
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(svg));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| "Unable to build SVG blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Unable to create SVG URL".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("Document unavailable")?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| "Unable to create canvas")?
        .dyn_into()
        .map_err(|_| "Canvas cast failed")?;
    canvas.set_width(SNAPSHOT_WIDTH);
    canvas.set_height(SNAPSHOT_HEIGHT);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| "Canvas context unavailable")?
        .ok_or("Canvas context missing")?
        .dyn_into()
        .map_err(|_| "Context cast failed")?;

    let image = HtmlImageElement::new().map_err(|_| "Unable to create image")?;
    image.set_src(&url);
    let decoded = JsFuture::from(image.decode()).await;
    if decoded.is_err() {
        Url::revoke_object_url(&url).ok();
        return Err("Image decode failed".into());
    }

    context
        .draw_image_with_html_image_element(&image, 0.0, 0.0)
        .map_err(|_| "Unable to draw image")?;
    Url::revoke_object_url(&url).ok();

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| "Unable to serialise canvas")?;
    let encoded = data_url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or("Malformed data URL")?;

    STANDARD
        .decode(encoded)
        .map_err(|_| "PNG decode failed".to_string())
}
