//! Browser bindings: the canvas-backed engine, PNG compositing, console logging.
//!
//! Nothing here is exercised natively except the pure sizing helpers; every
//! other function calls into `web_sys` and only works on `wasm32`.

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

use js_sys::{Function, Promise, Uint8Array};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::capture::{Compositor, PNG_MIME, SaveSnapshot};
use crate::config::{ConfigError, EngineConfig};
use crate::engine::{Action, EngineCore};
use crate::geometry::Point;
use crate::input::{Button, Key, Modifiers};
use crate::render;

/// Install the `console_log` logger at `level`.
///
/// # Errors
///
/// Fails if a logger is already installed.
pub fn init_console_logging(level: log::Level) -> Result<(), log::SetLoggerError> {
    console_log::init_with_level(level)
}

/// The full canvas engine. Wraps `EngineCore` and owns the overlay canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` is invalid.
    pub fn with_config(canvas: HtmlCanvasElement, config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self { canvas, core: EngineCore::with_config(config)? })
    }

    /// The overlay canvas, e.g. for wiring DOM listeners.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio, resizing the
    /// backing buffer to `display × dpr`.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let actions = self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width(device_px(self.core.viewport_width, self.core.dpr));
        self.canvas.set_height(device_px(self.core.viewport_height, self.core.dpr));
        actions
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let mut ctx = context_2d(&self.canvas)?;
        render::draw(&mut ctx, &self.core.scene())
    }
}

/// Composites base imagery and the overlay on an offscreen canvas and
/// encodes the result as PNG.
pub struct CanvasCompositor {
    base: HtmlCanvasElement,
}

impl CanvasCompositor {
    #[must_use]
    pub fn new(base: HtmlCanvasElement) -> Self {
        Self { base }
    }

    fn draw(&self, snapshot: &SaveSnapshot) -> Result<HtmlCanvasElement, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let out: HtmlCanvasElement = document.create_element("canvas")?.dyn_into().map_err(JsValue::from)?;
        let width = device_px(snapshot.viewport_width, snapshot.dpr);
        let height = device_px(snapshot.viewport_height, snapshot.dpr);
        out.set_width(width);
        out.set_height(height);

        let mut ctx = context_2d(&out)?;
        ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
            &self.base,
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        )?;
        ctx.set_transform(snapshot.dpr, 0.0, 0.0, snapshot.dpr, 0.0, 0.0)?;
        render::draw_layers(&mut ctx, &snapshot.scene())?;
        Ok(out)
    }
}

#[async_trait::async_trait(?Send)]
impl Compositor for CanvasCompositor {
    async fn composite(&self, snapshot: &SaveSnapshot) -> Result<Vec<u8>, String> {
        let canvas = self.draw(snapshot).map_err(js_error)?;
        let blob = JsFuture::from(to_blob(&canvas)).await.map_err(js_error)?;
        let blob: Blob = blob.dyn_into().map_err(|_| "canvas produced no image".to_owned())?;
        let buffer = JsFuture::from(blob.array_buffer()).await.map_err(js_error)?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }
}

/// `canvas.toBlob` as a promise resolving to the PNG blob (or `null`).
fn to_blob(canvas: &HtmlCanvasElement) -> Promise {
    let canvas = canvas.clone();
    Promise::new(&mut move |resolve: Function, reject: Function| {
        let on_blob = Closure::once_into_js(move |blob: JsValue| {
            if let Err(e) = resolve.call1(&JsValue::NULL, &blob) {
                log::error!("toBlob resolve failed: {}", js_error(e));
            }
        });
        if let Err(e) = canvas.to_blob_with_type(on_blob.unchecked_ref(), PNG_MIME) {
            if let Err(e) = reject.call1(&JsValue::NULL, &e) {
                log::error!("toBlob reject failed: {}", js_error(e));
            }
        }
    })
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Backing-buffer size in device pixels for a CSS length.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn device_px(css: f64, dpr: f64) -> u32 {
    let px = (css * dpr).round();
    if px.is_finite() && px > 0.0 { px.min(f64::from(u32::MAX)) as u32 } else { 0 }
}
