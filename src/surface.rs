//! The 2D drawing surface the renderer targets.
//!
//! `Surface` is the subset of the `Canvas2D` API that [`crate::render`] uses.
//! The browser implementation forwards to
//! [`web_sys::CanvasRenderingContext2d`]; tests implement it with a recorder
//! so the pipeline can run without a browser.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// Immediate-mode 2D drawing surface.
///
/// Calls that can fail in the browser return `Result`; pure state setters
/// do not.
pub trait Surface {
    type Error;

    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), Self::Error>;
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn save(&mut self);
    fn restore(&mut self);

    fn set_global_alpha(&mut self, alpha: f64);
    fn set_stroke_style(&mut self, color: &str);
    fn set_fill_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), Self::Error>;

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), Self::Error>;
    fn stroke(&mut self);
    fn fill(&mut self);

    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: &str);
    fn set_text_baseline(&mut self, baseline: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Self::Error>;
    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Self::Error>;
}

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::set_transform(self, a, b, c, d, e, f)
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, w, h);
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        CanvasRenderingContext2d::set_global_alpha(self, alpha);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), JsValue> {
        let dash_array = js_sys::Array::new();
        for seg in segments {
            dash_array.push(&JsValue::from_f64(*seg));
        }
        CanvasRenderingContext2d::set_line_dash(self, &dash_array)
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::arc(self, x, y, radius, start, end)
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn set_font(&mut self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }

    fn set_text_align(&mut self, align: &str) {
        CanvasRenderingContext2d::set_text_align(self, align);
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        CanvasRenderingContext2d::set_text_baseline(self, baseline);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::fill_text(self, text, x, y)
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::stroke_text(self, text, x, y)
    }
}
