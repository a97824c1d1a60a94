use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, Window};
use crate::constants::{CONTAINER_ID, FALLBACK_CLASS};
use crate::error::{Result, StarfieldError};
use crate::field::{Painter, StarColor};

pub enum Mounted {
    Canvas(CanvasSurface),
    Fallback,
    AlreadyPresent,
}

pub struct CanvasSurface {
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

// Fixed behind everything, never receives input
const LAYER_STYLE: [(&str, &str); 7] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("z-index", "-1"),
    ("pointer-events", "none"),
    ("overflow", "hidden"),
];

pub fn mount(document: &Document) -> Result<Mounted> {
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.unchecked_into();
    mount_canvas(document, canvas)
}

// Falls back to the static marker when `canvas` yields no 2D context
pub fn mount_canvas(document: &Document, canvas: HtmlCanvasElement) -> Result<Mounted> {
    if document.get_element_by_id(CONTAINER_ID).is_some() {
        return Ok(Mounted::AlreadyPresent);
    }
    let body = document.body().ok_or(StarfieldError::MissingGlobal("document.body"))?;

    let container: HtmlElement = document.create_element("div")?.unchecked_into();
    container.set_id(CONTAINER_ID);
    let style = container.style();
    for (property, value) in LAYER_STYLE {
        style.set_property(property, value)?;
    }
    body.append_child(&container)?;

    canvas.style().set_property("display", "block")?;
    container.append_child(&canvas)?;

    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());

    match ctx {
        Some(ctx) => Ok(Mounted::Canvas(CanvasSurface {
            container,
            canvas,
            ctx,
            width: 0.0,
            height: 0.0,
        })),
        None => {
            let marker = document.create_element("div")?;
            marker.set_class_name(FALLBACK_CLASS);
            container.append_child(&marker)?;
            Ok(Mounted::Fallback)
        }
    }
}

// CSS pixels
pub fn page_size(window: &Window, document: &Document) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = document
        .document_element()
        .map(|e| e.scroll_height() as f64)
        .unwrap_or(0.0);
    (w, h)
}

pub fn device_pixel_ratio(window: &Window) -> f64 {
    // NaN.max(1.0) is 1.0
    window.device_pixel_ratio().max(1.0)
}

impl CanvasSurface {
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) -> Result<()> {
        self.canvas.set_width((width * dpr).floor().max(1.0) as u32);
        self.canvas.set_height((height * dpr).floor().max(1.0) as u32);
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", width))?;
        style.set_property("height", &format!("{}px", height))?;
        // Setting the size resets the context state, so the transform goes last
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn remove(&self) {
        self.container.remove();
    }
}

impl Painter for CanvasSurface {
    fn clear(&mut self, w: f64, h: f64) {
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn fill_vertical_gradient(&mut self, w: f64, h: f64, top: &str, bottom: &str) {
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        let _ = gradient.add_color_stop(0.0_f32, top);
        let _ = gradient.add_color_stop(1.0_f32, bottom);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn fill_circle(&mut self, x: f64, y: f64, r: f64, color: StarColor, alpha: f64) {
        let (red, green, blue) = color.rgb();
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(&format!("rgba({},{},{},{})", red, green, blue, alpha));
        let _ = self.ctx.arc(x, y, r, 0.0, PI * 2.0);
        self.ctx.fill();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn containers(document: &Document) -> u32 {
        document.query_selector_all(&format!("#{}", CONTAINER_ID)).unwrap().length()
    }

    #[wasm_bindgen_test]
    fn second_mount_adds_nothing() {
        let document = document();
        let first = mount(&document).unwrap();
        assert!(matches!(first, Mounted::Canvas(_)));
        assert!(matches!(mount(&document).unwrap(), Mounted::AlreadyPresent));
        assert_eq!(containers(&document), 1);

        if let Mounted::Canvas(surface) = first {
            surface.remove();
        }
        assert_eq!(containers(&document), 0);
    }

    #[wasm_bindgen_test]
    fn resize_scales_backing_buffer() {
        let document = document();
        let Mounted::Canvas(mut surface) = mount(&document).unwrap() else {
            panic!("2D canvas expected");
        };
        surface.resize(300.5, 200.0, 2.0).unwrap();
        assert_eq!(surface.canvas.width(), 601);
        assert_eq!(surface.canvas.height(), 400);
        assert_eq!(surface.canvas.style().get_property_value("width").unwrap(), "300.5px");
        assert_eq!(surface.size(), (300.5, 200.0));

        // zero-sized pages still get a 1×1 buffer
        surface.resize(0.0, 0.0, 1.0).unwrap();
        assert_eq!(surface.canvas.width(), 1);
        assert_eq!(surface.canvas.height(), 1);
        surface.remove();
    }

    #[wasm_bindgen_test]
    fn container_ignores_pointer_input() {
        let document = document();
        let Mounted::Canvas(surface) = mount(&document).unwrap() else {
            panic!("2D canvas expected");
        };
        let container: HtmlElement = document.get_element_by_id(CONTAINER_ID).unwrap().unchecked_into();
        assert_eq!(container.style().get_property_value("pointer-events").unwrap(), "none");
        assert_eq!(container.style().get_property_value("position").unwrap(), "fixed");
        surface.remove();
    }

    // A canvas already holding another context type returns null for "2d"
    fn canvas_without_2d(document: &Document) -> HtmlCanvasElement {
        let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().unchecked_into();
        let taken = canvas.get_context("bitmaprenderer").ok().flatten().is_some()
            || canvas.get_context("webgl").ok().flatten().is_some();
        assert!(taken, "browser offers neither bitmaprenderer nor webgl");
        assert!(canvas.get_context("2d").unwrap().is_none());
        canvas
    }

    #[wasm_bindgen_test]
    fn missing_2d_context_leaves_static_marker() {
        let document = document();
        let mounted = mount_canvas(&document, canvas_without_2d(&document)).unwrap();
        assert!(matches!(mounted, Mounted::Fallback));

        let container = document.get_element_by_id(CONTAINER_ID).unwrap();
        let marker = container.query_selector(&format!(".{}", FALLBACK_CLASS)).unwrap();
        assert!(marker.is_some());
        assert_eq!(containers(&document), 1);
        container.remove();
    }
}
