//! Rendering: draws the board background to a 2D context.
//!
//! The background is a three-level grid (fine, coarse, extra coarse) plus the
//! snap guides of the gesture in progress. Everything drawn is a pure function
//! of the camera and the guides: [`grid_layers`] and [`line_positions`] do the
//! math and are tested natively, while [`draw`] is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`].
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Camera;
use crate::consts::{COARSE_GRID_FACTOR, EXTRA_COARSE_GRID_FACTOR, EXTRA_COARSE_ZOOM, GRID_SIZE, MIN_GRID_SPACING_PX};
use crate::snap::GridLines;

/// On-screen spacing over which a layer fades from invisible to full opacity.
const GRID_FADE_SPAN_PX: f64 = 16.0;

/// Upper bound on grid line width in CSS pixels.
const MAX_GRID_LINE_WIDTH: f64 = 2.0;

/// Guide dash segment length in screen pixels.
const GUIDE_DASH_PX: f64 = 6.0;

const GRID_RGB: &str = "100, 116, 139";
const GUIDE_COLOR: &str = "#3b82f6";

/// Which level of the grid a layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLevel {
    Fine,
    Coarse,
    ExtraCoarse,
}

impl GridLevel {
    fn world_spacing(self) -> f64 {
        match self {
            Self::Fine => GRID_SIZE,
            Self::Coarse => GRID_SIZE * COARSE_GRID_FACTOR,
            Self::ExtraCoarse => GRID_SIZE * EXTRA_COARSE_GRID_FACTOR,
        }
    }

    fn max_alpha(self) -> f64 {
        match self {
            Self::Fine => 0.08,
            Self::Coarse => 0.16,
            Self::ExtraCoarse => 0.24,
        }
    }

    fn base_line_width(self) -> f64 {
        match self {
            Self::Fine => 0.5,
            Self::Coarse => 1.0,
            Self::ExtraCoarse => 1.5,
        }
    }
}

/// One set of evenly spaced grid lines, in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayer {
    pub level: GridLevel,
    /// Distance between adjacent lines in CSS pixels.
    pub spacing_px: f64,
    /// Screen x of the first vertical line, in `[0, spacing_px)`.
    pub offset_x: f64,
    /// Screen y of the first horizontal line, in `[0, spacing_px)`.
    pub offset_y: f64,
    pub alpha: f64,
    pub line_width: f64,
}

/// Grid layers visible under `camera`, finest first.
#[must_use]
pub fn grid_layers(camera: &Camera) -> Vec<GridLayer> {
    let mut levels = vec![GridLevel::Fine, GridLevel::Coarse];
    if camera.zoom < EXTRA_COARSE_ZOOM {
        levels.push(GridLevel::ExtraCoarse);
    }

    levels
        .into_iter()
        .filter_map(|level| {
            let spacing_px = level.world_spacing() * camera.zoom;
            if !spacing_px.is_finite() || spacing_px < MIN_GRID_SPACING_PX {
                return None;
            }
            let fade = ((spacing_px - MIN_GRID_SPACING_PX) / GRID_FADE_SPAN_PX).clamp(0.0, 1.0);
            let base = level.base_line_width();
            Some(GridLayer {
                level,
                spacing_px,
                offset_x: camera.pan_x.rem_euclid(spacing_px),
                offset_y: camera.pan_y.rem_euclid(spacing_px),
                alpha: level.max_alpha() * fade,
                line_width: (base * camera.zoom).clamp(base * 0.5, MAX_GRID_LINE_WIDTH),
            })
        })
        .collect()
}

/// Screen positions of lines starting at `offset`, every `spacing`, up to `extent`.
#[must_use]
pub fn line_positions(offset: f64, spacing: f64, extent: f64) -> Vec<f64> {
    if !(spacing.is_finite() && spacing > 0.0) || !offset.is_finite() {
        return Vec::new();
    }
    let mut positions = Vec::new();
    let mut pos = offset;
    while pos <= extent {
        positions.push(pos);
        pos += spacing;
    }
    positions
}

/// Clear the canvas and draw the grid and active guides.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    camera: &Camera,
    guides: &GridLines,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);

    for layer in grid_layers(camera) {
        draw_layer(ctx, &layer, viewport_w, viewport_h);
    }

    if guides.is_active() {
        draw_guides(ctx, camera, guides, viewport_w, viewport_h)?;
    }
    Ok(())
}

fn draw_layer(ctx: &CanvasRenderingContext2d, layer: &GridLayer, viewport_w: f64, viewport_h: f64) {
    if layer.alpha <= 0.0 {
        return;
    }
    ctx.set_stroke_style_str(&format!("rgba({GRID_RGB}, {:.3})", layer.alpha));
    ctx.set_line_width(layer.line_width);
    ctx.begin_path();
    for x in line_positions(layer.offset_x, layer.spacing_px, viewport_w) {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, viewport_h);
    }
    for y in line_positions(layer.offset_y, layer.spacing_px, viewport_h) {
        ctx.move_to(0.0, y);
        ctx.line_to(viewport_w, y);
    }
    ctx.stroke();
}

fn draw_guides(
    ctx: &CanvasRenderingContext2d,
    camera: &Camera,
    guides: &GridLines,
    viewport_w: f64,
    viewport_h: f64,
) -> Result<(), JsValue> {
    ctx.save();
    let dash_array = js_sys::Array::new();
    dash_array.push(&GUIDE_DASH_PX.into());
    dash_array.push(&GUIDE_DASH_PX.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.set_stroke_style_str(GUIDE_COLOR);
    ctx.set_line_width(1.0);

    ctx.begin_path();
    if let Some(world_x) = guides.vertical {
        let x = world_x * camera.zoom + camera.pan_x;
        ctx.move_to(x, 0.0);
        ctx.line_to(x, viewport_h);
    }
    if let Some(world_y) = guides.horizontal {
        let y = world_y * camera.zoom + camera.pan_y;
        ctx.move_to(0.0, y);
        ctx.line_to(viewport_w, y);
    }
    ctx.stroke();

    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}
