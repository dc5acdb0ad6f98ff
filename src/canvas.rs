use skycal_core::constants::{OVERLAY_COLOR, OVERLAY_LINE_WIDTH_PX};
use skycal_core::geometry::{self, DrawOp, SourceRect, Surface};
use skycal_core::points;
use skycal_core::CalibrationPoint;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A 2D canvas replaying engine draw ops, with the decoded upload as the
/// image source.
pub struct CanvasSurface<'a> {
    canvas: &'a web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    image: Option<&'a web::HtmlImageElement>,
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<web::CanvasRenderingContext2d>().ok())
}

impl<'a> CanvasSurface<'a> {
    pub fn new(
        canvas: &'a web::HtmlCanvasElement,
        image: Option<&'a web::HtmlImageElement>,
    ) -> Option<Self> {
        let ctx = context_2d(canvas)?;
        Some(Self { canvas, ctx, image })
    }

    fn op(&self, op: &DrawOp) {
        let ctx = &self.ctx;
        match op {
            DrawOp::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
            DrawOp::Save => ctx.save(),
            DrawOp::Restore => ctx.restore(),
            DrawOp::ClipCircle(c) => {
                ctx.begin_path();
                _ = ctx.arc(c.center.x, c.center.y, c.radius, 0.0, TAU);
                ctx.close_path();
                ctx.clip();
            }
            DrawOp::Image { src, dst } => {
                let Some(img) = self.image else { return };
                if let Err(e) = ctx
                    .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                        img,
                        src.sx as f64,
                        src.sy as f64,
                        src.sw as f64,
                        src.sh as f64,
                        dst.dx,
                        dst.dy,
                        dst.dw,
                        dst.dh,
                    )
                {
                    log::warn!("[canvas] drawImage failed: {:?}", e);
                }
            }
            DrawOp::Marker { center, radius } => {
                ctx.set_fill_style_str(OVERLAY_COLOR);
                ctx.begin_path();
                _ = ctx.arc(center.x, center.y, *radius, 0.0, TAU);
                ctx.fill();
            }
            DrawOp::Polygon { vertices } => {
                let Some((first, rest)) = vertices.split_first() else {
                    return;
                };
                ctx.set_stroke_style_str(OVERLAY_COLOR);
                ctx.set_line_width(OVERLAY_LINE_WIDTH_PX);
                ctx.begin_path();
                ctx.move_to(first.x, first.y);
                for v in rest {
                    ctx.line_to(v.x, v.y);
                }
                ctx.close_path();
                ctx.stroke();
            }
        }
    }
}

impl Surface for CanvasSurface<'_> {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn draw(&mut self, ops: &[DrawOp]) {
        for op in ops {
            self.op(op);
        }
    }
}

/// Cover-fit the selection into a circular preview.
pub fn paint_preview(
    canvas: &web::HtmlCanvasElement,
    image: Option<&web::HtmlImageElement>,
    rect: SourceRect,
) {
    let Some(mut surface) = CanvasSurface::new(canvas, image) else {
        return;
    };
    if let Err(e) = geometry::paint_clip(&mut surface, rect) {
        log::warn!("[canvas] preview skipped: {}", e);
    }
}

/// Preview plus the collected points on top.
pub fn paint_aperture(
    canvas: &web::HtmlCanvasElement,
    image: Option<&web::HtmlImageElement>,
    rect: Option<SourceRect>,
    pts: &[CalibrationPoint],
) {
    let Some(mut surface) = CanvasSurface::new(canvas, image) else {
        return;
    };
    let (w, h) = surface.size();
    if let Some(rect) = rect {
        if let Err(e) = geometry::paint_clip(&mut surface, rect) {
            log::warn!("[canvas] aperture preview skipped: {}", e);
        }
    } else {
        surface.draw(&[DrawOp::Clear {
            width: w as f64,
            height: h as f64,
        }]);
    }
    match points::overlay(pts, w, h) {
        Ok(ops) => surface.draw(&ops),
        Err(e) => log::warn!("[canvas] overlay skipped: {}", e),
    }
}

pub fn paint_ops(
    canvas: &web::HtmlCanvasElement,
    image: Option<&web::HtmlImageElement>,
    ops: &[DrawOp],
) {
    if let Some(mut surface) = CanvasSurface::new(canvas, image) {
        surface.draw(ops);
    }
}

pub fn clear(canvas: &web::HtmlCanvasElement) {
    paint_ops(
        canvas,
        None,
        &[DrawOp::Clear {
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        }],
    );
}
