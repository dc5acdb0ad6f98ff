//! Viewport-fit and circular-clip geometry.
//!
//! Everything here is pure: functions compute a list of [`DrawOp`]s for a
//! target surface and a [`Surface`] implementation replays them. The raster
//! itself is owned by the surface, so ops only name source rectangles.

use crate::error::DomainError;
use glam::DVec2;
use serde::Serialize;
use smallvec::SmallVec;

/// Integer sub-rectangle of the source image, in source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SourceRect {
    pub sx: u32,
    pub sy: u32,
    pub sw: u32,
    pub sh: u32,
}

impl SourceRect {
    pub const fn full(width: u32, height: u32) -> Self {
        Self {
            sx: 0,
            sy: 0,
            sw: width,
            sh: height,
        }
    }

    /// Width over height. Fails instead of dividing by zero.
    pub fn aspect(&self) -> Result<f64, DomainError> {
        if self.sh == 0 {
            return Err(DomainError::ZeroHeightSource);
        }
        if self.sw == 0 {
            return Err(DomainError::ZeroAreaSource {
                sw: self.sw,
                sh: self.sh,
            });
        }
        Ok(self.sw as f64 / self.sh as f64)
    }

    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.sw > 0
            && self.sh > 0
            && self.sx as u64 + self.sw as u64 <= width as u64
            && self.sy as u64 + self.sh as u64 <= height as u64
    }
}

/// Destination rectangle on the target surface, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DestRect {
    pub dx: f64,
    pub dy: f64,
    pub dw: f64,
    pub dh: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.distance(self.center) <= self.radius
    }
}

/// Scaling strategy when the source and target aspects differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fit {
    /// Fill the target entirely, cropping the overflowing dimension.
    Cover,
    /// Show the whole source, leaving empty margins.
    Contain,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Wipe the whole surface.
    Clear { width: f64, height: f64 },
    Save,
    Restore,
    /// Intersect the clip region with a circle.
    ClipCircle(Circle),
    /// Draw `src` of the surface's source image into `dst`.
    Image { src: SourceRect, dst: DestRect },
    /// Filled dot.
    Marker { center: DVec2, radius: f64 },
    /// Stroked closed path through `vertices` in order.
    Polygon { vertices: SmallVec<[DVec2; 3]> },
}

/// Anything the engine can paint into: a browser canvas, or a recorder in tests.
pub trait Surface {
    fn size(&self) -> (u32, u32);
    fn draw(&mut self, ops: &[DrawOp]);
}

#[inline]
fn check_surface(width: u32, height: u32) -> Result<(), DomainError> {
    if width == 0 || height == 0 {
        return Err(DomainError::EmptySurface { width, height });
    }
    Ok(())
}

/// Circle inscribed in a `width` x `height` surface.
#[inline]
pub fn inscribed_circle(width: f64, height: f64) -> Circle {
    Circle {
        center: DVec2::new(width / 2.0, height / 2.0),
        radius: width.min(height) / 2.0,
    }
}

/// Centered destination rectangle for `src` on the target, per `fit`.
pub fn fit_rect(
    fit: Fit,
    target_w: u32,
    target_h: u32,
    src: SourceRect,
) -> Result<DestRect, DomainError> {
    check_surface(target_w, target_h)?;
    let src_aspect = src.aspect()?;
    let (w, h) = (target_w as f64, target_h as f64);
    let target_aspect = w / h;
    let wider = src_aspect > target_aspect;
    let (dw, dh) = match (fit, wider) {
        // cover: the narrow side matches, the other overflows
        (Fit::Cover, true) => (h * src_aspect, h),
        (Fit::Cover, false) => (w, w / src_aspect),
        // contain: the wide side matches, the other shrinks
        (Fit::Contain, true) => (w, w / src_aspect),
        (Fit::Contain, false) => (h * src_aspect, h),
    };
    Ok(DestRect {
        dx: (w - dw) / 2.0,
        dy: (h - dh) / 2.0,
        dw,
        dh,
    })
}

/// Cover-fit `src` into the inscribed circle of the target. The ops start
/// with a full clear so the previous frame is overwritten entirely.
pub fn fit_clip(target_w: u32, target_h: u32, src: SourceRect) -> Result<Vec<DrawOp>, DomainError> {
    let dst = fit_rect(Fit::Cover, target_w, target_h, src)?;
    let (w, h) = (target_w as f64, target_h as f64);
    Ok(vec![
        DrawOp::Clear {
            width: w,
            height: h,
        },
        DrawOp::Save,
        DrawOp::ClipCircle(inscribed_circle(w, h)),
        DrawOp::Image { src, dst },
        DrawOp::Restore,
    ])
}

/// Letterbox `src` into the target without clipping. Used for the
/// hemisphere-choice previews.
pub fn fit_contain(
    target_w: u32,
    target_h: u32,
    src: SourceRect,
) -> Result<Vec<DrawOp>, DomainError> {
    let dst = fit_rect(Fit::Contain, target_w, target_h, src)?;
    Ok(vec![
        DrawOp::Clear {
            width: target_w as f64,
            height: target_h as f64,
        },
        DrawOp::Save,
        DrawOp::Image { src, dst },
        DrawOp::Restore,
    ])
}

pub fn pixel_to_normalized(p: DVec2, width: u32, height: u32) -> Result<DVec2, DomainError> {
    check_surface(width, height)?;
    Ok(p / DVec2::new(width as f64, height as f64))
}

pub fn normalized_to_pixel(n: DVec2, width: u32, height: u32) -> Result<DVec2, DomainError> {
    check_surface(width, height)?;
    Ok(n * DVec2::new(width as f64, height as f64))
}

/// Cover-fit `src` into `surface`. On error nothing is drawn.
pub fn paint_clip(surface: &mut impl Surface, src: SourceRect) -> Result<(), DomainError> {
    let (w, h) = surface.size();
    let ops = fit_clip(w, h, src)?;
    surface.draw(&ops);
    Ok(())
}

/// Contain-fit `src` into `surface`. On error nothing is drawn.
pub fn paint_contain(surface: &mut impl Surface, src: SourceRect) -> Result<(), DomainError> {
    let (w, h) = surface.size();
    let ops = fit_contain(w, h, src)?;
    surface.draw(&ops);
    Ok(())
}

/// Records ops instead of rasterising them.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw(&mut self, ops: &[DrawOp]) {
        self.ops.extend_from_slice(ops);
    }
}
