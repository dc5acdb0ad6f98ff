use glam::DVec2;
use skycal_core::geometry::*;
use skycal_core::DomainError;

const EPS: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

#[test]
fn cover_fit_of_wider_source_matches_height() {
    let src = SourceRect::full(2000, 1000);
    let dst = fit_rect(Fit::Cover, 300, 300, src).unwrap();
    assert!(close(dst.dh, 300.0));
    assert!(close(dst.dw, 600.0));
    // centered: overflow split evenly on both sides
    assert!(close(dst.dx, -150.0));
    assert!(close(dst.dy, 0.0));
}

#[test]
fn cover_fit_of_taller_source_matches_width() {
    let src = SourceRect::full(1000, 2000);
    let dst = fit_rect(Fit::Cover, 300, 300, src).unwrap();
    assert!(close(dst.dw, 300.0));
    assert!(close(dst.dh, 600.0));
    assert!(close(dst.dy, -150.0));
}

#[test]
fn contain_fit_leaves_margins() {
    let src = SourceRect::full(2000, 1000);
    let dst = fit_rect(Fit::Contain, 300, 300, src).unwrap();
    assert!(close(dst.dw, 300.0));
    assert!(close(dst.dh, 150.0));
    assert!(close(dst.dx, 0.0));
    assert!(close(dst.dy, 75.0));
}

#[test]
fn equal_aspects_fill_exactly() {
    let src = SourceRect { sx: 2000, sy: 0, sw: 2000, sh: 2000 };
    for fit in [Fit::Cover, Fit::Contain] {
        let dst = fit_rect(fit, 400, 400, src).unwrap();
        assert_eq!(dst, DestRect { dx: 0.0, dy: 0.0, dw: 400.0, dh: 400.0 });
    }
}

#[test]
fn cover_fit_always_covers_the_inscribed_circle() {
    let sources = [
        SourceRect::full(4000, 2000),
        SourceRect::full(3000, 2000),
        SourceRect::full(1000, 3000),
        SourceRect { sx: 10, sy: 20, sw: 7, sh: 5 },
    ];
    let targets = [(300, 300), (640, 480), (200, 500)];
    for src in sources {
        for (tw, th) in targets {
            let dst = fit_rect(Fit::Cover, tw, th, src).unwrap();
            let c = inscribed_circle(tw as f64, th as f64);
            assert!(dst.dx <= c.center.x - c.radius + EPS);
            assert!(dst.dy <= c.center.y - c.radius + EPS);
            assert!(dst.dx + dst.dw >= c.center.x + c.radius - EPS);
            assert!(dst.dy + dst.dh >= c.center.y + c.radius - EPS);
        }
    }
}

#[test]
fn zero_height_source_is_rejected() {
    let src = SourceRect { sx: 0, sy: 0, sw: 100, sh: 0 };
    assert_eq!(
        fit_rect(Fit::Cover, 300, 300, src),
        Err(DomainError::ZeroHeightSource)
    );
}

#[test]
fn empty_surface_is_rejected() {
    let src = SourceRect::full(100, 100);
    assert_eq!(
        fit_clip(0, 300, src),
        Err(DomainError::EmptySurface { width: 0, height: 300 })
    );
    assert!(pixel_to_normalized(DVec2::ONE, 10, 0).is_err());
}

#[test]
fn clip_ops_clear_then_clip_then_draw() {
    let src = SourceRect::full(3000, 2000);
    let ops = fit_clip(300, 300, src).unwrap();
    assert_eq!(ops.len(), 5);
    assert_eq!(ops[0], DrawOp::Clear { width: 300.0, height: 300.0 });
    assert_eq!(ops[1], DrawOp::Save);
    match &ops[2] {
        DrawOp::ClipCircle(c) => {
            assert_eq!(c.center, DVec2::new(150.0, 150.0));
            assert!(close(c.radius, 150.0));
        }
        other => panic!("expected clip, got {other:?}"),
    }
    assert!(matches!(ops[3], DrawOp::Image { src: s, .. } if s == src));
    assert_eq!(ops[4], DrawOp::Restore);
}

#[test]
fn inscribed_circle_uses_the_short_side() {
    let c = inscribed_circle(640.0, 480.0);
    assert_eq!(c.center, DVec2::new(320.0, 240.0));
    assert!(close(c.radius, 240.0));
    assert!(c.contains(DVec2::new(320.0, 0.0)));
    assert!(!c.contains(DVec2::new(0.0, 0.0)));
}

#[test]
fn failed_paint_leaves_surface_untouched() {
    let mut surface = RecordingSurface::new(300, 300);
    paint_clip(&mut surface, SourceRect::full(100, 100)).unwrap();
    let before = surface.ops.len();
    let bad = SourceRect { sx: 0, sy: 0, sw: 0, sh: 0 };
    assert!(paint_clip(&mut surface, bad).is_err());
    assert!(paint_contain(&mut surface, bad).is_err());
    assert_eq!(surface.ops.len(), before);
}

#[test]
fn pixel_normalization_is_relative_to_surface() {
    let n = pixel_to_normalized(DVec2::new(150.0, 75.0), 300, 300).unwrap();
    assert_eq!(n, DVec2::new(0.5, 0.25));
    let p = normalized_to_pixel(n, 600, 600).unwrap();
    assert_eq!(p, DVec2::new(300.0, 150.0));
}

#[test]
fn pixel_normalization_inverts_on_the_same_surface() {
    for (w, h) in [(300, 200), (641, 479), (300, 300)] {
        for i in 1..10 {
            for j in 1..10 {
                let p = DVec2::new(
                    w as f64 * i as f64 / 10.0 + 0.37,
                    h as f64 * j as f64 / 10.0 - 0.21,
                );
                let n = pixel_to_normalized(p, w, h).unwrap();
                assert!(n.x > 0.0 && n.x < 1.0 && n.y > 0.0 && n.y < 1.0);
                let back = normalized_to_pixel(n, w, h).unwrap();
                assert!(
                    close(back.x, p.x) && close(back.y, p.y),
                    "{p:?} on {w}x{h} came back as {back:?}"
                );
            }
        }
    }
}

#[test]
fn rect_bounds_check() {
    assert!(SourceRect::full(10, 10).is_within(10, 10));
    assert!(!SourceRect { sx: 5, sy: 0, sw: 6, sh: 10 }.is_within(10, 10));
    assert!(!SourceRect { sx: 0, sy: 0, sw: 0, sh: 10 }.is_within(10, 10));
}
