use eyeblink::model::{coverage_fraction, FALLBACK_SURFACE};
use eyeblink::{current_visual, ease_in_out, BlinkFrame, BlinkPhase, SurfaceSize};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn descent_and_ascent_mirror_each_other() {
    let surface = SurfaceSize::new(1280.0, 800.0);
    for (down, up) in [(0.4, 1.6), (0.1, 1.9), (0.75, 1.25)] {
        assert_eq!(current_visual(down, surface), current_visual(up, surface));
    }
    assert!(approx_eq(current_visual(0.4, surface).height, 320.0));
}

#[test]
fn ease_in_out_is_symmetric_and_monotonic() {
    assert!(approx_eq(ease_in_out(0.5), 0.5));
    assert!(approx_eq(ease_in_out(0.25) + ease_in_out(0.75), 1.0));
    let mut prev = 0.0;
    for i in 1..=20 {
        let v = ease_in_out(i as f64 / 20.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn ease_in_out_starts_slow() {
    // Less ground covered in the first tenth than a linear sweep would.
    assert!(ease_in_out(0.1) < 0.1);
    assert!(ease_in_out(0.9) > 0.9);
}

#[test]
fn cover_is_anchored_to_the_top_edge() {
    let surface = SurfaceSize::new(1440.0, 900.0);
    for progress in [0.1, 0.5, 1.0, 1.5, 1.9] {
        let cover = current_visual(progress, surface);
        assert_eq!(cover.x, 0.0);
        assert_eq!(cover.y, 0.0);
        assert_eq!(cover.width, 1440.0);
    }
}

#[test]
fn cover_height_follows_progress() {
    let surface = SurfaceSize::new(1440.0, 900.0);
    assert!(approx_eq(current_visual(0.5, surface).height, 450.0));
    assert!(approx_eq(current_visual(1.0, surface).height, 900.0));
    assert!(approx_eq(current_visual(1.25, surface).height, 675.0));
}

#[test]
fn cover_center_sits_halfway_down_the_cover() {
    let cover = current_visual(0.5, SurfaceSize::new(1000.0, 800.0));
    let (cx, cy) = cover.center();
    assert!(approx_eq(cx, 500.0));
    assert!(approx_eq(cy, 200.0));
}

#[test]
fn out_of_range_progress_is_clamped() {
    assert_eq!(coverage_fraction(-1.0), 0.0);
    assert_eq!(coverage_fraction(3.0), 0.0);
}

#[test]
fn idle_frame_draws_nothing() {
    let frame = BlinkFrame::idle();
    assert_eq!(frame.phase, BlinkPhase::Idle);
    assert!(!frame.is_visible());
    let (w, h) = FALLBACK_SURFACE;
    assert!(frame.cover(SurfaceSize::new(w, h)).is_empty());
}
