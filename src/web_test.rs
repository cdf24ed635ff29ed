use super::*;

// =============================================================
// device_px
// =============================================================

#[test]
fn device_px_scales_by_dpr() {
    assert_eq!(device_px(800.0, 2.0), 1600);
    assert_eq!(device_px(333.0, 1.5), 500);
}

#[test]
fn device_px_rounds() {
    assert_eq!(device_px(100.4, 1.0), 100);
    assert_eq!(device_px(100.5, 1.0), 101);
}

#[test]
fn device_px_clamps_degenerate_input() {
    assert_eq!(device_px(-10.0, 1.0), 0);
    assert_eq!(device_px(f64::NAN, 1.0), 0);
    assert_eq!(device_px(f64::INFINITY, 1.0), 0);
}
