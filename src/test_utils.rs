use crate::geometry::MVec;

pub fn assert_float_is_close(x: f64, y: f64) {
    assert!((x - y).abs() < 10.0 * f64::EPSILON, "{} {}", x, y)
}

/// For values that went through sums of many terms in
/// different orders.
pub fn assert_float_is_close_high_error(x: f64, y: f64) {
    let scale = x.abs().max(y.abs()).max(1.0);
    assert!((x - y).abs() < 1e3 * f64::EPSILON * scale, "{} {}", x, y)
}

pub fn assert_vec_is_close(x: MVec, y: MVec) {
    assert!((x - y).length() < 10.0 * f64::EPSILON, "{} {}", x, y)
}

pub fn assert_vec_is_close_high_error(x: MVec, y: MVec) {
    assert_float_is_close_high_error(x.x, y.x);
    assert_float_is_close_high_error(x.y, y.y);
}
