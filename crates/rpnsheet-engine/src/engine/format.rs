/// Format a number for display.
///
/// Integral values print without a fractional part (`4`, not `4.0`); other
/// values use the shortest representation that round-trips.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else if n == f64::INFINITY {
        "inf".to_string()
    } else if n == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if n == 0.0 {
        // also covers -0.0
        "0".to_string()
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}
