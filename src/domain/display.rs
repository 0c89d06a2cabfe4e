// Display conventions for rendered values

/// Invert a meteorological "coming-from" bearing into the "going-to"
/// bearing used by arrow glyphs. Applies wherever a direction is
/// rendered: tooltip, marker row, detail panel.
pub fn rotate_bearing(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0)
}

/// Y-axis label formatting: two decimal places, or an empty label when
/// there is nothing to show.
pub fn axis_label(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{:.2}", v),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_bearing() {
        assert_eq!(rotate_bearing(0.0), 180.0);
        assert_eq!(rotate_bearing(270.0), 90.0);
        assert_eq!(rotate_bearing(359.0), 179.0);
    }

    #[test]
    fn test_rotate_bearing_is_involution_mod_360() {
        for deg in [0.0, 45.0, 90.0, 179.5, 180.0, 270.0, 359.0, 720.0, -90.0] {
            let twice = rotate_bearing(rotate_bearing(deg));
            assert_eq!(twice, deg.rem_euclid(360.0), "deg = {}", deg);
        }
    }

    #[test]
    fn test_axis_label() {
        assert_eq!(axis_label(Some(3.0)), "3.00");
        assert_eq!(axis_label(Some(0.1)), "0.10");
        assert_eq!(axis_label(Some(f64::NAN)), "");
        assert_eq!(axis_label(None), "");
    }
}
