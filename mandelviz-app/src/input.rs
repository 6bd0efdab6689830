//! Parsing for the user-editable text fields.

use mandelviz_core::{Viewport, MAX_DEPTH};

use crate::error::AppError;

/// Parse the depth text field into a validated iteration count.
///
/// Anything that is not an integer in `[1, MAX_DEPTH]` comes back as
/// `DepthOutOfRange` with the offending text, so the caller can show it and
/// leave the field's last committed value alone.
pub fn parse_depth(text: &str) -> Result<u32, AppError> {
    let out_of_range = || AppError::DepthOutOfRange {
        value: text.trim().to_string(),
        max: MAX_DEPTH,
    };
    let value: u32 = text.trim().parse().map_err(|_| out_of_range())?;
    if value < 1 || value > MAX_DEPTH {
        return Err(out_of_range());
    }
    Ok(value)
}

/// Parse the bounds text field into a viewport.
///
/// Delegates to `Viewport::from_str` and collapses every failure mode into
/// the single "Invalid dimensions" message the status line shows.
pub fn parse_bounds(text: &str) -> Result<Viewport, AppError> {
    text.parse().map_err(|_| AppError::InvalidDimensions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_in_range_accepted() {
        assert_eq!(parse_depth("1").unwrap(), 1);
        assert_eq!(parse_depth("50").unwrap(), 50);
        assert_eq!(parse_depth("1000").unwrap(), 1000);
        assert_eq!(parse_depth("  100  ").unwrap(), 100);
    }

    #[test]
    fn depth_out_of_range_rejected() {
        assert!(matches!(
            parse_depth("0"),
            Err(AppError::DepthOutOfRange { .. })
        ));
        assert!(matches!(
            parse_depth("1500"),
            Err(AppError::DepthOutOfRange { .. })
        ));
        assert!(matches!(
            parse_depth("-5"),
            Err(AppError::DepthOutOfRange { .. })
        ));
        assert!(matches!(
            parse_depth("abc"),
            Err(AppError::DepthOutOfRange { .. })
        ));
    }

    #[test]
    fn depth_error_message_names_the_range() {
        let err = parse_depth("1500").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("1500"));
        assert!(msg.contains("1000"));
    }

    #[test]
    fn bounds_accepted() {
        let vp = parse_bounds("-2.5, 1.0, -1.25, 1.25").unwrap();
        assert_eq!(vp.x_min, -2.5);
        assert_eq!(vp.y_max, 1.25);
    }

    #[test]
    fn bounds_rejected_with_fixed_message() {
        for bad in ["-2.5, 1.0", "a, b, c, d", "1, -1, 0, 1", ""] {
            let err = parse_bounds(bad).unwrap_err();
            assert_eq!(err.to_string(), "Invalid dimensions");
        }
    }
}
