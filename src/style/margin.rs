//! Page margins.
//!
//! Margins are stored in points (1 inch = 72 points, 1 cm = 28.35 points).

use crate::error::{Error, Result};
use serde::Serialize;

/// Points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Points per centimeter.
pub const POINTS_PER_CM: f32 = 28.35;

/// Largest accepted margin in points (roughly 10.6 cm).
pub const MAX_MARGIN: f32 = 300.0;

/// Page margins in points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarginSet {
    top: f32,
    bottom: f32,
    left: f32,
    right: f32,
}

impl MarginSet {
    /// Create margins in points. Each value must be in `[0, 300]`.
    pub fn new(top: f32, bottom: f32, left: f32, right: f32) -> Result<Self> {
        check_margin("top", top)?;
        check_margin("bottom", bottom)?;
        check_margin("left", left)?;
        check_margin("right", right)?;
        Ok(Self {
            top,
            bottom,
            left,
            right,
        })
    }

    /// Same margin on all four sides.
    pub fn uniform(points: f32) -> Result<Self> {
        Self::new(points, points, points, points)
    }

    /// Create margins from inches.
    pub fn from_inches(top: f32, bottom: f32, left: f32, right: f32) -> Result<Self> {
        Self::new(
            top * POINTS_PER_INCH,
            bottom * POINTS_PER_INCH,
            left * POINTS_PER_INCH,
            right * POINTS_PER_INCH,
        )
    }

    /// Create margins from centimeters.
    pub fn from_cm(top: f32, bottom: f32, left: f32, right: f32) -> Result<Self> {
        Self::new(
            top * POINTS_PER_CM,
            bottom * POINTS_PER_CM,
            left * POINTS_PER_CM,
            right * POINTS_PER_CM,
        )
    }

    /// Copy with some sides replaced. `None` keeps the current value.
    pub fn with_sides(
        &self,
        top: Option<f32>,
        bottom: Option<f32>,
        left: Option<f32>,
        right: Option<f32>,
    ) -> Result<Self> {
        Self::new(
            top.unwrap_or(self.top),
            bottom.unwrap_or(self.bottom),
            left.unwrap_or(self.left),
            right.unwrap_or(self.right),
        )
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    /// Combined left and right margin.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Combined top and bottom margin.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl Default for MarginSet {
    fn default() -> Self {
        Self {
            top: POINTS_PER_INCH,
            bottom: POINTS_PER_INCH,
            left: POINTS_PER_INCH,
            right: POINTS_PER_INCH,
        }
    }
}

fn check_margin(field: &str, value: f32) -> Result<()> {
    if (0.0..=MAX_MARGIN).contains(&value) {
        Ok(())
    } else {
        Err(Error::validation(
            field,
            value,
            "margin must be between 0 and 300 points",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_bounds() {
        assert!(MarginSet::new(0.0, 0.0, 0.0, 0.0).is_ok());
        assert!(MarginSet::new(300.0, 300.0, 300.0, 300.0).is_ok());
        assert!(MarginSet::new(-0.1, 0.0, 0.0, 0.0).is_err());
        assert!(MarginSet::new(0.0, 0.0, 0.0, 300.5).is_err());
        assert!(MarginSet::new(f32::NAN, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_margin_error_names_side() {
        let err = MarginSet::new(10.0, 10.0, -5.0, 10.0).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "left"));
    }

    #[test]
    fn test_from_inches() {
        let m = MarginSet::from_inches(1.0, 1.0, 1.25, 1.25).unwrap();
        assert_eq!(m.top(), 72.0);
        assert_eq!(m.left(), 90.0);
    }

    #[test]
    fn test_from_cm() {
        let m = MarginSet::from_cm(2.0, 2.0, 2.0, 2.0).unwrap();
        assert!((m.top() - 56.7).abs() < 1e-3);
    }

    #[test]
    fn test_conversion_goes_through_validation() {
        // 5 inches = 360pt, above the limit
        assert!(MarginSet::from_inches(5.0, 1.0, 1.0, 1.0).is_err());
        assert!(MarginSet::from_cm(1.0, 1.0, -1.0, 1.0).is_err());
    }

    #[test]
    fn test_with_sides() {
        let base = MarginSet::default();
        let m = base.with_sides(Some(20.0), None, None, Some(10.0)).unwrap();
        assert_eq!(m.top(), 20.0);
        assert_eq!(m.bottom(), 72.0);
        assert_eq!(m.right(), 10.0);
        assert_eq!(m.horizontal(), 82.0);
    }
}
