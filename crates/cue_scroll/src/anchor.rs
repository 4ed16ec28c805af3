//! Threshold anchors
//!
//! An anchor pairs an element-relative edge with a viewport-relative
//! fraction: `"top 80%"` means "the target's top edge reaches the line 80%
//! down the viewport". Anchors resolve to a document scroll position given
//! the target's current bounds, and are re-resolved on every evaluation so
//! resizes are picked up without any cache invalidation.

use cue_core::{ConfigError, Rect};

/// Which edge of the target element the anchor tracks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementEdge {
    Top,
    Center,
    Bottom,
}

/// An (element edge, viewport fraction) threshold pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub edge: ElementEdge,
    /// 0.0 = viewport top, 1.0 = viewport bottom
    pub viewport_fraction: f32,
}

impl Anchor {
    pub fn new(edge: ElementEdge, viewport_fraction: f32) -> Self {
        Self {
            edge,
            viewport_fraction,
        }
    }

    /// Parse the `"<edge> <line>"` string form
    ///
    /// Edge is `top`, `center`, or `bottom`. Line is a percentage
    /// (`"80%"`) or one of the same three keywords (`top` = 0%, `center` =
    /// 50%, `bottom` = 100%).
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let malformed = || ConfigError::MalformedAnchor(s.to_string());

        let mut parts = s.split_whitespace();
        let edge = match parts.next().ok_or_else(malformed)? {
            "top" => ElementEdge::Top,
            "center" => ElementEdge::Center,
            "bottom" => ElementEdge::Bottom,
            _ => return Err(malformed()),
        };
        let line = parts.next().ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }

        let viewport_fraction = match line {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            pct => {
                let digits = pct.strip_suffix('%').ok_or_else(malformed)?;
                let value: f32 = digits.parse().map_err(|_| malformed())?;
                if !(0.0..=100.0).contains(&value) {
                    return Err(malformed());
                }
                value / 100.0
            }
        };

        Ok(Self {
            edge,
            viewport_fraction,
        })
    }

    /// The scroll offset at which this anchor's lines coincide
    ///
    /// Scrolling past the returned value puts the element edge above the
    /// viewport line.
    pub fn threshold(&self, bounds: &Rect, viewport_height: f32) -> f32 {
        let edge_y = match self.edge {
            ElementEdge::Top => bounds.top(),
            ElementEdge::Center => bounds.center_y(),
            ElementEdge::Bottom => bounds.bottom(),
        };
        edge_y - self.viewport_fraction * viewport_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent_forms() {
        assert_eq!(
            Anchor::parse("top 80%"),
            Ok(Anchor::new(ElementEdge::Top, 0.8))
        );
        assert_eq!(
            Anchor::parse("bottom 20%"),
            Ok(Anchor::new(ElementEdge::Bottom, 0.2))
        );
        assert_eq!(
            Anchor::parse("center center"),
            Ok(Anchor::new(ElementEdge::Center, 0.5))
        );
        assert_eq!(
            Anchor::parse("bottom top"),
            Ok(Anchor::new(ElementEdge::Bottom, 0.0))
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "top", "left 80%", "top eighty", "top 80% extra", "top 180%"] {
            assert!(matches!(
                Anchor::parse(bad),
                Err(ConfigError::MalformedAnchor(_))
            ));
        }
    }

    #[test]
    fn test_threshold_math() {
        // Element top at y=2000, viewport 1000 tall, line at 80%:
        // the top edge hits the 80% line once we scroll past 1200
        let bounds = Rect::new(0.0, 2000.0, 800.0, 600.0);
        let anchor = Anchor::parse("top 80%").unwrap();
        assert_eq!(anchor.threshold(&bounds, 1000.0), 1200.0);

        // Bottom edge at the viewport top: scrolled fully past at 2600
        let anchor = Anchor::parse("bottom top").unwrap();
        assert_eq!(anchor.threshold(&bounds, 1000.0), 2600.0);
    }

    #[test]
    fn test_threshold_tracks_viewport_resizes() {
        let bounds = Rect::new(0.0, 2000.0, 800.0, 600.0);
        let anchor = Anchor::parse("top 80%").unwrap();
        let before = anchor.threshold(&bounds, 1000.0);
        let after = anchor.threshold(&bounds, 500.0);
        assert_ne!(before, after);
    }
}
