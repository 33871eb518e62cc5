//! Arc geometry for curved front text
//!
//! Arced text sits on a circular arc of fixed radius spanning a fixed chord
//! around the text anchor. `Up` bulges towards the collar, `Down` towards the
//! hem. Only the glyph baseline is transformed; glyph shapes are untouched.

use serde::Serialize;

use crate::domain::ArcMode;

/// Radius of the text arc in viewbox units
pub const ARC_RADIUS: f64 = 180.0;

/// Half the chord between the arc's end points
pub const ARC_HALF_SPAN: f64 = 80.0;

/// Vertical distance from the text anchor to the chord
pub const ARC_CHORD_OFFSET: f64 = 20.0;

/// A circular arc in viewbox coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcPath {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub radius: f64,
    pub mode: ArcMode,
}

impl ArcPath {
    /// Arc centred on `anchor` (viewbox coordinates); `None` for straight text
    pub fn new(anchor: (f64, f64), mode: ArcMode) -> Option<Self> {
        let chord_y = match mode {
            ArcMode::None => return None,
            ArcMode::Up => anchor.1 + ARC_CHORD_OFFSET,
            ArcMode::Down => anchor.1 - ARC_CHORD_OFFSET,
        };

        Some(ArcPath {
            start: (anchor.0 - ARC_HALF_SPAN, chord_y),
            end: (anchor.0 + ARC_HALF_SPAN, chord_y),
            radius: ARC_RADIUS,
            mode,
        })
    }

    /// SVG path data (`M .. A ..`)
    pub fn svg_d(&self) -> String {
        let sweep = if self.mode == ArcMode::Up { 1 } else { 0 };
        format!(
            "M {:.2},{:.2} A {r:.2},{r:.2} 0 0 {sweep} {:.2},{:.2}",
            self.start.0,
            self.start.1,
            self.end.0,
            self.end.1,
            r = self.radius,
            sweep = sweep,
        )
    }

    fn half_chord(&self) -> f64 {
        (self.end.0 - self.start.0) / 2.0
    }

    /// Distance from the circle centre to the chord
    fn center_offset(&self) -> f64 {
        let h = self.half_chord();
        (self.radius * self.radius - h * h).max(0.0).sqrt()
    }

    /// Centre of the circle the arc lies on
    pub fn center(&self) -> (f64, f64) {
        let cx = (self.start.0 + self.end.0) / 2.0;
        let d = self.center_offset();
        match self.mode {
            ArcMode::Down => (cx, self.start.1 - d),
            _ => (cx, self.start.1 + d),
        }
    }

    /// Half the angle subtended by the arc, in radians
    pub fn half_angle(&self) -> f64 {
        (self.half_chord() / self.radius).clamp(-1.0, 1.0).asin()
    }

    /// Point on the arc for `t` in [0, 1] from start to end
    pub fn point_at(&self, t: f64) -> (f64, f64) {
        let alpha = self.half_angle();
        let theta = -alpha + 2.0 * alpha * t.clamp(0.0, 1.0);
        let (cx, cy) = self.center();
        let x = cx + self.radius * theta.sin();
        match self.mode {
            ArcMode::Down => (x, cy + self.radius * theta.cos()),
            _ => (x, cy - self.radius * theta.cos()),
        }
    }

    /// Midpoint of the arc
    pub fn apex(&self) -> (f64, f64) {
        self.point_at(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
    }

    #[test]
    fn test_straight_text_has_no_arc() {
        assert!(ArcPath::new((100.0, 126.0), ArcMode::None).is_none());
    }

    #[test]
    fn test_up_arc_bulges_towards_collar() {
        let arc = ArcPath::new((100.0, 126.0), ArcMode::Up).unwrap();
        let apex = arc.apex();
        assert!(apex.1 < arc.start.1);
        assert!((apex.0 - 100.0).abs() < 1e-9);
        assert!(arc.svg_d().contains(" 0 0 1 "));
    }

    #[test]
    fn test_down_arc_bulges_towards_hem() {
        let arc = ArcPath::new((100.0, 126.0), ArcMode::Down).unwrap();
        assert!(arc.apex().1 > arc.start.1);
        assert!(arc.svg_d().contains(" 0 0 0 "));
    }

    #[test]
    fn test_end_points_lie_on_circle() {
        for mode in [ArcMode::Up, ArcMode::Down] {
            let arc = ArcPath::new((80.0, 90.0), mode).unwrap();
            let center = arc.center();
            assert!((distance(center, arc.start) - ARC_RADIUS).abs() < 1e-6);
            assert!((distance(center, arc.end) - ARC_RADIUS).abs() < 1e-6);

            let p0 = arc.point_at(0.0);
            assert!((p0.0 - arc.start.0).abs() < 1e-6);
            assert!((p0.1 - arc.start.1).abs() < 1e-6);
        }
    }

    #[test]
    fn test_points_follow_the_arc() {
        for mode in [ArcMode::Up, ArcMode::Down] {
            let arc = ArcPath::new((100.0, 126.0), mode).unwrap();
            let center = arc.center();
            for t in [0.1, 0.25, 0.5, 0.75, 0.9] {
                assert!((distance(center, arc.point_at(t)) - ARC_RADIUS).abs() < 1e-6);
            }

            // Symmetric about the anchor's vertical
            let left = arc.point_at(0.25);
            let right = arc.point_at(0.75);
            assert!((left.0 + right.0 - 200.0).abs() < 1e-9);
            assert!((left.1 - right.1).abs() < 1e-9);
        }
    }

    #[test]
    fn test_point_at_clamps_parameter() {
        let arc = ArcPath::new((100.0, 126.0), ArcMode::Down).unwrap();
        assert_eq!(arc.point_at(-1.0), arc.point_at(0.0));
        assert_eq!(arc.point_at(2.0), arc.point_at(1.0));
        let end = arc.point_at(1.0);
        assert!((end.0 - arc.end.0).abs() < 1e-6);
        assert!((end.1 - arc.end.1).abs() < 1e-6);
    }
}
