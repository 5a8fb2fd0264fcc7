//! Achsenparallele Rechtecke in Weltkoordinaten (Tiles).

use glam::IVec2;

/// Rechteck mit inklusiven Min/Max-Grenzen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorldRect {
    pub min: IVec2,
    pub max: IVec2,
}

impl WorldRect {
    /// Erstellt ein Rechteck aus zwei Eckpunkten (in beliebiger Reihenfolge).
    pub fn new(a: IVec2, b: IVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Rechteck um einen Mittelpunkt mit gegebener Kantenlänge.
    pub fn centered(center: IVec2, size: i32) -> Self {
        let half = size / 2;
        Self {
            min: center - IVec2::splat(half),
            max: center + IVec2::splat(size - half),
        }
    }

    /// Min/Max-Ausdehnung einer Punktmenge. `None` bei leerer Menge.
    pub fn from_points(points: &[IVec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut rect = Self::new(*first, *first);
        for p in rest {
            rect.min = rect.min.min(*p);
            rect.max = rect.max.max(*p);
        }
        Some(rect)
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Prüft, ob sich zwei Rechtecke überlappen (Kanten zählen mit).
    pub fn intersects(&self, other: &WorldRect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    pub fn contains(&self, p: IVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_min_max() {
        let rect = WorldRect::from_points(&[
            IVec2::new(10, 40),
            IVec2::new(-5, 12),
            IVec2::new(30, 20),
        ])
        .unwrap();
        assert_eq!(rect.min, IVec2::new(-5, 12));
        assert_eq!(rect.max, IVec2::new(30, 40));
        assert!(WorldRect::from_points(&[]).is_none());
    }

    #[test]
    fn test_intersects_including_edges() {
        let a = WorldRect::new(IVec2::ZERO, IVec2::new(10, 10));
        assert!(a.intersects(&WorldRect::new(IVec2::new(10, 10), IVec2::new(20, 20))));
        assert!(a.intersects(&WorldRect::new(IVec2::new(2, 2), IVec2::new(3, 3))));
        assert!(!a.intersects(&WorldRect::new(IVec2::new(11, 0), IVec2::new(20, 5))));
        assert!(!a.intersects(&WorldRect::new(IVec2::new(0, -9), IVec2::new(5, -1))));
    }

    #[test]
    fn test_centered_rect() {
        let rect = WorldRect::centered(IVec2::new(100, 100), 50);
        assert_eq!(rect.min, IVec2::new(75, 75));
        assert_eq!(rect.max, IVec2::new(125, 125));
        assert!(rect.contains(IVec2::new(100, 125)));
        assert!(!rect.contains(IVec2::new(126, 100)));
    }
}
