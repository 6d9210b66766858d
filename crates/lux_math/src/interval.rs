/// A closed range over f32, used for ray-t windows and AABB extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Contains nothing (min > max).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// Contains every finite value.
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// The tightest interval containing both inputs.
    pub fn surrounding(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }

    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Inclusive membership test: min <= x <= max.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Exclusive membership test: min < x < max.
    ///
    /// Hit queries use this so a shrunk window never re-reports the hit
    /// sitting exactly on its boundary.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Grow by delta/2 on each side.
    pub fn expand(&self, delta: f32) -> Interval {
        let padding = delta / 2.0;
        Interval::new(self.min - padding, self.max + padding)
    }

    /// Move both endpoints by a scalar displacement.
    pub fn shift(&self, displacement: f32) -> Interval {
        Interval::new(self.min + displacement, self.max + displacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let interval = Interval::new(-2.0, 3.0);

        assert!(interval.contains(-2.0));
        assert!(interval.contains(3.0));
        assert!(interval.contains(0.0));
        assert!(!interval.contains(-2.1));
        assert!(!interval.contains(3.1));
    }

    #[test]
    fn test_surrounds_is_exclusive() {
        let interval = Interval::new(-2.0, 3.0);

        assert!(!interval.surrounds(-2.0));
        assert!(!interval.surrounds(3.0));
        assert!(interval.surrounds(0.0));
        assert!(interval.surrounds(2.999));
    }

    #[test]
    fn test_clamp() {
        let interval = Interval::new(0.0, 1.0);

        assert_eq!(interval.clamp(-0.5), 0.0);
        assert_eq!(interval.clamp(0.4), 0.4);
        assert_eq!(interval.clamp(7.0), 1.0);
    }

    #[test]
    fn test_expand_splits_delta() {
        let expanded = Interval::new(1.0, 2.0).expand(0.5);

        assert_eq!(expanded.min, 0.75);
        assert_eq!(expanded.max, 2.25);
        assert_eq!(expanded.size(), 1.5);
    }

    #[test]
    fn test_shift() {
        let shifted = Interval::new(1.0, 4.0).shift(-1.5);

        assert_eq!(shifted.min, -0.5);
        assert_eq!(shifted.max, 2.5);
        assert_eq!(shifted.size(), 3.0);
    }

    #[test]
    fn test_surrounding_covers_both() {
        let a = Interval::new(-1.0, 2.0);
        let b = Interval::new(1.0, 5.0);
        let joined = Interval::surrounding(&a, &b);

        assert_eq!(joined.min, -1.0);
        assert_eq!(joined.max, 5.0);

        // Surrounding with EMPTY acts as identity
        let with_empty = Interval::surrounding(&a, &Interval::EMPTY);
        assert_eq!(with_empty, a);
    }

    #[test]
    fn test_empty_contains_nothing() {
        assert!(!Interval::EMPTY.contains(0.0));
        assert!(!Interval::EMPTY.contains(f32::INFINITY));
        assert!(Interval::EMPTY.min > Interval::EMPTY.max);
    }

    #[test]
    fn test_universe_contains_everything() {
        assert!(Interval::UNIVERSE.contains(0.0));
        assert!(Interval::UNIVERSE.contains(-1e30));
        assert!(Interval::UNIVERSE.contains(1e30));
    }
}
