/// A closed or open range of ray parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Returns a copy with the upper bound replaced.
    ///
    /// Closest-hit searches shrink the interval to the nearest `t` found so far.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.0, 10.0);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));

        assert!(interval.surrounds(5.0));
        assert!(interval.surrounds(0.1));
        assert!(interval.surrounds(9.9));

        assert!(!interval.surrounds(-0.1));
        assert!(!interval.surrounds(10.1));
    }

    #[test]
    fn test_interval_surrounds_unbounded() {
        let interval = Interval::new(0.001, f32::INFINITY);
        assert!(interval.surrounds(1e30));
        assert!(!interval.surrounds(0.0005));
        assert!(!interval.surrounds(f32::NAN));
    }

    #[test]
    fn test_interval_clamp() {
        let interval = Interval::new(0.0, 10.0);

        assert_eq!(interval.clamp(-5.0), 0.0);
        assert_eq!(interval.clamp(5.0), 5.0);
        assert_eq!(interval.clamp(15.0), 10.0);
    }

    #[test]
    fn test_interval_with_max() {
        let interval = Interval::new(0.001, f32::INFINITY).with_max(4.0);
        assert_eq!(interval, Interval::new(0.001, 4.0));
    }
}
