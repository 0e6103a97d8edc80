use serde::{Deserialize, Serialize};

/// Width and height of a rectangular area, e.g. a rendering surface in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Size<Num: num_traits::Num + PartialOrd + Copy + PartialEq = f64> {
    width: Num,
    height: Num,
}

impl<Num: num_traits::Num + PartialOrd + Copy> Size<Num> {
    /// Creates a new size.
    pub fn new(width: Num, height: Num) -> Self {
        Self { width, height }
    }

    /// Width of the area.
    pub fn width(&self) -> Num {
        self.width
    }

    /// Height of the area.
    pub fn height(&self) -> Num {
        self.height
    }

    /// Returns true if either of the dimensions is zero. Nothing can be drawn into such area.
    pub fn is_zero(&self) -> bool {
        self.width.is_zero() || self.height.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size() {
        assert!(Size::new(0.0, 10.0).is_zero());
        assert!(Size::new(10.0, 0.0).is_zero());
        assert!(!Size::new(1.0, 1.0).is_zero());
    }
}
