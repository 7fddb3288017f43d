use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in image pixel space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Region {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Builds a region from detector coordinates, truncating toward zero.
    pub fn from_coordinate(coordinate: [f64; 4]) -> Self {
        Self {
            x1: coordinate[0] as i32,
            y1: coordinate[1] as i32,
            x2: coordinate[2] as i32,
            y2: coordinate[3] as i32,
        }
    }

    /// Pixel height, used downstream as the font-size proxy.
    pub fn height(&self) -> u32 {
        self.y2.abs_diff(self.y1)
    }

    /// Coordinates in the `[x_min, x_max, y_min, y_max]` order recognizers expect.
    pub fn horizontal_extent(&self) -> [i32; 4] {
        [self.x1, self.x2, self.y1, self.y2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn height_ignores_orientation() {
        assert_eq!(Region::new(0, 40, 10, 10).height(), 30);
        assert_eq!(Region::new(0, 10, 10, 40).height(), 30);
    }

    #[test]
    fn truncates_float_coordinates() {
        let region = Region::from_coordinate([1.9, 2.2, 30.7, 12.99]);
        assert_eq!(region, Region::new(1, 2, 30, 12));
        assert_eq!(region.horizontal_extent(), [1, 30, 2, 12]);
    }
}
