/**
 * Maps floor indices to vertical positions in the shaft.
 *
 * Floor 0 is the lowest floor and gets the largest coordinate; every floor above it
 * sits one `floor_height` closer to the top of the shaft.
 */
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorGeometry {
    n_floors: u8,
    floor_height: f64,
}

impl FloorGeometry {
    pub fn new(n_floors: u8, shaft_height: f64) -> FloorGeometry {
        FloorGeometry {
            n_floors,
            floor_height: shaft_height / n_floors as f64,
        }
    }

    pub fn n_floors(&self) -> u8 {
        self.n_floors
    }

    pub fn floor_height(&self) -> f64 {
        self.floor_height
    }

    pub fn floor_to_position(&self, floor: u8) -> f64 {
        (self.n_floors as f64 - 1.0 - floor as f64) * self.floor_height
    }
}
