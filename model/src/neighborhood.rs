use anyhow::{ensure, Result};
use geo::Point;

/// A neighborhood centroid that searches are centred on.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighborhood {
    pub name: String,
    pub point: Point,
}

impl Neighborhood {
    pub fn new(name: String, latitude: f64, longitude: f64) -> Result<Self> {
        ensure!(
            latitude.is_finite() && (-90.0..=90.0).contains(&latitude),
            "Invalid latitude for {name}: {latitude}"
        );
        ensure!(
            longitude.is_finite() && (-180.0..=180.0).contains(&longitude),
            "Invalid longitude for {name}: {longitude}"
        );

        Ok(Self {
            name,
            point: Point::new(longitude, latitude),
        })
    }

    pub fn latitude(&self) -> f64 {
        self.point.y()
    }

    pub fn longitude(&self) -> f64 {
        self.point.x()
    }
}
