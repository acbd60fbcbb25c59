use nalgebra::Point3;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub type_name: String,
    pub position: Point3<f64>,
}

impl Particle {
    pub fn new(type_name: impl Into<String>, position: Point3<f64>) -> Self {
        Self {
            type_name: type_name.into(),
            position,
        }
    }

    pub fn at(type_name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self::new(type_name, Point3::new(x, y, z))
    }
}
