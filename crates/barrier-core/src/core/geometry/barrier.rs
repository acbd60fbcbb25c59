use super::axis::Axis;
use nalgebra::{Point3, Unit, Vector3};
use serde::Deserialize;

/// The closed set of barrier shapes. All shapes are centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type", deny_unknown_fields)]
pub enum BarrierGeometry {
    /// Sphere of radius `R + offset`; `d` is the distance from the origin.
    Spherical,
    /// Plane `axis = R + offset`; `d` is the position component along `axis`.
    Planar {
        #[serde(default)]
        axis: Axis,
    },
    /// Cylinder of radius `R + offset` around `axis`; `d` is the distance from the axis line.
    Cylindrical {
        #[serde(default)]
        axis: Axis,
    },
}

impl BarrierGeometry {
    pub fn planar(axis: Axis) -> Self {
        Self::Planar { axis }
    }

    pub fn cylindrical(axis: Axis) -> Self {
        Self::Cylindrical { axis }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Spherical => "spherical",
            Self::Planar { .. } => "planar",
            Self::Cylindrical { .. } => "cylindrical",
        }
    }

    #[inline]
    pub fn coordinate(&self, position: &Point3<f64>) -> f64 {
        match self {
            Self::Spherical => position.coords.norm(),
            Self::Planar { axis } => position[axis.index()],
            Self::Cylindrical { axis } => radial_component(position, *axis).norm(),
        }
    }

    /// Outward unit normal of the barrier at `position`.
    ///
    /// Returns `None` where the normal is undefined: the origin for spherical barriers and
    /// the axis line for cylindrical ones. Callers treat such particles as force-free.
    #[inline]
    pub fn direction(&self, position: &Point3<f64>) -> Option<Unit<Vector3<f64>>> {
        match self {
            Self::Spherical => Unit::try_new(position.coords, 0.0),
            Self::Planar { axis } => Some(axis.unit()),
            Self::Cylindrical { axis } => Unit::try_new(radial_component(position, *axis), 0.0),
        }
    }
}

#[inline]
fn radial_component(position: &Point3<f64>, axis: Axis) -> Vector3<f64> {
    let mut radial = position.coords;
    radial[axis.index()] = 0.0;
    radial
}
