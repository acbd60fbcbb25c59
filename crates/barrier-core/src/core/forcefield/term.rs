use nalgebra::{Matrix3, Point3, Vector3};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Force, energy and virial acting on one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceContribution {
    pub force: Vector3<f64>,
    pub energy: f64,
    /// Outer product `r ⊗ F` of the particle position and the force.
    pub virial: Matrix3<f64>,
}

impl Default for ForceContribution {
    fn default() -> Self {
        Self::zero()
    }
}

impl ForceContribution {
    pub fn zero() -> Self {
        Self {
            force: Vector3::zeros(),
            energy: 0.0,
            virial: Matrix3::zeros(),
        }
    }

    pub fn new(position: &Point3<f64>, force: Vector3<f64>, energy: f64) -> Self {
        Self {
            force,
            energy,
            virial: position.coords * force.transpose(),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.energy == 0.0 && self.force == Vector3::zeros()
    }

    /// Scalar virial `r · F`.
    #[inline]
    pub fn virial_trace(&self) -> f64 {
        self.virial.trace()
    }
}

impl Add for ForceContribution {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            force: self.force + rhs.force,
            energy: self.energy + rhs.energy,
            virial: self.virial + rhs.virial,
        }
    }
}

impl AddAssign for ForceContribution {
    fn add_assign(&mut self, rhs: Self) {
        self.force += rhs.force;
        self.energy += rhs.energy;
        self.virial += rhs.virial;
    }
}

impl Sum for ForceContribution {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, term| acc + term)
    }
}

impl<'a> Sum<&'a ForceContribution> for ForceContribution {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Reduction of one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationSummary {
    pub total_energy: f64,
    pub net_force: Vector3<f64>,
    pub virial: Matrix3<f64>,
    /// Particles that received a non-zero contribution. A particle beyond its boundary
    /// whose type has `k = 0` is not counted.
    pub interacting: usize,
}

impl EvaluationSummary {
    pub fn from_contributions(contributions: &[ForceContribution]) -> Self {
        let total: ForceContribution = contributions.iter().sum();
        Self {
            total_energy: total.energy,
            net_force: total.force,
            virial: total.virial,
            interacting: contributions.iter().filter(|c| !c.is_zero()).count(),
        }
    }
}
