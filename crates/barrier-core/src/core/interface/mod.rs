//! # Interface Module
//!
//! The interface position is a scalar function of the integer step index together with the
//! range it can take over a simulation. The evaluation kernel only ever talks to the
//! [`InterfaceVariant`] capability; [`schedules`] provides the closed-form schedules most
//! hosts need and an adapter for arbitrary closures.

use std::sync::Arc;

pub mod schedules;

/// Step-indexed interface position with declared bounds.
///
/// Implementors must guarantee `lower_bound() <= value(step) <= upper_bound()` for every
/// step that is queried. The bounds need not be tight.
pub trait InterfaceVariant: Send + Sync {
    fn value(&self, step: u64) -> f64;
    fn lower_bound(&self) -> f64;
    fn upper_bound(&self) -> f64;
}

impl<T: InterfaceVariant + ?Sized> InterfaceVariant for Box<T> {
    fn value(&self, step: u64) -> f64 {
        (**self).value(step)
    }
    fn lower_bound(&self) -> f64 {
        (**self).lower_bound()
    }
    fn upper_bound(&self) -> f64 {
        (**self).upper_bound()
    }
}

impl<T: InterfaceVariant + ?Sized> InterfaceVariant for Arc<T> {
    fn value(&self, step: u64) -> f64 {
        (**self).value(step)
    }
    fn lower_bound(&self) -> f64 {
        (**self).lower_bound()
    }
    fn upper_bound(&self) -> f64 {
        (**self).upper_bound()
    }
}

impl<T: InterfaceVariant + ?Sized> InterfaceVariant for &T {
    fn value(&self, step: u64) -> f64 {
        (**self).value(step)
    }
    fn lower_bound(&self) -> f64 {
        (**self).lower_bound()
    }
    fn upper_bound(&self) -> f64 {
        (**self).upper_bound()
    }
}
