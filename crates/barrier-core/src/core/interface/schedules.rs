use super::InterfaceVariant;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Schedule parameter '{name}' must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("Cycle schedule has a zero-length period")]
    ZeroPeriod,
    #[error("Piecewise-linear schedule needs at least one knot")]
    NoKnots,
    #[error("Piecewise-linear knot {index} at step {step} does not follow step {previous}")]
    UnorderedKnots {
        index: usize,
        step: u64,
        previous: u64,
    },
    #[error("Declared bounds are inverted: lower {lower} > upper {upper}")]
    InvertedBounds { lower: f64, upper: f64 },
}

fn ensure_finite(name: &'static str, value: f64) -> Result<f64, ScheduleError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScheduleError::NonFinite { name, value })
    }
}

#[inline]
fn lerp(from: f64, to: f64, elapsed: u64, span: u64) -> f64 {
    from + (to - from) * (elapsed as f64 / span as f64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Result<Self, ScheduleError> {
        Ok(Self {
            value: ensure_finite("value", value)?,
        })
    }
}

impl InterfaceVariant for Constant {
    fn value(&self, _step: u64) -> f64 {
        self.value
    }
    fn lower_bound(&self) -> f64 {
        self.value
    }
    fn upper_bound(&self) -> f64 {
        self.value
    }
}

/// Holds `a` until `t_start`, moves linearly to `b` over `t_ramp` steps, then holds `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    a: f64,
    b: f64,
    t_start: u64,
    t_ramp: u64,
}

impl Ramp {
    pub fn new(a: f64, b: f64, t_start: u64, t_ramp: u64) -> Result<Self, ScheduleError> {
        Ok(Self {
            a: ensure_finite("a", a)?,
            b: ensure_finite("b", b)?,
            t_start,
            t_ramp,
        })
    }
}

impl InterfaceVariant for Ramp {
    fn value(&self, step: u64) -> f64 {
        if step < self.t_start {
            self.a
        } else if step - self.t_start < self.t_ramp {
            lerp(self.a, self.b, step - self.t_start, self.t_ramp)
        } else {
            self.b
        }
    }
    fn lower_bound(&self) -> f64 {
        self.a.min(self.b)
    }
    fn upper_bound(&self) -> f64 {
        self.a.max(self.b)
    }
}

/// Holds `a` until `t_start`, then repeats: hold `a` for `t_a`, ramp to `b` over `t_ab`,
/// hold `b` for `t_b`, ramp back to `a` over `t_ba`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cycle {
    a: f64,
    b: f64,
    t_start: u64,
    t_a: u64,
    t_ab: u64,
    t_b: u64,
    t_ba: u64,
}

impl Cycle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        a: f64,
        b: f64,
        t_start: u64,
        t_a: u64,
        t_ab: u64,
        t_b: u64,
        t_ba: u64,
    ) -> Result<Self, ScheduleError> {
        let period = t_a
            .checked_add(t_ab)
            .and_then(|p| p.checked_add(t_b))
            .and_then(|p| p.checked_add(t_ba));
        if !matches!(period, Some(p) if p > 0) {
            return Err(ScheduleError::ZeroPeriod);
        }
        Ok(Self {
            a: ensure_finite("a", a)?,
            b: ensure_finite("b", b)?,
            t_start,
            t_a,
            t_ab,
            t_b,
            t_ba,
        })
    }

    fn period(&self) -> u64 {
        self.t_a + self.t_ab + self.t_b + self.t_ba
    }
}

impl InterfaceVariant for Cycle {
    fn value(&self, step: u64) -> f64 {
        if step < self.t_start {
            return self.a;
        }
        let mut t = (step - self.t_start) % self.period();
        if t < self.t_a {
            return self.a;
        }
        t -= self.t_a;
        if t < self.t_ab {
            return lerp(self.a, self.b, t, self.t_ab);
        }
        t -= self.t_ab;
        if t < self.t_b {
            return self.b;
        }
        t -= self.t_b;
        lerp(self.b, self.a, t, self.t_ba)
    }
    fn lower_bound(&self) -> f64 {
        self.a.min(self.b)
    }
    fn upper_bound(&self) -> f64 {
        self.a.max(self.b)
    }
}

/// Linear interpolation between `(step, value)` knots, clamped to the end values outside.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseLinear {
    knots: Vec<(u64, f64)>,
    lower: f64,
    upper: f64,
}

impl PiecewiseLinear {
    pub fn new(knots: Vec<(u64, f64)>) -> Result<Self, ScheduleError> {
        if knots.is_empty() {
            return Err(ScheduleError::NoKnots);
        }
        for (index, pair) in knots.windows(2).enumerate() {
            if pair[1].0 <= pair[0].0 {
                return Err(ScheduleError::UnorderedKnots {
                    index: index + 1,
                    step: pair[1].0,
                    previous: pair[0].0,
                });
            }
        }
        let mut lower = f64::INFINITY;
        let mut upper = f64::NEG_INFINITY;
        for &(_, value) in &knots {
            ensure_finite("knot value", value)?;
            lower = lower.min(value);
            upper = upper.max(value);
        }
        Ok(Self {
            knots,
            lower,
            upper,
        })
    }

    pub fn knots(&self) -> &[(u64, f64)] {
        &self.knots
    }
}

impl InterfaceVariant for PiecewiseLinear {
    fn value(&self, step: u64) -> f64 {
        let next = self.knots.partition_point(|&(s, _)| s <= step);
        if next == 0 {
            return self.knots[0].1;
        }
        if next == self.knots.len() {
            return self.knots[next - 1].1;
        }
        let (s0, v0) = self.knots[next - 1];
        let (s1, v1) = self.knots[next];
        lerp(v0, v1, step - s0, s1 - s0)
    }
    fn lower_bound(&self) -> f64 {
        self.lower
    }
    fn upper_bound(&self) -> f64 {
        self.upper
    }
}

/// Adapts an arbitrary step function with caller-declared bounds.
pub struct StepFunction<F> {
    f: F,
    lower: f64,
    upper: f64,
}

impl<F> StepFunction<F>
where
    F: Fn(u64) -> f64 + Send + Sync,
{
    pub fn new(f: F, lower: f64, upper: f64) -> Result<Self, ScheduleError> {
        ensure_finite("lower", lower)?;
        ensure_finite("upper", upper)?;
        if lower > upper {
            return Err(ScheduleError::InvertedBounds { lower, upper });
        }
        Ok(Self { f, lower, upper })
    }
}

impl<F> InterfaceVariant for StepFunction<F>
where
    F: Fn(u64) -> f64 + Send + Sync,
{
    fn value(&self, step: u64) -> f64 {
        (self.f)(step)
    }
    fn lower_bound(&self) -> f64 {
        self.lower
    }
    fn upper_bound(&self) -> f64 {
        self.upper
    }
}

impl<F> fmt::Debug for StepFunction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepFunction")
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .finish_non_exhaustive()
    }
}

/// Declarative form of the closed-form schedules, as read from configuration files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    rename_all = "kebab-case",
    rename_all_fields = "kebab-case",
    tag = "type",
    deny_unknown_fields
)]
pub enum Schedule {
    Constant {
        value: f64,
    },
    Ramp {
        a: f64,
        b: f64,
        t_start: u64,
        t_ramp: u64,
    },
    Cycle {
        a: f64,
        b: f64,
        t_start: u64,
        t_a: u64,
        t_ab: u64,
        t_b: u64,
        t_ba: u64,
    },
    PiecewiseLinear {
        points: Vec<(u64, f64)>,
    },
}

impl Schedule {
    pub fn build(self) -> Result<Arc<dyn InterfaceVariant>, ScheduleError> {
        Ok(match self {
            Schedule::Constant { value } => Arc::new(Constant::new(value)?),
            Schedule::Ramp {
                a,
                b,
                t_start,
                t_ramp,
            } => Arc::new(Ramp::new(a, b, t_start, t_ramp)?),
            Schedule::Cycle {
                a,
                b,
                t_start,
                t_a,
                t_ab,
                t_b,
                t_ba,
            } => Arc::new(Cycle::new(a, b, t_start, t_a, t_ab, t_b, t_ba)?),
            Schedule::PiecewiseLinear { points } => Arc::new(PiecewiseLinear::new(points)?),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Schedule::Constant { .. } => "constant",
            Schedule::Ramp { .. } => "ramp",
            Schedule::Cycle { .. } => "cycle",
            Schedule::PiecewiseLinear { .. } => "piecewise-linear",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn constant_returns_value_and_tight_bounds() {
        let c = Constant::new(5.0).unwrap();
        assert_eq!(c.value(0), 5.0);
        assert_eq!(c.value(u64::MAX), 5.0);
        assert_eq!((c.lower_bound(), c.upper_bound()), (5.0, 5.0));
    }

    #[test]
    fn constant_rejects_non_finite_value() {
        assert!(matches!(
            Constant::new(f64::NAN),
            Err(ScheduleError::NonFinite { name: "value", .. })
        ));
    }

    #[test]
    fn ramp_holds_then_interpolates_then_holds() {
        let ramp = Ramp::new(5.0, 4.0, 10, 4).unwrap();
        assert_eq!(ramp.value(0), 5.0);
        assert_eq!(ramp.value(10), 5.0);
        assert!(f64_approx_equal(ramp.value(11), 4.75));
        assert!(f64_approx_equal(ramp.value(12), 4.5));
        assert_eq!(ramp.value(14), 4.0);
        assert_eq!(ramp.value(1_000), 4.0);
        assert_eq!((ramp.lower_bound(), ramp.upper_bound()), (4.0, 5.0));
    }

    #[test]
    fn ramp_with_zero_length_is_a_step_change() {
        let ramp = Ramp::new(1.0, 2.0, 3, 0).unwrap();
        assert_eq!(ramp.value(2), 1.0);
        assert_eq!(ramp.value(3), 2.0);
    }

    #[test]
    fn cycle_walks_through_all_four_phases() {
        let cycle = Cycle::new(0.0, 10.0, 5, 2, 2, 2, 2).unwrap();
        let expected = [
            (0, 0.0),
            (5, 0.0),
            (6, 0.0),
            (7, 0.0),
            (8, 5.0),
            (9, 10.0),
            (10, 10.0),
            (11, 10.0),
            (12, 5.0),
            (13, 0.0),
            (16, 5.0),
        ];
        for (step, value) in expected {
            assert!(
                f64_approx_equal(cycle.value(step), value),
                "step {step}: expected {value}, got {}",
                cycle.value(step)
            );
        }
        assert_eq!((cycle.lower_bound(), cycle.upper_bound()), (0.0, 10.0));
    }

    #[test]
    fn cycle_rejects_zero_period() {
        assert_eq!(
            Cycle::new(0.0, 1.0, 0, 0, 0, 0, 0),
            Err(ScheduleError::ZeroPeriod)
        );
    }

    #[test]
    fn piecewise_linear_interpolates_and_clamps() {
        let pl = PiecewiseLinear::new(vec![(10, 5.0), (20, 4.0), (30, 6.0)]).unwrap();
        assert_eq!(pl.value(0), 5.0);
        assert_eq!(pl.value(10), 5.0);
        assert!(f64_approx_equal(pl.value(15), 4.5));
        assert_eq!(pl.value(20), 4.0);
        assert!(f64_approx_equal(pl.value(25), 5.0));
        assert_eq!(pl.value(30), 6.0);
        assert_eq!(pl.value(99), 6.0);
        assert_eq!((pl.lower_bound(), pl.upper_bound()), (4.0, 6.0));
    }

    #[test]
    fn piecewise_linear_with_single_knot_is_constant() {
        let pl = PiecewiseLinear::new(vec![(7, 2.5)]).unwrap();
        assert_eq!(pl.value(0), 2.5);
        assert_eq!(pl.value(100), 2.5);
    }

    #[test]
    fn piecewise_linear_rejects_empty_or_unordered_knots() {
        assert_eq!(PiecewiseLinear::new(vec![]), Err(ScheduleError::NoKnots));
        assert_eq!(
            PiecewiseLinear::new(vec![(0, 1.0), (5, 2.0), (5, 3.0)]),
            Err(ScheduleError::UnorderedKnots {
                index: 2,
                step: 5,
                previous: 5
            })
        );
    }

    #[test]
    fn step_function_wraps_closure_with_declared_bounds() {
        let z = 5.0;
        let variant = StepFunction::new(move |step| if step <= 1 { z } else { z - 1.0 }, 4.0, 5.0)
            .unwrap();
        assert_eq!(variant.value(0), 5.0);
        assert_eq!(variant.value(1), 5.0);
        assert_eq!(variant.value(2), 4.0);
        assert_eq!((variant.lower_bound(), variant.upper_bound()), (4.0, 5.0));
    }

    #[test]
    fn step_function_rejects_inverted_bounds() {
        assert!(matches!(
            StepFunction::new(|_| 0.0, 1.0, -1.0),
            Err(ScheduleError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn schedule_deserializes_from_tagged_toml_tables() {
        let ramp: Schedule = toml::from_str(
            r#"
            type = "ramp"
            a = 5.0
            b = 4.0
            t-start = 0
            t-ramp = 100
            "#,
        )
        .unwrap();
        assert_eq!(
            ramp,
            Schedule::Ramp {
                a: 5.0,
                b: 4.0,
                t_start: 0,
                t_ramp: 100
            }
        );

        let pl: Schedule = toml::from_str(
            r#"
            type = "piecewise-linear"
            points = [[0, 5.0], [10, 4.0]]
            "#,
        )
        .unwrap();
        assert_eq!(pl.name(), "piecewise-linear");
    }

    #[test]
    fn schedule_build_validates_parameters() {
        let variant = Schedule::Constant { value: 3.0 }.build().unwrap();
        assert_eq!(variant.value(42), 3.0);

        let err = Schedule::PiecewiseLinear { points: vec![] }.build().err();
        assert_eq!(err, Some(ScheduleError::NoKnots));
    }
}
