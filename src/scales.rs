use serde::{Deserialize, Serialize};

use crate::data_types::AxisBounds;

/// Sorted set of canonical per-division magnitudes ("nice" values).
///
/// Gesture zoom always snaps to a member so the displayed scale stays round.
/// The set itself is configuration; see [`ScaleStepSequence::decades`] for the
/// usual 1/2/5 series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "StepSequenceRepr", into = "StepSequenceRepr")]
pub struct ScaleStepSequence {
    steps: Vec<f64>,
    lower: Option<f64>,
    upper: Option<f64>,
}

#[derive(Clone, Serialize, Deserialize)]
struct StepSequenceRepr {
    steps: Vec<f64>,
    #[serde(default)]
    lower: Option<f64>,
    #[serde(default)]
    upper: Option<f64>,
}

impl From<StepSequenceRepr> for ScaleStepSequence {
    fn from(repr: StepSequenceRepr) -> Self {
        let mut seq = Self::new(repr.steps);
        seq.lower = repr.lower;
        seq.upper = repr.upper;
        seq
    }
}

impl From<ScaleStepSequence> for StepSequenceRepr {
    fn from(seq: ScaleStepSequence) -> Self {
        Self {
            steps: seq.steps,
            lower: seq.lower,
            upper: seq.upper,
        }
    }
}

impl ScaleStepSequence {
    /// Builds a sequence from arbitrary magnitudes. Non-finite and
    /// non-positive values are dropped, the rest sorted and deduplicated.
    pub fn new(steps: impl IntoIterator<Item = f64>) -> Self {
        let mut steps: Vec<f64> = steps
            .into_iter()
            .filter(|v| v.is_finite() && *v > 0.0)
            .collect();
        steps.sort_by(|a, b| a.total_cmp(b));
        steps.dedup();
        Self {
            steps,
            lower: None,
            upper: None,
        }
    }

    /// `mantissa × 10^k` for every decade, keeping members in `[lower, upper]`.
    pub fn decades(lower: f64, upper: f64, mantissas: &[f64]) -> Self {
        let mut steps = Vec::new();
        if lower > 0.0 && upper >= lower && lower.is_finite() && upper.is_finite() {
            let first = lower.log10().floor() as i32;
            let last = upper.log10().ceil() as i32;
            for exp in first..=last {
                for &m in mantissas {
                    // Dividing by an exact power of ten keeps 1e-3 == 0.001.
                    let v = if exp < 0 {
                        m / 10f64.powi(-exp)
                    } else {
                        m * 10f64.powi(exp)
                    };
                    if v >= lower && v <= upper {
                        steps.push(v);
                    }
                }
            }
        }
        Self::new(steps)
    }

    pub fn set_lower(&mut self, value: f64) {
        self.lower = value.is_finite().then_some(value);
    }

    pub fn set_upper(&mut self, value: f64) {
        self.upper = value.is_finite().then_some(value);
    }

    /// Smallest usable member, or the configured lower clip.
    pub fn lower(&self) -> Option<f64> {
        self.lower.or_else(|| self.usable().next())
    }

    pub fn upper(&self) -> Option<f64> {
        self.upper.or_else(|| self.usable().last())
    }

    pub fn is_empty(&self) -> bool {
        self.usable().next().is_none()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.usable().any(|s| s == value)
    }

    /// Members inside the clip range, ascending.
    pub fn usable(&self) -> impl DoubleEndedIterator<Item = f64> + '_ {
        let lower = self.lower.unwrap_or(f64::NEG_INFINITY);
        let upper = self.upper.unwrap_or(f64::INFINITY);
        self.steps
            .iter()
            .copied()
            .filter(move |s| *s >= lower && *s <= upper)
    }

    /// Smallest member strictly greater than `value`, or `value` unchanged.
    pub fn number_after(&self, value: f64) -> f64 {
        self.usable().find(|s| *s > value).unwrap_or(value)
    }

    /// Largest member strictly smaller than `value`, or `value` unchanged.
    pub fn number_before(&self, value: f64) -> f64 {
        self.usable().rev().find(|s| *s < value).unwrap_or(value)
    }

    /// Member closest to `value` in log space.
    pub fn nearest(&self, value: f64) -> Option<f64> {
        if !(value.is_finite() && value > 0.0) {
            return None;
        }
        self.usable().min_by(|a, b| {
            let da = (a.ln() - value.ln()).abs();
            let db = (b.ln() - value.ln()).abs();
            da.total_cmp(&db)
        })
    }
}

/// Tick sets of one axis as handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleDivision {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub minor_ticks: Vec<f64>,
    pub medium_ticks: Vec<f64>,
    pub major_ticks: Vec<f64>,
}

impl ScaleDivision {
    /// Fixed grid: one major tick per division boundary, `subdivisions` parts
    /// per division. When `subdivisions` is even the middle part is a medium
    /// tick.
    pub fn fixed_grid(bounds: AxisBounds, num_divisions: u32, subdivisions: u32) -> Self {
        let mut div = Self {
            lower_bound: bounds.min,
            upper_bound: bounds.max,
            ..Default::default()
        };
        if num_divisions == 0 || !bounds.span().is_finite() {
            return div;
        }

        let step = bounds.span() / num_divisions as f64;
        let snap = |v: f64| if v.abs() < step.abs() * 1e-9 { 0.0 } else { v };

        for i in 0..=num_divisions {
            div.major_ticks.push(snap(bounds.min + step * i as f64));
        }

        if subdivisions > 1 {
            let minor_step = step / subdivisions as f64;
            for i in 0..num_divisions {
                let start = bounds.min + step * i as f64;
                for j in 1..subdivisions {
                    let v = snap(start + minor_step * j as f64);
                    if subdivisions % 2 == 0 && j == subdivisions / 2 {
                        div.medium_ticks.push(v);
                    } else {
                        div.minor_ticks.push(v);
                    }
                }
            }
        }
        div
    }

    pub fn bounds(&self) -> AxisBounds {
        AxisBounds::new(self.lower_bound, self.upper_bound)
    }

    pub fn contains(&self, value: f64) -> bool {
        let lo = self.lower_bound.min(self.upper_bound);
        let hi = self.lower_bound.max(self.upper_bound);
        value >= lo && value <= hi
    }
}
