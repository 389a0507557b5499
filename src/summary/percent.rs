use crate::types::summary::Metric;

/// Magnitudes above 1 are already percentages; anything else is a fraction.
pub fn to_percent(value: f64) -> f64 {
    if value.abs() > 1.0 {
        value
    } else {
        value * 100.0
    }
}

pub fn percent_metric(value: Metric) -> Metric {
    value.map(to_percent)
}

/// How percentage fields of a payload are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentScale {
    /// Engine output: fractions and percentages mixed, see [`to_percent`].
    Mixed,
    /// A stored summary: every value is already a percentage.
    Percent,
}

impl PercentScale {
    pub fn read(self, value: Metric) -> Metric {
        match self {
            PercentScale::Mixed => percent_metric(value),
            PercentScale::Percent => value,
        }
    }
}
