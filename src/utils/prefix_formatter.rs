use crate::data_types::{AxisBounds, LabelConfig};

const METRIC_PREFIXES: &[(&str, f64)] = &[
    ("p", 1e-12),
    ("n", 1e-9),
    ("μ", 1e-6),
    ("m", 1e-3),
    ("", 1.0),
    ("k", 1e3),
    ("M", 1e6),
    ("G", 1e9),
    ("T", 1e12),
];

// Time axes never go above seconds.
const TIME_PREFIXES: &[(&str, f64)] = &[
    ("p", 1e-12),
    ("n", 1e-9),
    ("μ", 1e-6),
    ("m", 1e-3),
    ("", 1.0),
];

/// Picks an engineering prefix and divisor from the largest visible magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricPrefixFormatter {
    prefixes: &'static [(&'static str, f64)],
}

impl Default for MetricPrefixFormatter {
    fn default() -> Self {
        Self::metric()
    }
}

impl MetricPrefixFormatter {
    pub fn metric() -> Self {
        Self {
            prefixes: METRIC_PREFIXES,
        }
    }

    pub fn time() -> Self {
        Self {
            prefixes: TIME_PREFIXES,
        }
    }

    /// Returns `(prefix, divisor)` for `max_abs`: the largest divisor not
    /// exceeding the value, clamped to the ends of the table. Zero and
    /// non-finite input map to the unprefixed unit.
    pub fn format_attributes(&self, max_abs: f64) -> (&'static str, f64) {
        let value = max_abs.abs();
        if value == 0.0 || !value.is_finite() {
            return ("", 1.0);
        }
        let mut chosen = self.prefixes[0];
        for &(prefix, divisor) in self.prefixes {
            // Tolerate representation noise such as 0.000999999.
            if value >= divisor * (1.0 - 1e-9) {
                chosen = (prefix, divisor);
            }
        }
        chosen
    }

    pub fn format(&self, value: f64, precision: usize, unit: &str) -> String {
        let (prefix, divisor) = self.format_attributes(value);
        format!("{:.*} {}{}", precision, value / divisor, prefix, unit)
    }
}

/// Turns tick values into label text for one axis.
///
/// All labels of an axis share the prefix chosen from the larger absolute
/// bound currently visible, so `-500 mV .. 500 mV` never mixes with `V`.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabeler {
    pub formatter: MetricPrefixFormatter,
    pub config: LabelConfig,
}

impl AxisLabeler {
    pub fn new(formatter: MetricPrefixFormatter, config: LabelConfig) -> Self {
        Self { formatter, config }
    }

    pub fn attributes(&self, bounds: AxisBounds) -> (&'static str, f64) {
        self.formatter.format_attributes(bounds.max_abs())
    }

    pub fn label(&self, value: f64, bounds: AxisBounds) -> String {
        let (prefix, divisor) = self.attributes(bounds);
        let scaled = value / divisor;
        // Avoid "-0.000" for ticks that are zero up to rounding.
        let scaled = if format!("{:.*}", self.config.precision, scaled.abs())
            .trim_start_matches(['0', '.'])
            .is_empty()
        {
            0.0
        } else {
            scaled
        };
        format!(
            "{:.*} {}{}",
            self.config.precision, scaled, prefix, self.config.unit
        )
    }

    pub fn labels(&self, ticks: &[f64], bounds: AxisBounds) -> Vec<String> {
        ticks.iter().map(|t| self.label(*t, bounds)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_attributes() {
        let f = MetricPrefixFormatter::metric();
        assert_eq!(f.format_attributes(0.5), ("m", 1e-3));
        assert_eq!(f.format_attributes(1.0), ("", 1.0));
        assert_eq!(f.format_attributes(2500.0), ("k", 1e3));
        assert_eq!(f.format_attributes(0.0), ("", 1.0));
        assert_eq!(f.format_attributes(1e-15), ("p", 1e-12));
        assert_eq!(f.format_attributes(5e15), ("T", 1e12));
    }

    #[test]
    fn test_time_attributes_stop_at_seconds() {
        let f = MetricPrefixFormatter::time();
        assert_eq!(f.format_attributes(5e-6), ("μ", 1e-6));
        assert_eq!(f.format_attributes(3600.0), ("", 1.0));
    }

    #[test]
    fn test_labels_share_prefix() {
        let labeler = AxisLabeler::new(MetricPrefixFormatter::metric(), LabelConfig::new("V", 1));
        let bounds = AxisBounds::new(-0.4, 0.4);
        let labels = labeler.labels(&[-0.4, 0.0, 0.2], bounds);
        assert_eq!(labels, vec!["-400.0 mV", "0.0 mV", "200.0 mV"]);
    }

    #[test]
    fn test_negative_zero_label() {
        let labeler = AxisLabeler::new(MetricPrefixFormatter::metric(), LabelConfig::new("V", 2));
        let bounds = AxisBounds::new(-4.0, 4.0);
        assert_eq!(labeler.label(-1e-17, bounds), "0.00 V");
    }
}
