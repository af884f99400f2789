pub mod prefix_formatter;

pub use prefix_formatter::{AxisLabeler, MetricPrefixFormatter};
