use crate::scales::ScaleDivision;

/// Drops the outermost major ticks so stacked panels sharing an axis do not
/// draw a doubled grid line on their common edge.
pub struct GridAligner;

impl GridAligner {
    /// Removes the first and last major ticks; minor and medium ticks pass
    /// through. Callers must supply at least two major ticks.
    pub fn trim(division: &ScaleDivision) -> ScaleDivision {
        debug_assert!(
            division.major_ticks.len() >= 2,
            "edgeless grid needs at least two major ticks"
        );
        let major = &division.major_ticks;
        let major_ticks = if major.len() >= 2 {
            major[1..major.len() - 1].to_vec()
        } else {
            Vec::new()
        };

        ScaleDivision {
            lower_bound: division.lower_bound,
            upper_bound: division.upper_bound,
            minor_ticks: division.minor_ticks.clone(),
            medium_ticks: division.medium_ticks.clone(),
            major_ticks,
        }
    }
}
