//! Experience fit: linear partial credit against the required years.

/// Fit of `candidate_years` against `required_years`, in `[0,1]`.
///
/// No requirement (or a non-positive one) is a free pass. Meeting the
/// requirement scores 1.0; falling short earns the linear fraction.
pub fn experience_fit(required_years: f64, candidate_years: f64) -> f64 {
    if required_years <= 0.0 {
        return 1.0;
    }
    if candidate_years >= required_years {
        return 1.0;
    }
    (candidate_years / required_years).max(0.0)
}
