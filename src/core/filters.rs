use crate::models::Profile;

/// Check whether a candidate survives the seeker's hard filters.
///
/// Hard filters reject outright; they never influence ordering. Distance
/// is checked separately because it needs the exact Haversine value, which
/// the ranking stage also reports.
#[inline]
pub fn passes_hard_filters(seeker: &Profile, candidate: &Profile) -> bool {
    // Never surface the seeker to themselves
    if candidate.user_id == seeker.user_id {
        return false;
    }

    let prefs = &seeker.preferences;

    // Age range is inclusive on both ends
    if candidate.age < prefs.min_age || candidate.age > prefs.max_age {
        return false;
    }

    if !prefs.gender_preference.accepts(candidate.gender) {
        return false;
    }

    true
}
