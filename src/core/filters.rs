use crate::models::UserProfile;

/// Check if a profile may appear in the candidate pool for `self_id`
///
/// The store already scans eligible profiles only; this re-check keeps
/// the engine correct when handed an unfiltered pool.
#[inline]
pub fn is_candidate(profile: &UserProfile, self_id: &str) -> bool {
    if profile.id == self_id {
        return false;
    }

    profile.is_eligible()
}
