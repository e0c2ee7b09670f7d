//! Shift schedule resolution: a store's own schedule when it has one, the
//! configured default otherwise. Absence of data is never an error.

use crate::models::schedule::ShiftSchedule;
use crate::models::shift::ShiftKey;
use std::collections::BTreeMap;

/// Custom schedules keyed by store id, as loaded from the store configuration.
pub type StoreSchedules = BTreeMap<String, ShiftSchedule>;

/// Complete `custom` with the windows of `default` it does not define.
/// `None` or an empty custom schedule yields `default` unchanged.
pub fn resolve(custom: Option<&ShiftSchedule>, default: &ShiftSchedule) -> ShiftSchedule {
    let Some(custom) = custom.filter(|c| !c.is_empty()) else {
        return default.clone();
    };

    let mut out = default.clone();
    for key in ShiftKey::ALL {
        if let Some(w) = custom.get(key) {
            out.set(key, *w);
        }
    }
    out
}

/// Schedule for `store_id`; a missing store id or a store without custom
/// shifts falls back to `default`.
pub fn resolve_for_store(
    store_id: Option<&str>,
    stores: &StoreSchedules,
    default: &ShiftSchedule,
) -> ShiftSchedule {
    resolve(store_id.and_then(|id| stores.get(id)), default)
}
