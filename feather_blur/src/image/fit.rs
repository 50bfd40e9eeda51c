use crate::Float;

use super::PixelData;

/// Remaps `values` from `[old_min, old_max]` towards `[new_min, new_max]` in place.
///
/// Values are shifted by `new_min - old_min` first and then scaled by
/// `new_max / old_max`, so ranges not starting at zero are not mapped affinely.
pub fn fit<S: Float>(values: &mut PixelData<S>, old_min: S, old_max: S, new_min: S, new_max: S) {
    let shift = new_min - old_min;
    let factor = new_max / old_max;
    for value in values.pixels_mut() {
        *value = (*value + shift) * factor;
    }
}
