//! Selection among fixed-capacity arrays of optional channel pointers.

/// Index of the first non-null slot, scanning from slot 0. The lowest
/// populated index always wins.
pub fn first_populated<T, const N: usize>(slots: &[*mut T; N]) -> Option<usize> {
    slots.iter().position(|slot| !slot.is_null())
}
