//! Bounds-checked, zero-copy access to arrays living in foreign memory.

use std::fmt;
use std::marker::PhantomData;
use std::mem::align_of;

use crate::error::ViewError;

/// An indexed view over `len` contiguous `T` records owned by someone else.
///
/// Element `i` lives at `base + i * size_of::<T>()`. The view never frees
/// or mutates what it points at, and every indexed read is checked
/// against `len`.
pub struct ForeignArrayView<'a, T> {
    base: *const T,
    len: usize,
    _marker: PhantomData<&'a [T]>,
}

impl<'a, T> ForeignArrayView<'a, T> {
    /// Wrap a foreign array.
    ///
    /// A null `base` is accepted only together with `len == 0`; a null
    /// base with a nonzero count is reported as [`ViewError::NullBase`].
    ///
    /// # Safety
    /// If `base` is non-null it must point to `len` initialized, properly
    /// aligned `T` values that stay valid and unmodified for `'a`.
    pub unsafe fn new(base: *const T, len: usize) -> Result<Self, ViewError> {
        if base.is_null() && len > 0 {
            return Err(ViewError::NullBase { len });
        }
        debug_assert!(base as usize % align_of::<T>() == 0);
        Ok(Self {
            base,
            len,
            _marker: PhantomData,
        })
    }

    /// Like [`new`](Self::new), but a null base means "channel not present"
    /// and yields `None` regardless of `len`.
    ///
    /// # Safety
    /// Same contract as [`new`](Self::new).
    pub unsafe fn optional(base: *const T, len: usize) -> Option<Self> {
        if base.is_null() {
            None
        } else {
            Some(Self {
                base,
                len,
                _marker: PhantomData,
            })
        }
    }

    /// A view with no elements.
    pub fn empty() -> Self {
        Self {
            base: std::ptr::null(),
            len: 0,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read element `index`. Fails with [`ViewError::OutOfBounds`] for
    /// `index >= len`.
    pub fn get(&self, index: usize) -> Result<&'a T, ViewError> {
        if index >= self.len {
            return Err(ViewError::OutOfBounds {
                index,
                len: self.len,
            });
        }
        // SAFETY: index < len, and the constructor's contract covers the
        // whole range.
        Ok(unsafe { &*self.base.add(index) })
    }

    /// Iterate over every element in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + 'a
    where
        T: 'a,
    {
        let view = *self;
        (0..view.len).map(move |i| {
            // SAFETY: i < len.
            unsafe { &*view.base.add(i) }
        })
    }

    /// Lazily transform every element. Collect the result to get data that
    /// outlives the foreign memory.
    pub fn map<U, F>(&self, f: F) -> impl Iterator<Item = U> + 'a
    where
        T: 'a,
        F: FnMut(&'a T) -> U + 'a,
    {
        self.iter().map(f)
    }
}

impl<T> Clone for ForeignArrayView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ForeignArrayView<'_, T> {}

impl<T> fmt::Debug for ForeignArrayView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignArrayView")
            .field("base", &self.base)
            .field("len", &self.len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_reads_follow_element_stride() {
        let data = [10u64, 20, 30];
        let view = unsafe { ForeignArrayView::new(data.as_ptr(), data.len()) }.unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(*view.get(0).unwrap(), 10);
        assert_eq!(*view.get(2).unwrap(), 30);
        assert_eq!(
            view.get(2).unwrap() as *const u64 as usize - data.as_ptr() as usize,
            2 * std::mem::size_of::<u64>()
        );
    }

    #[test]
    fn index_at_len_is_out_of_bounds() {
        let data = [1.0f64, 2.0];
        let view = unsafe { ForeignArrayView::new(data.as_ptr(), 2) }.unwrap();
        assert_eq!(
            view.get(2),
            Err(ViewError::OutOfBounds { index: 2, len: 2 })
        );
        assert!(view.get(usize::MAX).is_err());
    }

    #[test]
    fn null_base_with_count_is_rejected() {
        let result = unsafe { ForeignArrayView::<f64>::new(std::ptr::null(), 4) };
        assert!(matches!(result, Err(ViewError::NullBase { len: 4 })));
    }

    #[test]
    fn null_base_with_zero_count_is_empty() {
        let view = unsafe { ForeignArrayView::<f64>::new(std::ptr::null(), 0) }.unwrap();
        assert!(view.is_empty());
        assert_eq!(view.iter().count(), 0);
        assert!(view.get(0).is_err());
    }

    #[test]
    fn optional_treats_null_as_absent() {
        assert!(unsafe { ForeignArrayView::<u32>::optional(std::ptr::null(), 9) }.is_none());
        let data = [7u32];
        let view = unsafe { ForeignArrayView::optional(data.as_ptr(), 1) }.unwrap();
        assert_eq!(*view.get(0).unwrap(), 7);
    }

    #[test]
    fn map_collects_owned_values() {
        let data = [1i32, 2, 3];
        let view = unsafe { ForeignArrayView::new(data.as_ptr(), 3) }.unwrap();
        let doubled: Vec<i32> = view.map(|v| v * 2).collect();
        assert_eq!(doubled, vec![2, 4, 6]);
    }
}
