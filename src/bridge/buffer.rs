//! Caller-owned arrays crossing the boundary.
//!
//! A managed runtime has to pin an array before native code may touch its
//! elements, and unpin it afterwards. [`HostArray`] models that pair of
//! calls; [`ArrayLock`] holds the pin for the duration of one bridged
//! operation and releases it when dropped, so early returns and `?` exits
//! unpin as reliably as the success path.

use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::Result;
use std::ops::{Deref, DerefMut};

/// An array owned by the caller of the bridge
pub trait HostArray<T> {
    /// Pins the array so its elements stay addressable
    fn lock(&mut self) {}

    /// Releases a pin taken by [`HostArray::lock`]
    fn unlock(&mut self) {}

    fn as_slice(&self) -> &[T];

    fn as_mut_slice(&mut self) -> &mut [T];
}

impl<T> HostArray<T> for [T] {
    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T, const N: usize> HostArray<T> for [T; N] {
    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T> HostArray<T> for Vec<T> {
    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

/// A pinned host array, unpinned on drop
pub struct ArrayLock<'a, T, A: HostArray<T> + ?Sized> {
    array: &'a mut A,
    _element: std::marker::PhantomData<T>,
}

impl<'a, T, A: HostArray<T> + ?Sized> ArrayLock<'a, T, A> {
    pub fn acquire(array: &'a mut A) -> Self {
        array.lock();
        log::trace!("locked host array of {} elements", array.as_slice().len());
        Self {
            array,
            _element: std::marker::PhantomData,
        }
    }

    /// Returns `len` elements starting at `offset`, checked against the array bounds
    pub fn range(&self, offset: i32, len: i32) -> Result<&[T]> {
        let capacity = self.len();
        let out_of_range = PhysicsError::BufferOutOfRange { offset, len, capacity };
        if offset < 0 || len < 0 {
            return Err(out_of_range);
        }
        let start = offset as usize;
        let end = start.checked_add(len as usize).ok_or(out_of_range.clone())?;
        self.get(start..end).ok_or(out_of_range)
    }

    /// Fails unless the array can hold `required` elements
    pub fn require(&self, required: usize) -> Result<()> {
        if self.len() < required {
            return Err(PhysicsError::BufferTooSmall {
                required,
                actual: self.len(),
            });
        }
        Ok(())
    }

    /// Writes `values` at the front of the array, all or nothing
    pub fn write(&mut self, values: &[T]) -> Result<()>
    where
        T: Copy,
    {
        self.require(values.len())?;
        self[..values.len()].copy_from_slice(values);
        Ok(())
    }
}

impl<'a, T, A: HostArray<T> + ?Sized> Deref for ArrayLock<'a, T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.array.as_slice()
    }
}

impl<'a, T, A: HostArray<T> + ?Sized> DerefMut for ArrayLock<'a, T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.array.as_mut_slice()
    }
}

impl<'a, T, A: HostArray<T> + ?Sized> Drop for ArrayLock<'a, T, A> {
    fn drop(&mut self) {
        self.array.unlock();
        log::trace!("unlocked host array");
    }
}

/// Converts interleaved `x, y` coordinates into points, ignoring a trailing odd element
pub fn to_points(coords: &[f32]) -> Vec<Vector2> {
    coords
        .chunks_exact(2)
        .map(|pair| Vector2::new(pair[0], pair[1]))
        .collect()
}
