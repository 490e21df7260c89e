use std::ops::{Deref, Index};
use std::slice;

/// Row-major 2-D buffer: element `(x, y)` lives at `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer2<T> {
    values: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Buffer2<T> {
    pub fn new(width: usize, height: usize, values: Vec<T>) -> Self {
        assert_eq!(
            values.len(),
            width * height,
            "values length must equal width * height"
        );
        Self {
            values,
            width,
            height,
        }
    }

    /// Builds a buffer by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Self {
            values,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if self.contains(x, y) {
            Some(&self.values[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.values.iter()
    }
}

impl<T> Index<(usize, usize)> for Buffer2<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        debug_assert!(self.contains(x, y));
        &self.values[y * self.width + x]
    }
}

impl<T> Deref for Buffer2<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.values
    }
}
