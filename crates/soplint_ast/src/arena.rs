//! Arena allocator for tree nodes.
//!
//! All nodes of one document share a `bumpalo` arena and are freed together
//! once the document has been linted.

use bumpalo::Bump;

/// Arena allocator for document tree nodes.
///
/// # Example
///
/// ```rust
/// use soplint_ast::AstArena;
///
/// let arena = AstArena::new();
///
/// let value = arena.alloc(42u32);
/// assert_eq!(*value, 42);
///
/// let s = arena.alloc_str("hello");
/// assert_eq!(s, "hello");
/// ```
pub struct AstArena {
    bump: Bump,
}

impl AstArena {
    /// Creates a new arena allocator.
    #[inline]
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Creates a new arena sized for a source of the given length.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Allocates a value in the arena and returns a reference to it.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Allocates a string slice in the arena.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Allocates a slice in the arena by copying from the input slice.
    #[inline]
    pub fn alloc_slice_copy<T: Copy>(&self, slice: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(slice)
    }

    /// Allocates a slice from an exact-size iterator.
    #[inline]
    pub fn alloc_slice_fill_iter<T, I>(&self, iter: I) -> &[T]
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.bump.alloc_slice_fill_iter(iter)
    }

    /// Returns the total bytes allocated in this arena.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for AstArena {
    fn default() -> Self {
        Self::new()
    }
}
