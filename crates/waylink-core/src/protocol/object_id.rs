//! Client-side object-id allocation.
//!
//! Every Wayland object is named by a 32-bit id known to both sides.  The
//! client owns the numbering authority for ids it proposes: when a request
//! creates a new remote object (e.g. `get_registry`), the client picks the
//! id and sends it as a new-id argument.  Id 1 is reserved for the
//! pre-existing `wl_display` object, so client allocation starts at 2.
//!
//! The invariant this module protects is simple: an id that may still be
//! live is never handed out twice.  The allocator is strictly sequential and
//! never reuses or wraps; running off the end of the 32-bit space is an
//! error, not a wraparound into live ids.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::protocol::codec::WireError;

/// First id the client may propose; everything below is reserved or
/// well-known (`wl_display` is id 1, id 0 means "null object").
pub const FIRST_CLIENT_ID: u32 = 2;

/// Hands out client-side object ids sequentially, starting at
/// [`FIRST_CLIENT_ID`].
///
/// The counter is atomic so an allocator shared between threads still never
/// produces the same id twice, although this transport layer itself is
/// single-threaded.
///
/// # Examples
///
/// ```rust
/// use waylink_core::ObjectIdAllocator;
///
/// let ids = ObjectIdAllocator::new();
/// assert_eq!(ids.next().unwrap(), 2);
/// assert_eq!(ids.next().unwrap(), 3);
/// ```
pub struct ObjectIdAllocator {
    next: AtomicU32,
}

impl ObjectIdAllocator {
    /// Creates an allocator whose first id is [`FIRST_CLIENT_ID`].
    pub fn new() -> Self {
        Self {
            next: AtomicU32::new(FIRST_CLIENT_ID),
        }
    }

    /// Returns the next unused object id.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::ObjectIdsExhausted`] once the 32-bit space is
    /// used up.  The counter does not wrap: reusing a live id would make the
    /// compositor address the wrong object.
    pub fn next(&self) -> Result<u32, WireError> {
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
            .map_err(|_| WireError::ObjectIdsExhausted)
    }

    /// Returns the id the next call to [`next`](Self::next) would hand out,
    /// without allocating it.  Useful for logging and diagnostics.
    pub fn peek(&self) -> u32 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for ObjectIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
