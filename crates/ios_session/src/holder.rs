//! Per-thread slot for the current device session
//!
//! Lets code deep in a call chain reach "the" session for its thread
//! without parameter threading. Each thread sees only its own slot;
//! storing a session here never extends or shortens its life beyond the
//! `Arc` clone the slot holds.

use crate::wda::DeviceSession;
use std::cell::RefCell;
use std::sync::Arc;

thread_local! {
    static CURRENT_SESSION: RefCell<Option<Arc<DeviceSession>>> = const { RefCell::new(None) };
}

/// Associates the calling thread with at most one current session.
///
/// State machine per thread: unset until `set`, set until `clear`, and a
/// repeated `set` replaces the prior association. A replaced or cleared
/// session is never quit here; teardown stays with the owner.
pub struct SessionHolder;

impl SessionHolder {
    /// Make `session` the calling thread's current session, replacing
    /// any prior association
    pub fn set(session: Arc<DeviceSession>) {
        CURRENT_SESSION.with(|slot| {
            *slot.borrow_mut() = Some(session);
        });
    }

    /// The calling thread's current session, if one was set
    pub fn get() -> Option<Arc<DeviceSession>> {
        CURRENT_SESSION.with(|slot| slot.borrow().clone())
    }

    /// Remove the calling thread's association, returning the session it
    /// held
    pub fn clear() -> Option<Arc<DeviceSession>> {
        CURRENT_SESSION.with(|slot| slot.borrow_mut().take())
    }
}
