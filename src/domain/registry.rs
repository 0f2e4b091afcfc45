//! Process-wide tables that let host values travel through GLPK callbacks.
//!
//! GLPK callbacks carry a single `void *`. Instead of leaking a pointer to a
//! host object, a value is stored in a [`Registry`] and the callback receives
//! an opaque handle encoding the slot index and its generation. A handle
//! whose slot was freed (or reused) resolves to nothing.

use std::ffi::c_void;
use std::sync::Arc;

use parking_lot::{const_mutex, Mutex};

use crate::domain::cancel::CancelContext;
use crate::logger::Logger;

/// Loggers of solves currently running
pub(crate) static LOGGERS: Registry<Arc<dyn Logger>> = Registry::new();

/// Cancellation contexts of solves currently running
pub(crate) static CANCELS: Registry<CancelContext> = Registry::new();

const HALF: u32 = usize::BITS / 2;
const MASK: usize = (1 << HALF) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Handle {
    index: usize,
    generation: usize,
}

impl Handle {
    /// Never null, so GLPK and the trampolines can tell it from "no data"
    pub(crate) fn into_raw(self) -> *mut c_void {
        let packed = (self.index << HALF) | self.generation;
        (packed + 1) as *mut c_void
    }

    pub(crate) fn from_raw(ptr: *mut c_void) -> Option<Handle> {
        let packed = (ptr as usize).checked_sub(1)?;
        Some(Handle {
            index: packed >> HALF,
            generation: packed & MASK,
        })
    }
}

struct Slot<T> {
    generation: usize,
    value: Option<T>,
}

struct Slots<T> {
    entries: Vec<Slot<T>>,
    free: Vec<usize>,
    len: usize,
}

pub(crate) struct Registry<T> {
    slots: Mutex<Slots<T>>,
}

impl<T: Clone> Registry<T> {
    pub(crate) const fn new() -> Self {
        Registry {
            slots: const_mutex(Slots {
                entries: Vec::new(),
                free: Vec::new(),
                len: 0,
            }),
        }
    }

    /// Store `value` until the returned guard is dropped
    pub(crate) fn register(&self, value: T) -> Registration<'_, T> {
        let mut slots = self.slots.lock();
        let index = match slots.free.pop() {
            Some(index) => {
                slots.entries[index].value = Some(value);
                index
            }
            None => {
                let index = slots.entries.len();
                assert!(index < MASK, "handle registry exhausted");
                slots.entries.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                index
            }
        };
        slots.len += 1;
        let handle = Handle {
            index,
            generation: slots.entries[index].generation,
        };
        Registration {
            registry: self,
            handle,
        }
    }

    /// Clone of the value behind `handle`, if it is still registered
    pub(crate) fn resolve(&self, handle: Handle) -> Option<T> {
        let slots = self.slots.lock();
        let slot = slots.entries.get(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.clone()
    }

    pub(crate) fn resolve_ptr(&self, ptr: *mut c_void) -> Option<T> {
        Handle::from_raw(ptr).and_then(|handle| self.resolve(handle))
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.lock().len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn unregister(&self, handle: Handle) {
        let mut slots = self.slots.lock();
        let Some(slot) = slots.entries.get_mut(handle.index) else {
            return;
        };
        if slot.generation != handle.generation || slot.value.is_none() {
            return;
        }
        slot.value = None;
        slot.generation = (slot.generation + 1) & MASK;
        slots.free.push(handle.index);
        slots.len -= 1;
    }
}

/// Keeps a value registered; unregisters it on drop
pub(crate) struct Registration<'r, T: Clone> {
    registry: &'r Registry<T>,
    handle: Handle,
}

impl<T: Clone> Registration<'_, T> {
    #[cfg(test)]
    pub(crate) fn handle(&self) -> Handle {
        self.handle
    }

    pub(crate) fn as_ptr(&self) -> *mut c_void {
        self.handle.into_raw()
    }
}

impl<T: Clone> Drop for Registration<'_, T> {
    fn drop(&mut self) {
        self.registry.unregister(self.handle);
    }
}

/// True when no solve holds a registration
pub fn registries_are_empty() -> bool {
    LOGGERS.is_empty() && CANCELS.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_register_and_resolve() {
        let registry: Registry<&'static str> = Registry::new();
        let registration = registry.register("logger");
        assert_eq!(registry.resolve(registration.handle()), Some("logger"));
        assert_eq!(registry.resolve_ptr(registration.as_ptr()), Some("logger"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_drop_unregisters() {
        let registry: Registry<u32> = Registry::new();
        let handle = {
            let registration = registry.register(7);
            registration.handle()
        };
        assert!(registry.is_empty());
        assert_eq!(registry.resolve(handle), None);
    }

    #[test]
    fn test_reused_slot_rejects_stale_handle() {
        let registry: Registry<u32> = Registry::new();
        let stale = registry.register(1).handle();
        let fresh = registry.register(2);
        assert_eq!(fresh.handle().index, stale.index);
        assert_eq!(registry.resolve(stale), None);
        assert_eq!(registry.resolve(fresh.handle()), Some(2));
    }

    #[test]
    fn test_null_pointer_resolves_to_nothing() {
        let registry: Registry<u32> = Registry::new();
        let _registration = registry.register(1);
        assert_eq!(registry.resolve_ptr(ptr::null_mut()), None);
    }

    #[test]
    fn test_handle_pointer_round_trip() {
        let handle = Handle {
            index: 12,
            generation: 3,
        };
        let ptr = handle.into_raw();
        assert!(!ptr.is_null());
        assert_eq!(Handle::from_raw(ptr), Some(handle));
    }
}
