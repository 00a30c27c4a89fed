//! Minimal bridge to the Objective-C runtime.
//!
//! Exposes exactly four primitives: class lookup, selector lookup, a
//! no-argument message send returning an object, and a message send taking a
//! single unsigned integer and returning nothing. Nothing here logs, retries
//! or interprets results.
//!
//! [`NativeRuntime`] is the real runtime, backed by `libobjc` on macOS.

mod native;
#[cfg(test)]
pub(crate) mod recording;

use std::ffi::c_void;
use std::num::NonZeroUsize;
use std::sync::Arc;

pub use native::NativeRuntime;

use crate::error::BridgeError;

macro_rules! opaque_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(NonZeroUsize);

        impl $name {
            /// Wraps a raw runtime pointer, returning `None` for nil.
            ///
            /// # Safety
            ///
            /// `ptr` must be nil or a value produced by the runtime that the
            /// handle will later be passed back to.
            #[must_use]
            pub unsafe fn from_ptr(ptr: *mut c_void) -> Option<Self> {
                NonZeroUsize::new(ptr.expose_provenance()).map(Self)
            }

            /// Returns the raw runtime pointer.
            #[must_use]
            pub fn as_ptr(self) -> *mut c_void {
                std::ptr::with_exposed_provenance_mut(self.0.get())
            }

            /// Returns the address, for diagnostics.
            #[must_use]
            pub const fn addr(self) -> usize { self.0.get() }
        }
    };
}

opaque_handle!(
    /// Opaque reference to an Objective-C class object.
    ClassHandle
);

opaque_handle!(
    /// Opaque reference to a registered selector.
    SelectorHandle
);

opaque_handle!(
    /// Opaque reference to an Objective-C object instance.
    ObjectHandle
);

/// A class is itself an object and can receive class messages.
impl From<ClassHandle> for ObjectHandle {
    fn from(class: ClassHandle) -> Self { Self(class.0) }
}

/// The four foreign operations the presentation controller needs.
///
/// Implementations must be callable from the exit finalizer thread.
pub trait ObjcRuntime: Send + Sync {
    /// Looks up a class by name (`objc_getClass`).
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ClassNotFound`] when the runtime yields nil.
    fn resolve_class(&self, name: &str) -> Result<ClassHandle, BridgeError>;

    /// Registers or looks up a selector by name (`sel_registerName`).
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::SelectorResolution`] when the runtime yields nil
    /// or the name cannot be registered.
    fn resolve_selector(&self, name: &str) -> Result<SelectorHandle, BridgeError>;

    /// Sends a message without arguments and returns the object it yields.
    ///
    /// A nil return is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NativeCall`] if the send itself fails.
    fn send_message(
        &self,
        receiver: ObjectHandle,
        selector: SelectorHandle,
    ) -> Result<Option<ObjectHandle>, BridgeError>;

    /// Sends a message with one `NSUInteger` argument and no return value.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NativeCall`] if the send fails or `arg` does not
    /// fit the platform word.
    fn send_message_with_uint(
        &self,
        receiver: ObjectHandle,
        selector: SelectorHandle,
        arg: u64,
    ) -> Result<(), BridgeError>;
}

impl<T: ObjcRuntime + ?Sized> ObjcRuntime for Arc<T> {
    fn resolve_class(&self, name: &str) -> Result<ClassHandle, BridgeError> {
        (**self).resolve_class(name)
    }

    fn resolve_selector(&self, name: &str) -> Result<SelectorHandle, BridgeError> {
        (**self).resolve_selector(name)
    }

    fn send_message(
        &self,
        receiver: ObjectHandle,
        selector: SelectorHandle,
    ) -> Result<Option<ObjectHandle>, BridgeError> {
        (**self).send_message(receiver, selector)
    }

    fn send_message_with_uint(
        &self,
        receiver: ObjectHandle,
        selector: SelectorHandle,
        arg: u64,
    ) -> Result<(), BridgeError> {
        (**self).send_message_with_uint(receiver, selector, arg)
    }
}

/// Returns `true` if `name` can be handed to the runtime as a C string.
#[cfg(any(target_os = "macos", test))]
pub(crate) fn is_c_name(name: &str) -> bool { !name.is_empty() && !name.contains('\0') }

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_ptr(addr: usize) -> *mut c_void { std::ptr::without_provenance_mut(addr) }

    #[test]
    fn test_nil_pointer_yields_no_handle() {
        let handle = unsafe { ObjectHandle::from_ptr(std::ptr::null_mut()) };
        assert!(handle.is_none());
    }

    #[test]
    fn test_handle_preserves_address() {
        let handle = unsafe { SelectorHandle::from_ptr(fake_ptr(0x1000)) }.unwrap();
        assert_eq!(handle.addr(), 0x1000);
        assert_eq!(handle.as_ptr().addr(), 0x1000);
    }

    #[test]
    fn test_class_handle_converts_to_object_handle() {
        let class = unsafe { ClassHandle::from_ptr(fake_ptr(0x2000)) }.unwrap();
        let object: ObjectHandle = class.into();
        assert_eq!(object.addr(), class.addr());
    }

    #[test]
    fn test_handles_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + Copy>() {}
        assert_send_sync::<ClassHandle>();
        assert_send_sync::<SelectorHandle>();
        assert_send_sync::<ObjectHandle>();
    }

    #[test]
    fn test_is_c_name() {
        assert!(is_c_name("setPresentationOptions:"));
        assert!(!is_c_name(""));
        assert!(!is_c_name("bad\0name"));
    }
}
