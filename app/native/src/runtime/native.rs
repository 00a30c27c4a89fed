//! `libobjc`-backed runtime.
//!
//! On macOS this goes through the `objc` crate, which links `libobjc` and
//! calls `objc_getClass`, `sel_registerName` and `objc_msgSend` with the
//! native C ABI. With the crate's `exception` feature, Objective-C exceptions
//! thrown during a send are caught and returned as errors instead of aborting.
//!
//! Other hosts get a stand-in that fails every call; the platform gate in
//! [`MenuBarFix`](crate::fix::MenuBarFix) keeps it from ever being reached.

#[cfg(target_os = "macos")]
pub use macos::NativeRuntime;
#[cfg(not(target_os = "macos"))]
pub use unsupported::NativeRuntime;

#[cfg(target_os = "macos")]
mod macos {
    use std::ffi::c_void;

    use objc::Message;
    use objc::runtime::{Class, Object, Sel};

    use crate::error::BridgeError;
    use crate::runtime::{ClassHandle, ObjcRuntime, ObjectHandle, SelectorHandle, is_c_name};

    /// The process's Objective-C runtime.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct NativeRuntime;

    fn native_call(err: impl std::fmt::Display) -> BridgeError {
        BridgeError::NativeCall(err.to_string())
    }

    /// Reborrows a handle as the object the runtime gave us.
    ///
    /// # Safety
    ///
    /// `receiver` must point at a live Objective-C object or class.
    unsafe fn receiver_ref<'a>(receiver: ObjectHandle) -> &'a Object {
        // SAFETY: guaranteed by the caller.
        unsafe { &*receiver.as_ptr().cast::<Object>() }
    }

    impl ObjcRuntime for NativeRuntime {
        fn resolve_class(&self, name: &str) -> Result<ClassHandle, BridgeError> {
            let not_found = || BridgeError::ClassNotFound { name: name.to_owned() };
            if !is_c_name(name) {
                return Err(not_found());
            }

            let class = Class::get(name).ok_or_else(not_found)?;
            let ptr = std::ptr::from_ref(class).cast_mut().cast::<c_void>();

            // SAFETY: the pointer was just returned by `objc_getClass`.
            unsafe { ClassHandle::from_ptr(ptr) }.ok_or_else(not_found)
        }

        fn resolve_selector(&self, name: &str) -> Result<SelectorHandle, BridgeError> {
            let unresolved = || BridgeError::SelectorResolution { name: name.to_owned() };
            if !is_c_name(name) {
                return Err(unresolved());
            }

            let sel = Sel::register(name);

            // SAFETY: the pointer was just returned by `sel_registerName`.
            unsafe { SelectorHandle::from_ptr(sel.as_ptr().cast_mut()) }.ok_or_else(unresolved)
        }

        fn send_message(
            &self,
            receiver: ObjectHandle,
            selector: SelectorHandle,
        ) -> Result<Option<ObjectHandle>, BridgeError> {
            // SAFETY: handles are only minted from runtime-returned pointers.
            let result: *mut Object = unsafe {
                let sel = Sel::from_ptr(selector.as_ptr().cast_const());
                receiver_ref(receiver).send_message(sel, ())
            }
            .map_err(native_call)?;

            // SAFETY: `result` is nil or an object returned by the runtime.
            Ok(unsafe { ObjectHandle::from_ptr(result.cast()) })
        }

        fn send_message_with_uint(
            &self,
            receiver: ObjectHandle,
            selector: SelectorHandle,
            arg: u64,
        ) -> Result<(), BridgeError> {
            // NSUInteger is `unsigned long`, the platform word.
            let arg = usize::try_from(arg)
                .map_err(|_| BridgeError::NativeCall(format!("{arg:#x} does not fit NSUInteger")))?;

            // SAFETY: handles are only minted from runtime-returned pointers.
            unsafe {
                let sel = Sel::from_ptr(selector.as_ptr().cast_const());
                receiver_ref(receiver).send_message::<(usize,), ()>(sel, (arg,))
            }
            .map_err(native_call)
        }
    }
}

#[cfg(not(target_os = "macos"))]
mod unsupported {
    use crate::error::BridgeError;
    use crate::runtime::{ClassHandle, ObjcRuntime, ObjectHandle, SelectorHandle};

    /// Placeholder for hosts without an Objective-C runtime.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct NativeRuntime;

    fn unavailable() -> BridgeError {
        BridgeError::NativeCall(format!(
            "Objective-C runtime is not available on {}",
            std::env::consts::OS
        ))
    }

    impl ObjcRuntime for NativeRuntime {
        fn resolve_class(&self, _name: &str) -> Result<ClassHandle, BridgeError> {
            Err(unavailable())
        }

        fn resolve_selector(&self, _name: &str) -> Result<SelectorHandle, BridgeError> {
            Err(unavailable())
        }

        fn send_message(
            &self,
            _receiver: ObjectHandle,
            _selector: SelectorHandle,
        ) -> Result<Option<ObjectHandle>, BridgeError> {
            Err(unavailable())
        }

        fn send_message_with_uint(
            &self,
            _receiver: ObjectHandle,
            _selector: SelectorHandle,
            _arg: u64,
        ) -> Result<(), BridgeError> {
            Err(unavailable())
        }
    }
}
