//! Recording runtime for tests.
//!
//! Mints fake handles, remembers which name each handle stands for, and
//! records every call so tests can assert the exact foreign-call sequence.

use std::collections::{HashMap, HashSet};
use std::ffi::c_void;

use parking_lot::Mutex;

use crate::error::BridgeError;
use crate::runtime::{ClassHandle, ObjcRuntime, ObjectHandle, SelectorHandle};

/// Name of the object returned for `[NSApplication sharedApplication]`.
pub const SHARED_APP: &str = "NSApp";

/// One recorded foreign call, with handles translated back to names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ResolveClass(String),
    ResolveSelector(String),
    Send { receiver: String, selector: String },
    SendUint { receiver: String, selector: String, arg: u64 },
}

impl Call {
    pub fn class(name: &str) -> Self { Self::ResolveClass(name.to_string()) }

    pub fn selector(name: &str) -> Self { Self::ResolveSelector(name.to_string()) }

    pub fn send(receiver: &str, selector: &str) -> Self {
        Self::Send { receiver: receiver.to_string(), selector: selector.to_string() }
    }

    pub fn send_uint(receiver: &str, selector: &str, arg: u64) -> Self {
        Self::SendUint { receiver: receiver.to_string(), selector: selector.to_string(), arg }
    }
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    names: HashMap<usize, String>,
    next_addr: usize,
}

impl State {
    fn mint(&mut self, name: &str) -> *mut c_void {
        if let Some((&addr, _)) = self.names.iter().find(|(_, n)| n.as_str() == name) {
            return std::ptr::without_provenance_mut(addr);
        }
        self.next_addr += 0x10;
        self.names.insert(self.next_addr, name.to_string());
        std::ptr::without_provenance_mut(self.next_addr)
    }

    fn name_of(&self, addr: usize) -> String {
        self.names.get(&addr).cloned().unwrap_or_else(|| format!("{addr:#x}"))
    }
}

/// In-memory [`ObjcRuntime`] that never touches a real runtime.
#[derive(Debug, Default)]
pub struct RecordingRuntime {
    state: Mutex<State>,
    missing_classes: HashSet<String>,
    failing_selectors: HashSet<String>,
    nil_shared_application: bool,
    failing_sends: bool,
}

impl RecordingRuntime {
    pub fn new() -> Self { Self::default() }

    /// Makes `resolve_class(name)` return nil.
    pub fn without_class(mut self, name: &str) -> Self {
        self.missing_classes.insert(name.to_string());
        self
    }

    /// Makes `resolve_selector(name)` return nil.
    pub fn without_selector(mut self, name: &str) -> Self {
        self.failing_selectors.insert(name.to_string());
        self
    }

    /// Makes `sharedApplication` return nil.
    pub fn with_nil_shared_application(mut self) -> Self {
        self.nil_shared_application = true;
        self
    }

    /// Makes every integer send fail as if an exception was raised.
    pub fn with_failing_sends(mut self) -> Self {
        self.failing_sends = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> { self.state.lock().calls.clone() }

    /// The last integer argument sent, if any.
    pub fn last_uint(&self) -> Option<u64> {
        self.state.lock().calls.iter().rev().find_map(|call| match call {
            Call::SendUint { arg, .. } => Some(*arg),
            _ => None,
        })
    }

    /// Integer arguments sent with `selector`, in order.
    pub fn uint_args(&self, selector: &str) -> Vec<u64> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::SendUint { selector: s, arg, .. } if s == selector => Some(*arg),
                _ => None,
            })
            .collect()
    }
}

impl ObjcRuntime for RecordingRuntime {
    fn resolve_class(&self, name: &str) -> Result<ClassHandle, BridgeError> {
        let mut state = self.state.lock();
        state.calls.push(Call::class(name));
        if self.missing_classes.contains(name) {
            return Err(BridgeError::ClassNotFound { name: name.to_string() });
        }
        let ptr = state.mint(name);
        // SAFETY: `ptr` is a non-null address minted by this runtime and is
        // only ever passed back to it, never dereferenced.
        unsafe { ClassHandle::from_ptr(ptr) }
            .ok_or_else(|| BridgeError::ClassNotFound { name: name.to_string() })
    }

    fn resolve_selector(&self, name: &str) -> Result<SelectorHandle, BridgeError> {
        let mut state = self.state.lock();
        state.calls.push(Call::selector(name));
        if self.failing_selectors.contains(name) {
            return Err(BridgeError::SelectorResolution { name: name.to_string() });
        }
        let ptr = state.mint(name);
        // SAFETY: as above, the address is minted here and never dereferenced.
        unsafe { SelectorHandle::from_ptr(ptr) }
            .ok_or_else(|| BridgeError::SelectorResolution { name: name.to_string() })
    }

    fn send_message(
        &self,
        receiver: ObjectHandle,
        selector: SelectorHandle,
    ) -> Result<Option<ObjectHandle>, BridgeError> {
        let mut state = self.state.lock();
        let receiver = state.name_of(receiver.addr());
        let selector = state.name_of(selector.addr());
        state.calls.push(Call::send(&receiver, &selector));

        if selector != "sharedApplication" || self.nil_shared_application {
            return Ok(None);
        }
        let ptr = state.mint(SHARED_APP);
        // SAFETY: the address is minted here and never dereferenced.
        Ok(unsafe { ObjectHandle::from_ptr(ptr) })
    }

    fn send_message_with_uint(
        &self,
        receiver: ObjectHandle,
        selector: SelectorHandle,
        arg: u64,
    ) -> Result<(), BridgeError> {
        let mut state = self.state.lock();
        let receiver = state.name_of(receiver.addr());
        let selector = state.name_of(selector.addr());
        state.calls.push(Call::send_uint(&receiver, &selector, arg));

        if self.failing_sends {
            return Err(BridgeError::NativeCall(format!("-[{receiver} {selector}] raised")));
        }
        Ok(())
    }
}
