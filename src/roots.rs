//! The root stack: trace entry points for objects living in the region.
//!
//! Objects relocated into the region drop out of the ordinary stack/heap
//! reachability graph, so the collector records them here and a later trace
//! phase pops them to re-seed its analysis. The stack is consumed, not
//! iterated; anything that must survive another cycle is re-pushed by the
//! tracer.

use std::sync::Mutex;

use crate::error::TierSpaceError;
use crate::util::ObjectReference;

/// A LIFO of root references with its own internal lock, independent of the
/// region's. Pushes come from parallel root-discovery workers; pops from one
/// or more tracer threads. The stack records *that* a reference is a root,
/// nothing about the object's storage, so duplicate pushes are legal and pop
/// as duplicates.
pub struct RootStack {
    stack: Mutex<Vec<ObjectReference>>,
}

impl RootStack {
    pub fn new() -> Self {
        RootStack {
            stack: Mutex::new(Vec::new()),
        }
    }

    /// Push a root. Always succeeds; growth of the backing storage is a
    /// resource concern, not an error condition.
    pub fn push(&self, reference: ObjectReference) {
        self.stack.lock().unwrap().push(reference);
    }

    /// Pop the most recently pushed root.
    pub fn pop(&self) -> Result<ObjectReference, TierSpaceError> {
        self.stack
            .lock()
            .unwrap()
            .pop()
            .ok_or(TierSpaceError::EmptyRootStack)
    }

    pub fn len(&self) -> usize {
        self.stack.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.lock().unwrap().is_empty()
    }
}

impl Default for RootStack {
    fn default() -> Self {
        Self::new()
    }
}
