//! # RPC Module (Server-Side)
//!
//! The examine capability and the handling of examine requests from
//! observers. Each object carries a list of [`Examinable`] handlers; a
//! request runs all of them in order and sends the joined text back to the
//! observer that asked.

use attr_shared::naming::FallbackNamer;
use attr_shared::object::ObjectHandle;

// Module for dispatching examine requests
pub mod dispatch;

/// What an examine handler gets to look at
pub struct ExamineContext<'a> {
    /// The examined object
    pub object: ObjectHandle<'a>,

    /// Namer for objects without a configured name
    pub namer: &'a dyn FallbackNamer,
}

/// Capability: contributes a line of examine text
pub trait Examinable {
    /// Text for this object, or `None` to stay silent
    fn examine(&self, ctx: &ExamineContext<'_>) -> Option<String>;
}

/// Boxed examine handler attached to an object
pub type ExamineHandler = Box<dyn Examinable + Send>;
