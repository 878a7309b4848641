//! # Fallback Naming
//!
//! Generates a display name for objects whose configured name is blank. The
//! same namer must back both the tooltip and the examine paths.

use crate::object::ObjectHandle;

/// Produces a display name from an object's own classification
pub trait FallbackNamer {
    fn fallback_name(&self, object: ObjectHandle<'_>) -> String;
}

impl<F> FallbackNamer for F
where
    F: for<'a> Fn(ObjectHandle<'a>) -> String,
{
    fn fallback_name(&self, object: ObjectHandle<'_>) -> String {
        self(object)
    }
}

/// Derives a name from the prefab the object was instantiated from:
/// `"Tool_Spanner(Clone)"` becomes `"Tool Spanner"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrefabNamer;

impl FallbackNamer for PrefabNamer {
    fn fallback_name(&self, object: ObjectHandle<'_>) -> String {
        object
            .class_name
            .replace("(Clone)", "")
            .replace('_', " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
