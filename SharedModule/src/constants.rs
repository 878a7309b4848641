//! # Shared Constants
//!
//! Constants used across both client and server modules.

/// Object system constants
pub mod object {
    /// Reserved object IDs (0-999)
    pub const RESERVED_OBJECT_ID_MAX: u64 = 999;

    /// First object ID handed out by the authority
    pub const FIRST_OBJECT_ID: u64 = RESERVED_OBJECT_ID_MAX + 1;
}

/// Presentation constants
pub mod presentation {
    /// Last-resort tooltip name when neither the name nor the fallback yield text.
    /// Shown exactly as written; only resolved names are capitalized.
    pub const TOOLTIP_FAILSAFE_NAME: &str = "error";

    /// Last-resort examine name. Not the tooltip literal.
    pub const EXAMINE_FAILSAFE_NAME: &str = "<error>";

    /// Opening of every examine sentence
    pub const EXAMINE_PREFIX: &str = "This is a ";

    /// Separator used when several examine handlers contribute text
    pub const EXAMINE_SEPARATOR: &str = "\n";
}

/// Observer-side constants
pub mod client {
    /// Maximum examine answers an observer keeps
    pub const MAX_EXAMINE_LOG_ENTRIES: usize = 50;
}

/// Contextual action constants
pub mod actions {
    /// Label of the examine entry in the right-click menu
    pub const EXAMINE: &str = "Examine";
}
