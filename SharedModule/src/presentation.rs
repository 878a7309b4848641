//! # Presentation Formatting
//!
//! Pure functions turning attribute state into the strings players see.
//! The fallback name is passed lazily because generating it can be
//! expensive and is only needed when the configured name is blank.

use crate::constants::presentation::{EXAMINE_FAILSAFE_NAME, EXAMINE_PREFIX, TOOLTIP_FAILSAFE_NAME};

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Resolve the name to display: the current name, else the fallback name.
/// `None` when both are blank.
pub fn resolve_display_name(name: &str, fallback: impl FnOnce() -> String) -> Option<String> {
    if !is_blank(name) {
        return Some(name.to_string());
    }
    let generated = fallback();
    if is_blank(&generated) {
        None
    } else {
        Some(generated)
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Hover tooltip: `"Spanner"` or `"Spanner (a small one)"`.
///
/// The resolved name gets its first character capitalized. When nothing can
/// be resolved the literal `"error"` is used as is.
pub fn tooltip_text(name: &str, description: &str, fallback: impl FnOnce() -> String) -> String {
    let mut text = match resolve_display_name(name, fallback) {
        Some(display_name) => capitalize_first(&display_name),
        None => TOOLTIP_FAILSAFE_NAME.to_string(),
    };
    if !description.is_empty() {
        text.push_str(" (");
        text.push_str(description);
        text.push(')');
    }
    text
}

/// Examine sentence: `"This is a spanner. A small one."`.
///
/// Takes the *initial* description; later description changes never show up
/// here. When nothing can be resolved the literal `"<error>"` is used.
pub fn examine_text(name: &str, initial_description: &str, fallback: impl FnOnce() -> String) -> String {
    let display_name =
        resolve_display_name(name, fallback).unwrap_or_else(|| EXAMINE_FAILSAFE_NAME.to_string());
    let mut text = format!("{}{}.", EXAMINE_PREFIX, display_name);
    if !initial_description.is_empty() {
        text.push(' ');
        text.push_str(initial_description);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_fallback() -> String {
        String::new()
    }

    #[test]
    fn test_tooltip_examples() {
        assert_eq!(tooltip_text("", "", no_fallback), "error");
        assert_eq!(tooltip_text("spanner", "", no_fallback), "Spanner");
        assert_eq!(tooltip_text("spanner", "a small one", no_fallback), "Spanner (a small one)");
    }

    #[test]
    fn test_tooltip_uses_fallback_for_whitespace_names() {
        assert_eq!(tooltip_text("   ", "", || "wrench".to_string()), "Wrench");
    }

    #[test]
    fn test_tooltip_failsafe_keeps_description() {
        assert_eq!(tooltip_text(" ", "odd", || "  ".to_string()), "error (odd)");
    }

    #[test]
    fn test_tooltip_capitalizes_multibyte_first_char() {
        assert_eq!(tooltip_text("élan", "", no_fallback), "Élan");
    }

    #[test]
    fn test_fallback_not_called_when_name_present() {
        let text = tooltip_text("crowbar", "", || panic!("fallback should stay lazy"));
        assert_eq!(text, "Crowbar");
    }

    #[test]
    fn test_examine_uses_initial_description() {
        let text = examine_text("", "shiny", || "spanner".to_string());
        assert_eq!(text, "This is a spanner. shiny");
        assert!(!text.contains("rusty"));
    }

    #[test]
    fn test_examine_failsafe_differs_from_tooltip() {
        assert_eq!(examine_text("", "", no_fallback), "This is a <error>.");
    }

    #[test]
    fn test_examine_keeps_name_case() {
        assert_eq!(examine_text("spanner", "", no_fallback), "This is a spanner.");
    }

    #[test]
    fn test_resolve_display_name() {
        assert_eq!(resolve_display_name("a", no_fallback).as_deref(), Some("a"));
        assert_eq!(resolve_display_name("", || "b".to_string()).as_deref(), Some("b"));
        assert_eq!(resolve_display_name("\t", no_fallback), None);
    }
}
