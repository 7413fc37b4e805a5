//! Applies the profile's theme preference to the document.
//!
//! Writes a `data-theme` attribute on the `<html>` element. Requires a
//! browser environment; SSR paths no-op to keep server rendering
//! deterministic.

use crate::net::types::Theme;

/// Apply the `data-theme` attribute on the `<html>` element.
pub fn apply(theme: Theme) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = doc.document_element() {
                let _ = el.set_attribute("data-theme", theme.as_str());
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = theme;
    }
}
