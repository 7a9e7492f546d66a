//! Slot placeholders and out-of-order fill chunks.
//!
//! The shell carries one `data-slot` element per section. A fill chunk is a
//! `<template data-fill>` holding the section markup followed by a call to
//! [`FILL_SCRIPT`]'s `__fill`, which moves the template content into the
//! slot. Chunks can therefore arrive in any order.

/// Inline script defining `window.__fill(name)`. Must be in the head.
pub const FILL_SCRIPT: &str = r#"window.__fill = function (name) {
  var tpl = document.querySelector('template[data-fill="' + name + '"]');
  var slot = document.querySelector('[data-slot="' + name + '"]');
  if (!tpl || !slot) return;
  slot.replaceChildren(tpl.content.cloneNode(true));
  tpl.remove();
};"#;

/// Check that a slot name is safe to embed in markup and script.
pub fn is_valid_slot_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Placeholder element for a slot, pre-filled with `placeholder` markup.
pub fn slot(name: &str, placeholder: &str) -> String {
    debug_assert!(is_valid_slot_name(name), "invalid slot name {:?}", name);
    format!(r#"<div data-slot="{}">{}</div>"#, name, placeholder)
}

/// Fill chunk that replaces the slot's content with `html`.
pub fn fill_slot(name: &str, html: &str) -> String {
    debug_assert!(is_valid_slot_name(name), "invalid slot name {:?}", name);
    format!(
        r#"<template data-fill="{name}">{html}</template><script>__fill("{name}")</script>"#,
        name = name,
        html = html
    )
}
