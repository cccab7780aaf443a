#![allow(missing_docs)]

use std::fmt::Write;

/// Escape text content for an HTML text node.
pub fn escape_text(input: &str) -> String {
    escape(input, false)
}

/// Escape a value placed inside a double-quoted HTML attribute.
pub fn escape_attr(input: &str) -> String {
    escape(input, true)
}

fn escape(input: &str, quotes: bool) -> String {
    let mut out = String::with_capacity(input.len());

    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }

    out
}

/// JSON embedded in an inline `<script>` must not be able to close the tag
/// or open a comment inside it, so `<`, `>` and `&` become `\u` escapes.
///
/// Outside of strings JSON never contains these characters, and inside
/// strings the escapes decode to the same text.
pub fn escape_inline_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());

    for ch in json.chars() {
        match ch {
            '<' | '>' | '&' | '\u{2028}' | '\u{2029}' => {
                let _ = write!(out, "\\u{:04x}", ch as u32);
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Content type for a static file, keyed by extension.
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
