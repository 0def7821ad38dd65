use std::sync::atomic::{AtomicU32, Ordering};

static ID: AtomicU32 = AtomicU32::new(0);

/// Allows assigning a unique id to various entities, such as arenas. Unlike a
/// plain counter this is fine to call from any thread.
pub fn next_id() -> u32 {
    let id = ID.fetch_add(1, Ordering::Relaxed);
    assert!(id != u32::MAX, "Ran out of unique ids!");
    id
}

/// Renders a byte the way diagnostics show it: printable ASCII as itself, and
/// everything else as an escape sequence.
pub fn escape_byte(byte: u8) -> String {
    match byte {
        b'\n' => "\\n".to_string(),
        b'\t' => "\\t".to_string(),
        b'\r' => "\\r".to_string(),
        b'\\' => "\\\\".to_string(),
        0x20..=0x7e => (byte as char).to_string(),
        _ => format!("\\x{byte:02x}"),
    }
}

/// Quotes a string for display, escaping anything that is not printable ASCII.
pub fn repr(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for byte in text.bytes() {
        if byte == b'"' {
            out.push_str("\\\"");
        } else {
            out.push_str(&escape_byte(byte));
        }
    }
    out.push('"');
    out
}
