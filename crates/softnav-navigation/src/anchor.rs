//! In-page anchor scrolling

use softnav_document::DocumentView;
use softnav_transition::MotionGate;
use url::Url;

use crate::normalize::has_hash;

/// Scroll the element named by the URL's fragment into view.
///
/// Silently does nothing when there is no fragment or no such element; never
/// falls back to the top of the page. Smooth unless reduced motion is active.
pub fn scroll_to_hash<D: DocumentView + ?Sized>(doc: &mut D, url: &Url, gate: &MotionGate) -> bool {
    if !has_hash(url) {
        return false;
    }
    let Some(fragment) = url.fragment() else {
        return false;
    };

    let id = decode_fragment(fragment);
    let scrolled = doc.scroll_into_view(&id, gate.scroll_behavior());
    if !scrolled {
        tracing::debug!(id = %id, "No anchor target");
    }
    scrolled
}

/// Percent-decode a fragment into an element id.
/// Sequences that do not decode to UTF-8 leave the fragment as written.
pub fn decode_fragment(fragment: &str) -> String {
    let bytes = fragment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex(bytes[i + 1]), hex(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8(out).unwrap_or_else(|_| fragment.to_string())
}

fn hex(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
