//! Utility helpers for Voicecast

/// Build an element id like `avatar-hero` or `service-video-games`.
/// The name is lowercased and runs of non-alphanumeric chars collapse to one hyphen.
pub fn dom_id(prefix: &str, name: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + name.len() + 1);
    out.push_str(prefix);

    let mut pending_dash = true;
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_dash {
                out.push('-');
                pending_dash = false;
            }
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }

    out
}
