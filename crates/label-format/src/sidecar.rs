//! Sidecar JSON for one part's labels.
//!
//! Emitted by hand rather than through a map type so the index keys
//! stay in face enumeration order and repeated extraction produces
//! byte-identical files.

use std::fmt::Write;

use crate::extract::PartLabels;

/// Render the sidecar document:
/// `{"cls": {"<i>": id}, "seg": [[i, ...], ...], "bottom": {"<i>": 0|1}}`.
pub fn sidecar_json(labels: &PartLabels) -> String {
    let mut out = String::new();
    out.push_str("{\n  \"cls\": {");
    for (i, id) in labels.cls.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "\"{i}\": {id}");
    }
    out.push_str("},\n  \"seg\": [");
    for (gi, group) in labels.seg.iter().enumerate() {
        if gi > 0 {
            out.push_str(", ");
        }
        out.push('[');
        for (j, face) in group.iter().enumerate() {
            if j > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{face}");
        }
        out.push(']');
    }
    out.push_str("],\n  \"bottom\": {");
    for (i, flag) in labels.bottom.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "\"{i}\": {flag}");
    }
    out.push_str("}\n}");
    out
}
