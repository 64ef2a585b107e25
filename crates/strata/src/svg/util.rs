use std::fmt::Write as _;

/// Appends `v` the way JavaScript's `Number#toString()` prints it, without `-0` and without
/// float noise left over from layout arithmetic.
pub(super) fn fmt_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == -0.0 {
        v = 0.0;
    }

    let mut buf = ryu_js::Buffer::new();
    out.push_str(buf.format_finite(v));
}

pub(super) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

/// Appends `x,y`.
pub(super) fn fmt_point_into(out: &mut String, x: f64, y: f64) {
    fmt_into(out, x);
    out.push(',');
    fmt_into(out, y);
}

pub(super) fn escape_xml_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

/// Appends ` name="value"` with `value` escaped.
pub(super) fn attr_into(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {name}=\"");
    escape_xml_into(out, value);
    out.push('"');
}

/// Appends ` name="number"`.
pub(super) fn num_attr_into(out: &mut String, name: &str, v: f64) {
    let _ = write!(out, " {name}=\"");
    fmt_into(out, v);
    out.push('"');
}
