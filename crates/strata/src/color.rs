//! Color values accepted in render attributes.
//!
//! Supported forms: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, HSV tuples with components in
//! `[0, 1]` (`"h,s,v"`, `"h,s,v,a"` or whitespace separated), and bare CSS color names, which
//! are passed through untouched. SVG 1.1 has no alpha channel in colors, so alpha is split off
//! into a separate opacity.

/// A color resolved for SVG output.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub color: String,
    /// `None` when fully opaque.
    pub opacity: Option<f64>,
}

impl Paint {
    fn rgb(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self {
            color: format!("#{r:02x}{g:02x}{b:02x}"),
            opacity: (alpha < 1.0).then_some(alpha.max(0.0)),
        }
    }
}

/// Resolves a color attribute; unrecognized values are logged and dropped.
pub fn parse_color(raw: &str) -> Option<Paint> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let paint = if let Some(hex) = s.strip_prefix('#') {
        parse_hex(hex)
    } else if let Some(hsv) = parse_hsv(s) {
        Some(hsv)
    } else if s.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(Paint {
            color: s.to_string(),
            opacity: None,
        })
    } else {
        None
    };
    if paint.is_none() {
        tracing::warn!(color = raw, "unrecognized color ignored");
    }
    paint
}

fn parse_hex(hex: &str) -> Option<Paint> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok();
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 | 4 => {
            let r = digit(0)? * 17;
            let g = digit(1)? * 17;
            let b = digit(2)? * 17;
            let a = if hex.len() == 4 { digit(3)? * 17 } else { 255 };
            Some(Paint::rgb(r, g, b, f64::from(a) / 255.0))
        }
        6 | 8 => {
            let r = pair(0)?;
            let g = pair(2)?;
            let b = pair(4)?;
            let a = if hex.len() == 8 { pair(6)? } else { 255 };
            Some(Paint::rgb(r, g, b, f64::from(a) / 255.0))
        }
        _ => None,
    }
}

fn parse_hsv(s: &str) -> Option<Paint> {
    let parts: Vec<f64> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().ok())
        .collect::<Option<_>>()?;
    if !(3..=4).contains(&parts.len()) || parts.iter().any(|v| !(0.0..=1.0).contains(v)) {
        return None;
    }
    let (r, g, b) = hsv_to_rgb(parts[0], parts[1], parts[2]);
    Some(Paint::rgb(r, g, b, parts.get(3).copied().unwrap_or(1.0)))
}

/// Converts HSV (each in `[0, 1]`) to 8-bit RGB.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let h = (h.fract() + 1.0).fract() * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let to_u8 = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(r), to_u8(g), to_u8(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!(
            parse_color("#F0a"),
            Some(Paint {
                color: "#ff00aa".to_string(),
                opacity: None
            })
        );
        let with_alpha = parse_color("#ff2f8e80").unwrap();
        assert_eq!(with_alpha.color, "#ff2f8e");
        assert_eq!(with_alpha.opacity, Some(128.0 / 255.0));
    }

    #[test]
    fn hsv_tuples() {
        assert_eq!(parse_color("0,1,1").map(|p| p.color), Some("#ff0000".to_string()));
        assert_eq!(
            parse_color("0.5 1 1").map(|p| p.color),
            Some("#00ffff".to_string())
        );
        assert_eq!(parse_color("0.5,1,1,1").map(|p| p.opacity), Some(None));
    }

    #[test]
    fn names_pass_through_and_garbage_is_dropped() {
        assert_eq!(
            parse_color("whitesmoke").map(|p| p.color),
            Some("whitesmoke".to_string())
        );
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("rgb(1,2,3)"), None);
    }
}
