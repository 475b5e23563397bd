use crate::foundation::core::Color;
use serde::Deserialize;

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            RgbaObj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
            Arr(Vec<u8>),
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => parse_css_color(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Color::rgba(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Color::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// Parse a CSS color string: hex, `rgb()`/`rgba()`, or a named color.
pub fn parse_css_color(s: &str) -> Result<Color, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
    {
        let args = args
            .strip_suffix(')')
            .ok_or_else(|| format!("unterminated color function \"{s}\""))?;
        return parse_rgb_args(args);
    }
    named_color(&lower).ok_or_else(|| format!("unknown color \"{s}\""))
}

fn parse_hex(s: &str) -> Result<Color, String> {
    fn nibble(c: u8) -> Result<u8, String> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| format!("invalid hex digit '{}'", c as char))
    }
    fn byte(pair: &[u8]) -> Result<u8, String> {
        Ok(nibble(pair[0])? * 16 + nibble(pair[1])?)
    }

    let b = s.as_bytes();
    match b.len() {
        3 | 4 => {
            let r = nibble(b[0])? * 17;
            let g = nibble(b[1])? * 17;
            let bl = nibble(b[2])? * 17;
            let a = if b.len() == 4 { nibble(b[3])? * 17 } else { 255 };
            Ok(Color::rgba(r, g, bl, a))
        }
        6 | 8 => {
            let r = byte(&b[0..2])?;
            let g = byte(&b[2..4])?;
            let bl = byte(&b[4..6])?;
            let a = if b.len() == 8 { byte(&b[6..8])? } else { 255 };
            Ok(Color::rgba(r, g, bl, a))
        }
        _ => Err("hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA".to_owned()),
    }
}

fn parse_rgb_args(args: &str) -> Result<Color, String> {
    let parts: Vec<&str> = args
        .split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(format!("rgb()/rgba() takes 3 or 4 components, got {}", parts.len()));
    }

    fn channel(p: &str) -> Result<u8, String> {
        let v = if let Some(pct) = p.strip_suffix('%') {
            pct.parse::<f64>().map(|x| x * 2.55)
        } else {
            p.parse::<f64>()
        }
        .map_err(|_| format!("invalid color channel \"{p}\""))?;
        Ok(v.round().clamp(0.0, 255.0) as u8)
    }

    fn alpha(p: &str) -> Result<u8, String> {
        let v = if let Some(pct) = p.strip_suffix('%') {
            pct.parse::<f64>().map(|x| x / 100.0)
        } else {
            p.parse::<f64>()
        }
        .map_err(|_| format!("invalid alpha \"{p}\""))?;
        Ok((v.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    let a = match parts.get(3) {
        Some(p) => alpha(p)?,
        None => 255,
    };
    Ok(Color::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        a,
    ))
}

fn named_color(name: &str) -> Option<Color> {
    let c = match name {
        "transparent" => Color::TRANSPARENT,
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::rgb(255, 0, 0),
        "green" => Color::rgb(0, 128, 0),
        "lime" => Color::rgb(0, 255, 0),
        "blue" => Color::rgb(0, 0, 255),
        "yellow" => Color::rgb(255, 255, 0),
        "orange" => Color::rgb(255, 165, 0),
        "purple" => Color::rgb(128, 0, 128),
        "pink" => Color::rgb(255, 192, 203),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        "silver" => Color::rgb(192, 192, 192),
        "lightgray" | "lightgrey" => Color::rgb(211, 211, 211),
        "darkgray" | "darkgrey" => Color::rgb(169, 169, 169),
        "navy" => Color::rgb(0, 0, 128),
        "teal" => Color::rgb(0, 128, 128),
        "cyan" | "aqua" => Color::rgb(0, 255, 255),
        "magenta" | "fuchsia" => Color::rgb(255, 0, 255),
        "maroon" => Color::rgb(128, 0, 0),
        "olive" => Color::rgb(128, 128, 0),
        "gold" => Color::rgb(255, 215, 0),
        _ => return None,
    };
    Some(c)
}
