use crate::{
    animation::interp::Lerp,
    foundation::core::Rgba8,
    timeline::document::{BackgroundStyle, DocumentMeta, ThemeHints, TraceDocument},
};

/// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case-insensitive).
pub fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(s: &str, at: usize) -> Result<u8, String> {
        let pair = s
            .get(at..at + 2)
            .ok_or_else(|| format!("invalid hex color \"{s}\""))?;
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    let a = match s.len() {
        6 => 255,
        8 => hex_byte(s, 6)?,
        _ => return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    };
    Ok(Rgba8::rgba(
        hex_byte(s, 0)?,
        hex_byte(s, 2)?,
        hex_byte(s, 4)?,
        a,
    ))
}

/// Blend two colors; `t = 0` is `a`.
pub fn mix(a: Rgba8, b: Rgba8, t: f64) -> Rgba8 {
    Rgba8::lerp(&a, &b, t.clamp(0.0, 1.0))
}

/// Colors of the safe-dial scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialPalette {
    pub background: Rgba8,
    pub dial_outer: Rgba8,
    pub dial_inner: Rgba8,
    pub marker: Rgba8,
    pub number_active: Rgba8,
    pub number_normal: Rgba8,
    pub zero: Rgba8,
    pub trail: Rgba8,
    pub text_primary: Rgba8,
    pub accent: Rgba8,
    pub success: Rgba8,
}

impl Default for DialPalette {
    fn default() -> Self {
        Self {
            background: Rgba8::opaque(0x0a, 0x0f, 0x1a),
            dial_outer: Rgba8::opaque(0x2a, 0x3f, 0x5f),
            dial_inner: Rgba8::opaque(0x1a, 0x23, 0x32),
            marker: Rgba8::opaque(0xff, 0x33, 0x66),
            number_active: Rgba8::opaque(0x66, 0xd9, 0xff),
            number_normal: Rgba8::opaque(0x4a, 0x5f, 0x7f),
            zero: Rgba8::opaque(0xff, 0xcc, 0x00),
            trail: Rgba8::rgba(0xff, 0x33, 0x66, 0x80),
            text_primary: Rgba8::opaque(0xe0, 0xe8, 0xf0),
            accent: Rgba8::opaque(0x66, 0xd9, 0xff),
            success: Rgba8::opaque(0x00, 0xff, 0x88),
        }
    }
}

/// Colors of the receipt-scanner scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScannerPalette {
    pub background_top: Rgba8,
    pub background_bottom: Rgba8,
    pub paper: Rgba8,
    pub paper_shadow: Rgba8,
    pub scanner_start: Rgba8,
    pub scanner_end: Rgba8,
    pub chunk_a: Rgba8,
    pub chunk_b: Rgba8,
    pub chunk_success: Rgba8,
    pub chunk_fail: Rgba8,
    pub accent_red: Rgba8,
    pub accent_gold: Rgba8,
    pub bar_track: Rgba8,
    pub bar_fill: Rgba8,
}

impl Default for ScannerPalette {
    fn default() -> Self {
        Self {
            background_top: Rgba8::opaque(0x12, 0x0f, 0x14),
            background_bottom: Rgba8::opaque(0x0a, 0x08, 0x09),
            paper: Rgba8::opaque(0xfd, 0xf7, 0xed),
            paper_shadow: Rgba8::rgba(0, 0, 0, 0x59),
            scanner_start: Rgba8::rgba(0x5b, 0xe7, 0xc4, 0xaa),
            scanner_end: Rgba8::rgba(0xe6, 0x39, 0x46, 0xaa),
            chunk_a: Rgba8::rgba(0x5b, 0xe7, 0xc4, 0x40),
            chunk_b: Rgba8::rgba(0xf6, 0xc3, 0x44, 0x40),
            chunk_success: Rgba8::rgba(0x5b, 0xe7, 0xc4, 0xa0),
            chunk_fail: Rgba8::rgba(0xe6, 0x39, 0x46, 0xa0),
            accent_red: Rgba8::opaque(0xe6, 0x39, 0x46),
            accent_gold: Rgba8::opaque(0xf6, 0xc3, 0x44),
            bar_track: Rgba8::opaque(0x2d, 0x2a, 0x32),
            bar_fill: Rgba8::opaque(0xf6, 0xc3, 0x44),
        }
    }
}

/// Colors of the generic labeled-track scene, derived from document theme hints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackPalette {
    pub background: Rgba8,
    pub foreground: Rgba8,
    pub accent: Rgba8,
}

impl Default for TrackPalette {
    fn default() -> Self {
        Self::from_hints(&ThemeHints::default())
    }
}

impl TrackPalette {
    pub fn from_hints(theme: &ThemeHints) -> Self {
        let (background, foreground) = match theme.background_style {
            BackgroundStyle::Dark => (
                Rgba8::opaque(0x0b, 0x10, 0x21),
                Rgba8::opaque(0xf3, 0xf6, 0xff),
            ),
            BackgroundStyle::Light => (
                Rgba8::opaque(0xfd, 0xfd, 0xfd),
                Rgba8::opaque(0x1b, 0x1b, 0x1b),
            ),
        };
        Self {
            background,
            foreground,
            accent: accent_color(theme),
        }
    }
}

/// Accent from an explicit hint, else from the mood words, else from the background style.
pub fn accent_color(theme: &ThemeHints) -> Rgba8 {
    if let Some(hint) = theme.accent_color_hint.as_deref() {
        match parse_hex(hint) {
            Ok(c) => return c,
            Err(e) => tracing::warn!(hint, error = %e, "ignoring accent color hint"),
        }
    }

    let mood = theme
        .accent_mood
        .as_deref()
        .unwrap_or(&theme.primary_mood)
        .to_ascii_lowercase();
    if mood.contains("danger") {
        Rgba8::opaque(0xff, 0x4d, 0x6d)
    } else if mood.contains("calm") {
        Rgba8::opaque(0x5b, 0xc0, 0xde)
    } else if mood.contains("energy") {
        Rgba8::opaque(0xf3, 0x9c, 0x12)
    } else {
        match theme.background_style {
            BackgroundStyle::Dark => Rgba8::opaque(0x9b, 0x59, 0xb6),
            BackgroundStyle::Light => Rgba8::opaque(0x2c, 0x3e, 0x50),
        }
    }
}

/// Palettes for every scene a renderer may be asked to draw.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneTheme {
    pub dial: DialPalette,
    pub scanner: ScannerPalette,
    pub tracks: TrackPalette,
}

impl SceneTheme {
    pub fn for_document(doc: &TraceDocument) -> Self {
        let tracks = match &doc.meta {
            DocumentMeta::Tracks { theme, .. } => TrackPalette::from_hints(theme),
            _ => TrackPalette::default(),
        };
        Self {
            tracks,
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/theme.rs"]
mod tests;
