use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Categorical palette
// ---------------------------------------------------------------------------

/// The 20-entry "tab20" categorical palette, dark/light pairs of ten hues.
pub const TAB20: [Srgb<u8>; 20] = [
    Srgb::new(0x1f, 0x77, 0xb4),
    Srgb::new(0xae, 0xc7, 0xe8),
    Srgb::new(0xff, 0x7f, 0x0e),
    Srgb::new(0xff, 0xbb, 0x78),
    Srgb::new(0x2c, 0xa0, 0x2c),
    Srgb::new(0x98, 0xdf, 0x8a),
    Srgb::new(0xd6, 0x27, 0x28),
    Srgb::new(0xff, 0x98, 0x96),
    Srgb::new(0x94, 0x67, 0xbd),
    Srgb::new(0xc5, 0xb0, 0xd5),
    Srgb::new(0x8c, 0x56, 0x4b),
    Srgb::new(0xc4, 0x9c, 0x94),
    Srgb::new(0xe3, 0x77, 0xc2),
    Srgb::new(0xf7, 0xb6, 0xd2),
    Srgb::new(0x7f, 0x7f, 0x7f),
    Srgb::new(0xc7, 0xc7, 0xc7),
    Srgb::new(0xbc, 0xbd, 0x22),
    Srgb::new(0xdb, 0xdb, 0x8d),
    Srgb::new(0x17, 0xbe, 0xcf),
    Srgb::new(0x9e, 0xda, 0xe5),
];

/// Columns occupied by one intensity level in the full-resolution table.
pub const COLUMNS_PER_LEVEL: usize = 4;

/// Sample the palette at `position` in `[0, 1]`.
///
/// Out-of-range positions clamp to the first / last entry; NaN maps to the
/// first entry.
pub fn sample(position: f64) -> Color32 {
    let n = TAB20.len();
    let scaled = position * n as f64;
    let index = if scaled.is_nan() || scaled < 0.0 {
        0
    } else {
        (scaled as usize).min(n - 1)
    };
    to_color32(TAB20[index])
}

// ---------------------------------------------------------------------------
// Intensity → colour
// ---------------------------------------------------------------------------

/// Colour for the curve whose voltage sits in `column`.
///
/// The palette position is the curve's intensity rank out of `levels`, so a
/// curve keeps its colour whichever subset of intensities is plotted.
pub fn color_for_column(column: usize, levels: usize) -> Color32 {
    let rank = column as f64 / COLUMNS_PER_LEVEL as f64;
    sample(rank / levels.max(1) as f64)
}

fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_set_uses_expected_palette_slots() {
        let slots: Vec<Color32> = (0..12).map(|k| color_for_column(k * 4, 12)).collect();
        let expected: Vec<Color32> = [0, 1, 3, 5, 6, 8, 10, 11, 13, 15, 16, 18]
            .iter()
            .map(|&i| to_color32(TAB20[i]))
            .collect();
        assert_eq!(slots, expected);
    }

    #[test]
    fn subset_keeps_full_set_colours() {
        let full: Vec<(usize, Color32)> =
            (0..12).map(|k| (k * 4, color_for_column(k * 4, 12))).collect();

        for column in [8, 28, 44] {
            let (_, in_full) = full.iter().find(|(c, _)| *c == column).unwrap();
            assert_eq!(color_for_column(column, 12), *in_full);
        }
    }

    #[test]
    fn sample_clamps() {
        assert_eq!(sample(-0.5), to_color32(TAB20[0]));
        assert_eq!(sample(1.0), to_color32(TAB20[19]));
        assert_eq!(sample(7.0), to_color32(TAB20[19]));
        assert_eq!(sample(f64::NAN), to_color32(TAB20[0]));
    }

    #[test]
    fn first_entry_is_tab_blue() {
        assert_eq!(color_for_column(0, 12), Color32::from_rgb(31, 119, 180));
    }
}
