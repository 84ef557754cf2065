//! Pure Business Logic Functions
//!
//! Farbraum-Umrechnung ohne Hardware-Dependencies (testbar!)

use rgb::RGB8;

use crate::types::Hsv;

/// Verschiebung zwischen generischem HSV-Hue und dem Hue der Lampe
pub const HUE_OFFSET: u8 = 0x15;

/// Rechnet eine RGB-Farbe in den HSV-Farbraum um (alle Kanäle 0-255)
///
/// Schwarz ergibt `h = s = 0`, Grautöne ergeben `s = 0` und `h = 0`.
///
/// # Beispiele
///
/// ```
/// # use rgb::RGB8;
/// # use lc_core::{Hsv, rgb_to_hsv};
/// let red = RGB8 { r: 255, g: 0, b: 0 };
/// assert_eq!(rgb_to_hsv(red), Hsv::new(0, 255, 255));
/// ```
pub fn rgb_to_hsv(colour: RGB8) -> Hsv {
    let RGB8 { r, g, b } = colour;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    if max == 0 {
        // Schwarz
        return Hsv::new(0, 0, 0);
    }

    let delta = i32::from(max - min);
    let s = (255 * delta / i32::from(max)) as u8;

    if s == 0 {
        // Grau, keine Farbsättigung
        return Hsv::new(0, 0, max);
    }

    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    let h = if max == colour.r {
        43 * (g - b) / delta
    } else if max == colour.g {
        85 + 43 * (b - r) / delta
    } else {
        171 + 43 * (r - g) / delta
    };

    // negative Hue-Werte wickeln sich wie beim Byte-Überlauf um
    Hsv::new(h as u8, s, max)
}

/// Rechnet generischen Hue in die Hue-Kodierung der Lampe um
pub fn lamp_hue(h: u8) -> u8 {
    h.wrapping_add(HUE_OFFSET)
}
