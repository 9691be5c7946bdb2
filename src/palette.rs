//! Genre colors: an ordinal mapping onto the Tableau 10 palette.

use crate::models::GenreSet;
use ahash::AHashMap;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Tableau 10 qualitative palette.
/// Order: Blue, Orange, Red, Teal, Green, Yellow, Purple, Pink, Brown, Gray.
pub const TABLEAU10: [Rgb8; 10] = [
    Rgb8::new(78, 121, 167),  // #4e79a7
    Rgb8::new(242, 142, 44),  // #f28e2c
    Rgb8::new(225, 87, 89),   // #e15759
    Rgb8::new(118, 183, 178), // #76b7b2
    Rgb8::new(89, 161, 79),   // #59a14f
    Rgb8::new(237, 201, 73),  // #edc949
    Rgb8::new(175, 122, 161), // #af7aa1
    Rgb8::new(255, 157, 167), // #ff9da7
    Rgb8::new(156, 117, 95),  // #9c755f
    Rgb8::new(186, 176, 171), // #bab0ab
];

/// Palette entry for index `idx`, wrapping around after ten.
#[inline]
pub fn tableau_color(idx: usize) -> Rgb8 {
    TABLEAU10[idx % TABLEAU10.len()]
}

/// Genre → color, assigned in genre-set order.
///
/// More than ten genres reuse palette entries, so unrelated genres can share a color.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    colors: AHashMap<String, Rgb8>,
}

impl ColorMap {
    pub fn new(genres: &GenreSet) -> Self {
        if genres.len() > TABLEAU10.len() {
            log::warn!(
                "{} genres but only {} palette colors; colors will repeat",
                genres.len(),
                TABLEAU10.len()
            );
        }
        let colors = genres
            .iter()
            .enumerate()
            .map(|(i, g)| (g.to_string(), tableau_color(i)))
            .collect();
        Self { colors }
    }

    pub fn color(&self, genre: &str) -> Option<Rgb8> {
        self.colors.get(genre).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
