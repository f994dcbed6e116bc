//! Game badge colors for the checklist's preferred/backup game columns

use std::collections::{BTreeMap, HashMap};

use dexsheets_core::style::Color;

use crate::config::GameColor;
use crate::error::{Error, Result};

/// Fill and font color of a game badge cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Badge {
    pub fill: Color,
    pub font: Color,
}

impl Badge {
    pub const fn new(fill: Color, font: Color) -> Self {
        Self { fill, font }
    }

    /// Badge with black or white text, whichever reads better on `fill`
    pub fn on(fill: Color) -> Self {
        Self {
            fill,
            font: contrasting_font(fill),
        }
    }

    /// Neutral badge for games without a color
    pub const NEUTRAL: Badge = Badge::new(Color::LIGHT_GRAY, Color::BLACK);
}

const BUILT_IN: &[(&str, [u8; 3])] = &[
    ("Red", [0xFF, 0x11, 0x11]),
    ("Blue", [0x11, 0x11, 0xFF]),
    ("Yellow", [0xFF, 0xD7, 0x33]),
    ("Gold", [0xDA, 0xA5, 0x20]),
    ("Silver", [0xC0, 0xC0, 0xC0]),
    ("Crystal", [0x4F, 0xD9, 0xFF]),
    ("Ruby", [0xA0, 0x00, 0x00]),
    ("Sapphire", [0x00, 0x00, 0xA0]),
    ("Emerald", [0x00, 0xA0, 0x00]),
    ("FireRed", [0xFF, 0x73, 0x27]),
    ("LeafGreen", [0x00, 0xDD, 0x00]),
    ("Diamond", [0xAA, 0xAA, 0xFF]),
    ("Pearl", [0xFF, 0xAA, 0xAA]),
    ("Platinum", [0x99, 0x99, 0x99]),
    ("HeartGold", [0xB6, 0x9E, 0x00]),
    ("SoulSilver", [0xC0, 0xC0, 0xE1]),
    ("Black", [0x44, 0x44, 0x44]),
    ("White", [0xE1, 0xE1, 0xE1]),
    ("Black 2", [0x42, 0x4B, 0x50]),
    ("White 2", [0xE3, 0xCE, 0xD0]),
    ("X", [0x02, 0x5D, 0xA6]),
    ("Y", [0xEA, 0x1A, 0x3E]),
    ("Omega Ruby", [0xAB, 0x28, 0x13]),
    ("Alpha Sapphire", [0x26, 0x64, 0x9C]),
    ("Sun", [0xF1, 0x91, 0x2B]),
    ("Moon", [0x55, 0x99, 0xCA]),
    ("Ultra Sun", [0xE9, 0x5B, 0x2B]),
    ("Ultra Moon", [0x22, 0x6D, 0xB5]),
    ("Let's Go Pikachu", [0xF5, 0xDA, 0x26]),
    ("Let's Go Eevee", [0xD4, 0x92, 0x4B]),
    ("Sword", [0x00, 0xA1, 0xE9]),
    ("Shield", [0xBF, 0x00, 0x4F]),
    ("Brilliant Diamond", [0x44, 0xBA, 0xE5]),
    ("Shining Pearl", [0xDA, 0x7D, 0x99]),
    ("Legends: Arceus", [0x36, 0x59, 0x7B]),
    ("Scarlet", [0xF3, 0x41, 0x34]),
    ("Violet", [0x83, 0x34, 0xB7]),
    ("GO", [0x31, 0xA8, 0xDC]),
    ("HOME", [0x00, 0xC2, 0xB8]),
];

/// Badge colors keyed case-insensitively by game name
#[derive(Debug, Clone)]
pub struct GamePalette {
    badges: HashMap<String, Badge>,
}

impl Default for GamePalette {
    fn default() -> Self {
        let badges = BUILT_IN
            .iter()
            .map(|(name, [r, g, b])| (name.to_lowercase(), Badge::on(Color::rgb(*r, *g, *b))))
            .collect();
        Self { badges }
    }
}

impl GamePalette {
    /// Palette of built-in colors
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in colors plus configured overrides
    pub fn with_overrides(overrides: &BTreeMap<String, GameColor>) -> Result<Self> {
        let mut palette = Self::default();
        for (game, colors) in overrides {
            let fill = parse_hex(game, &colors.fill)?;
            let badge = match &colors.font {
                Some(font) => Badge::new(fill, parse_hex(game, font)?),
                None => Badge::on(fill),
            };
            palette.insert(game, badge);
        }
        Ok(palette)
    }

    pub fn insert(&mut self, game: &str, badge: Badge) {
        self.badges.insert(game.trim().to_lowercase(), badge);
    }

    /// Badge for a game; unknown games get [`Badge::NEUTRAL`]
    pub fn badge(&self, game: &str) -> Badge {
        self.badges
            .get(&game.trim().to_lowercase())
            .copied()
            .unwrap_or(Badge::NEUTRAL)
    }

    pub fn contains(&self, game: &str) -> bool {
        self.badges.contains_key(&game.trim().to_lowercase())
    }
}

fn parse_hex(game: &str, hex: &str) -> Result<Color> {
    Color::from_hex(hex)
        .ok_or_else(|| Error::Config(format!("invalid color '{}' for game '{}'", hex, game)))
}

fn contrasting_font(fill: Color) -> Color {
    let (r, g, b) = match fill {
        Color::Rgb { r, g, b } | Color::Argb { r, g, b, .. } => (r, g, b),
        Color::Auto => return Color::BLACK,
    };
    // ITU-R BT.601 luma
    let luma = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
    if luma > 150_000 {
        Color::BLACK
    } else {
        Color::WHITE
    }
}
