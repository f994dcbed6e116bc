//! Per-sheet style table

use super::Style;
use ahash::AHashMap;

/// Interns the styles of one worksheet
///
/// Cells refer to their style by index. Index 0 is always the default
/// style, so an unstyled cell needs no entry at all.
#[derive(Debug)]
pub struct StylePool {
    styles: Vec<Style>,
    ids: AHashMap<Style, u32>,
}

impl StylePool {
    pub fn new() -> Self {
        let mut ids = AHashMap::new();
        ids.insert(Style::default(), 0);
        Self {
            styles: vec![Style::default()],
            ids,
        }
    }

    /// Index of `style`, adding it on first sight
    pub fn get_or_insert(&mut self, style: Style) -> u32 {
        if let Some(&id) = self.ids.get(&style) {
            return id;
        }
        let id = self.styles.len() as u32;
        self.styles.push(style.clone());
        self.ids.insert(style, id);
        id
    }

    pub fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(index as usize)
    }

    /// Number of styles, the default included
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// True while only the default style is present
    pub fn is_empty(&self) -> bool {
        self.styles.len() == 1
    }

    /// Styles with their indices, default first
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Style)> {
        (0u32..).zip(self.styles.iter())
    }
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}
