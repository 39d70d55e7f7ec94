//! App-level view models consumed by the host renderer.

use alloc::string::String;

use crate::{
    session::ReadingStats,
    word_info::{DelayFactor, WordLayout},
};

/// Units shown on each side of the current one in the gallery strip.
pub const GALLERY_RADIUS: usize = 15;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GalleryItem<'a> {
    pub index: usize,
    pub unit: &'a str,
    pub current: bool,
}

/// Window of neighbouring units around the cursor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Gallery<'a> {
    units: &'a [String],
    start: usize,
    cursor: usize,
}

impl<'a> Gallery<'a> {
    pub fn new(units: &'a [String], cursor: usize, radius: usize) -> Self {
        let start = cursor.saturating_sub(radius);
        let end = units.len().min(cursor.saturating_add(radius).saturating_add(1));
        Self {
            units: &units[start.min(end)..end],
            start,
            cursor,
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = GalleryItem<'a>> + 'a {
        let start = self.start;
        let cursor = self.cursor;
        self.units.iter().enumerate().map(move |(offset, unit)| GalleryItem {
            index: start + offset,
            unit: unit.as_str(),
            current: start + offset == cursor,
        })
    }
}

/// Snapshot of everything the host draws for one frame.
pub enum Screen<'a> {
    Empty {
        title: &'a str,
        hint: &'a str,
        wpm: u16,
        emphasis: bool,
        stats: ReadingStats,
    },
    Reading {
        title: &'a str,
        layout: WordLayout<'a>,
        delay: DelayFactor,
        wpm: u16,
        playing: bool,
        emphasis: bool,
        progress_pct: u8,
        progress_label: &'a str,
        gallery: Gallery<'a>,
        stats: ReadingStats,
    },
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::content::tokenize;

    #[test]
    fn gallery_is_clipped_at_both_ends() {
        let units = tokenize("a b c d e f g");

        let gallery = Gallery::new(&units, 0, 2);
        let indices: Vec<_> = gallery.items().map(|item| item.index).collect();
        assert_eq!(indices, [0, 1, 2]);

        let gallery = Gallery::new(&units, 6, 2);
        let indices: Vec<_> = gallery.items().map(|item| item.index).collect();
        assert_eq!(indices, [4, 5, 6]);
    }

    #[test]
    fn gallery_marks_current_unit() {
        let units = tokenize("a b c d e f g");
        let gallery = Gallery::new(&units, 3, GALLERY_RADIUS);
        assert_eq!(gallery.len(), 7);

        let current: Vec<_> = gallery.items().filter(|item| item.current).collect();
        assert_eq!(
            current,
            [GalleryItem {
                index: 3,
                unit: "d",
                current: true,
            }]
        );
    }

    #[test]
    fn gallery_over_empty_units_is_empty() {
        let units: Vec<String> = Vec::new();
        assert!(Gallery::new(&units, 0, 3).is_empty());
    }
}
