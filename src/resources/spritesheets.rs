//! Spritesheet layouts.
//!
//! A loaded texture is sliced into a grid of fixed-size frames, numbered
//! left-to-right, top-to-bottom starting at 0. Plain images are registered as
//! a single frame covering the whole texture.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

/// Grid geometry of one loaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub texture_width: u32,
    pub texture_height: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    pub columns: u32,
    pub rows: u32,
}

impl SheetLayout {
    /// Slice a `tex_w`x`tex_h` texture into `frame_w`x`frame_h` frames.
    ///
    /// Partial frames at the right and bottom edges are dropped.
    pub fn slice(tex_w: u32, tex_h: u32, frame_w: u32, frame_h: u32) -> Self {
        let columns = tex_w.checked_div(frame_w).unwrap_or(0);
        let rows = tex_h.checked_div(frame_h).unwrap_or(0);
        Self {
            texture_width: tex_w,
            texture_height: tex_h,
            frame_width: frame_w,
            frame_height: frame_h,
            columns,
            rows,
        }
    }

    /// Layout of a plain image: one frame spanning the texture.
    pub fn whole(tex_w: u32, tex_h: u32) -> Self {
        Self::slice(tex_w, tex_h, tex_w, tex_h)
    }

    pub fn frame_count(&self) -> usize {
        (self.columns * self.rows) as usize
    }

    /// Frame numbers from `start` to `end` inclusive. `None` means the last
    /// frame of the sheet. Out-of-range bounds are clamped.
    pub fn frame_numbers(&self, start: usize, end: Option<usize>) -> Vec<usize> {
        let count = self.frame_count();
        if count == 0 || start >= count {
            return Vec::new();
        }
        let last = end.map_or(count - 1, |e| e.min(count - 1));
        (start..=last).collect()
    }
}

/// Layouts of every loaded texture, keyed like
/// [`TextureStore`](crate::resources::texturestore::TextureStore).
#[derive(Resource, Debug, Default)]
pub struct SpriteSheets {
    sheets: FxHashMap<String, SheetLayout>,
}

impl SpriteSheets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, layout: SheetLayout) {
        self.sheets.insert(key.into(), layout);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&SheetLayout> {
        self.sheets.get(key.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_horizontal_strip() {
        let layout = SheetLayout::slice(128, 32, 32, 32);
        assert_eq!(layout.columns, 4);
        assert_eq!(layout.rows, 1);
        assert_eq!(layout.frame_count(), 4);
    }

    #[test]
    fn test_slice_grid_drops_partial_frames() {
        let layout = SheetLayout::slice(100, 70, 32, 32);
        assert_eq!(layout.columns, 3);
        assert_eq!(layout.rows, 2);
        assert_eq!(layout.frame_count(), 6);
    }

    #[test]
    fn test_slice_frame_larger_than_texture() {
        let layout = SheetLayout::slice(16, 16, 32, 32);
        assert_eq!(layout.frame_count(), 0);
        assert!(layout.frame_numbers(0, None).is_empty());
    }

    #[test]
    fn test_slice_zero_frame_size() {
        let layout = SheetLayout::slice(16, 16, 0, 0);
        assert_eq!(layout.frame_count(), 0);
    }

    #[test]
    fn test_whole_image_is_one_frame() {
        let layout = SheetLayout::whole(320, 240);
        assert_eq!(layout.frame_count(), 1);
        assert_eq!(layout.frame_numbers(0, None), vec![0]);
    }

    #[test]
    fn test_frame_numbers_to_last() {
        let layout = SheetLayout::slice(128, 64, 32, 32);
        assert_eq!(layout.frame_numbers(0, None), (0..8).collect::<Vec<_>>());
        assert_eq!(layout.frame_numbers(2, Some(4)), vec![2, 3, 4]);
        assert_eq!(layout.frame_numbers(6, Some(100)), vec![6, 7]);
        assert!(layout.frame_numbers(8, None).is_empty());
    }

    #[test]
    fn test_store_insert_and_get() {
        let mut sheets = SpriteSheets::new();
        assert!(sheets.get("walk-anim").is_none());
        sheets.insert("walk-anim", SheetLayout::slice(64, 32, 32, 32));
        assert_eq!(sheets.get("walk-anim").unwrap().frame_count(), 2);
        assert!(sheets.get("walk-shadow").is_none());
    }
}
