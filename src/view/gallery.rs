//! Synthetic image files for the demo list.
//!
//! Each item is a caption row followed by a thumbnail whose row count
//! follows the image's aspect ratio, so heights vary across the list.

use crate::model::HeightSource;

/// Pixel dimensions cycled through by [`synthetic_gallery`].
const DIMENSIONS: [(u32, u32); 6] = [
    (1920, 1080),
    (1080, 1920),
    (1024, 1024),
    (4000, 3000),
    (800, 2400),
    (3840, 1600),
];

const EXTENSIONS: [&str; 3] = ["jpg", "png", "heic"];

/// Widest thumbnail, in rows, for a square image.
const BASE_THUMB_ROWS: u32 = 4;

/// Tallest thumbnail, in rows.
const MAX_THUMB_ROWS: u32 = 6;

/// One image file in the demo list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// File name shown in the caption row.
    pub name: String,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
}

impl ImageFile {
    /// Rows taken by the thumbnail, at least one.
    pub fn thumb_rows(&self) -> u16 {
        let rows = (BASE_THUMB_ROWS * self.height + self.width / 2) / self.width.max(1);
        rows.clamp(1, MAX_THUMB_ROWS) as u16
    }

    /// Total rows: caption plus thumbnail.
    pub fn rows(&self) -> u16 {
        1 + self.thumb_rows()
    }

    /// Thumbnail width in columns, keeping roughly the image's aspect ratio
    /// with terminal cells twice as tall as they are wide.
    pub fn thumb_cols(&self, max_cols: u16) -> u16 {
        let cols = 2 * u32::from(self.thumb_rows()) * self.width / self.height.max(1);
        cols.clamp(2, u32::from(max_cols.max(2))) as u16
    }
}

/// Deterministic list of `count` image files.
pub fn synthetic_gallery(count: usize) -> Vec<ImageFile> {
    (0..count)
        .map(|i| {
            // Stride through the tables so neighbours differ.
            let (width, height) = DIMENSIONS[(i * 7) % DIMENSIONS.len()];
            let ext = EXTENSIONS[(i * 5) % EXTENSIONS.len()];
            ImageFile {
                name: format!("IMG_{:05}.{ext}", i + 1),
                width,
                height,
            }
        })
        .collect()
}

/// Height source matching the rows each item renders.
pub fn heights(items: &[ImageFile]) -> HeightSource {
    HeightSource::from_heights(items.iter().map(|item| f64::from(item.rows())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32) -> ImageFile {
        ImageFile {
            name: "test.jpg".to_string(),
            width,
            height,
        }
    }

    #[test]
    fn thumbnail_rows_follow_aspect_ratio() {
        assert_eq!(image(1024, 1024).thumb_rows(), 4);
        assert_eq!(image(1920, 1080).thumb_rows(), 2);
        assert_eq!(image(4000, 3000).thumb_rows(), 3);
        assert_eq!(image(1080, 1920).thumb_rows(), 6);
        assert_eq!(image(3840, 1600).thumb_rows(), 2);
    }

    #[test]
    fn degenerate_dimensions_still_take_a_row() {
        assert_eq!(image(10_000, 1).thumb_rows(), 1);
        assert_eq!(image(0, 0).rows(), 2);
    }

    #[test]
    fn thumbnail_columns_are_capped() {
        assert_eq!(image(1024, 1024).thumb_cols(80), 8);
        assert_eq!(image(3840, 1600).thumb_cols(3), 3);
    }

    #[test]
    fn gallery_is_deterministic_and_varied() {
        let a = synthetic_gallery(12);
        let b = synthetic_gallery(12);
        assert_eq!(a, b);
        assert_eq!(a[0].name, "IMG_00001.jpg");

        let mut distinct: Vec<u16> = a.iter().map(ImageFile::rows).collect();
        distinct.sort_unstable();
        distinct.dedup();
        assert!(distinct.len() > 2, "row heights should vary: {distinct:?}");
    }

    #[test]
    fn heights_match_rendered_rows() {
        let items = synthetic_gallery(20);
        let source = heights(&items);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(source.height_of(i), f64::from(item.rows()));
        }
    }
}
