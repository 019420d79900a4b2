//! Presentation helpers for camera frames.
//!
//! The scan loop never touches pixels; these helpers are for [`Preview`]
//! implementations that want the usual scanner UX — a mirrored feed with
//! a green outline around each decoded symbol.
//!
//! [`Preview`]: crate::scanner::Preview

use image::{Rgb, RgbImage};

use crate::models::BoundingBox;

/// Outline color for decoded symbols.
const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
/// Outline thickness in pixels.
const BOX_THICKNESS: u32 = 2;

/// Mirror a frame horizontally, selfie style, for the live preview.
pub fn mirror(frame: &RgbImage) -> RgbImage {
    image::imageops::flip_horizontal(frame)
}

/// Draw a rectangle outline around `bounds`, clamped to the frame.
pub fn draw_box(frame: &mut RgbImage, bounds: &BoundingBox) {
    let (frame_w, frame_h) = frame.dimensions();
    let x0 = bounds.x.min(frame_w);
    let y0 = bounds.y.min(frame_h);
    let x1 = bounds.right().min(frame_w);
    let y1 = bounds.bottom().min(frame_h);

    for y in y0..y1 {
        for x in x0..x1 {
            let near_vertical_edge = x - x0 < BOX_THICKNESS || x1 - 1 - x < BOX_THICKNESS;
            let near_horizontal_edge = y - y0 < BOX_THICKNESS || y1 - 1 - y < BOX_THICKNESS;
            if near_vertical_edge || near_horizontal_edge {
                frame.put_pixel(x, y, BOX_COLOR);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_flips_horizontally() {
        let mut frame = RgbImage::new(4, 1);
        frame.put_pixel(0, 0, Rgb([255, 0, 0]));
        let mirrored = mirror(&frame);
        assert_eq!(mirrored.dimensions(), (4, 1));
        assert_eq!(*mirrored.get_pixel(3, 0), Rgb([255, 0, 0]));
        assert_eq!(*mirrored.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_draw_box_outlines_without_filling() {
        let mut frame = RgbImage::new(20, 20);
        draw_box(&mut frame, &BoundingBox::new(2, 2, 10, 10));

        // Corners and edges are painted.
        assert_eq!(*frame.get_pixel(2, 2), BOX_COLOR);
        assert_eq!(*frame.get_pixel(11, 11), BOX_COLOR);
        assert_eq!(*frame.get_pixel(6, 3), BOX_COLOR);
        // The interior is untouched.
        assert_eq!(*frame.get_pixel(6, 6), Rgb([0, 0, 0]));
        // Pixels outside the box are untouched.
        assert_eq!(*frame.get_pixel(13, 13), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_draw_box_clamps_to_frame() {
        let mut frame = RgbImage::new(8, 8);
        // Must not panic even when the box hangs off the frame.
        draw_box(&mut frame, &BoundingBox::new(5, 5, 100, 100));
        assert_eq!(*frame.get_pixel(7, 7), BOX_COLOR);
    }
}
