//! Reusable UI components

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};

use crate::assets::ImageAsset;

/// Draws a picture with half-block cells: each terminal cell shows two
/// vertically stacked pixels (foreground = top, background = bottom).
pub struct PixelArt<'a> {
    image: &'a ImageAsset,
    background: Color,
}

impl<'a> PixelArt<'a> {
    pub fn new(image: &'a ImageAsset, background: Color) -> Self {
        Self { image, background }
    }

    /// Cells needed to show the whole picture
    pub fn size(image: &ImageAsset) -> (u16, u16) {
        let w = image.width().min(u16::MAX as u32) as u16;
        let h = image.height().div_ceil(2).min(u16::MAX as u32) as u16;
        (w, h)
    }

    fn color_at(&self, x: u32, y: u32) -> Color {
        match self.image.pixel(x, y) {
            Some([r, g, b, a]) if a > 0 => blend([r, g, b], a, self.background),
            _ => self.background,
        }
    }
}

/// Alpha-blend a pixel over the panel colour
fn blend(rgb: [u8; 3], alpha: u8, background: Color) -> Color {
    let Color::Rgb(br, bg, bb) = background else {
        return Color::Rgb(rgb[0], rgb[1], rgb[2]);
    };
    let mix = |fg: u8, bg: u8| -> u8 {
        let a = alpha as u16;
        ((fg as u16 * a + bg as u16 * (255 - a)) / 255) as u8
    };
    Color::Rgb(mix(rgb[0], br), mix(rgb[1], bg), mix(rgb[2], bb))
}

impl Widget for PixelArt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (w, h) = Self::size(self.image);
        let w = w.min(area.width);
        let h = h.min(area.height);

        for row in 0..h {
            for col in 0..w {
                let top = self.color_at(col as u32, row as u32 * 2);
                let bottom = self.color_at(col as u32, row as u32 * 2 + 1);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol("▀").set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_renders_background() {
        let image = ImageAsset::placeholder(4);
        assert_eq!(PixelArt::size(&image), (4, 2));

        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        let panel = Color::Rgb(37, 37, 37);
        PixelArt::new(&image, panel).render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, panel);
        assert_eq!(cell.bg, panel);
        // Outside the picture nothing is drawn
        assert_eq!(buf[(5, 0)].symbol(), " ");
    }

    #[test]
    fn test_blend() {
        let panel = Color::Rgb(0, 0, 0);
        assert_eq!(blend([255, 255, 255], 255, panel), Color::Rgb(255, 255, 255));
        assert_eq!(blend([200, 100, 0], 0, panel), Color::Rgb(0, 0, 0));
    }
}
