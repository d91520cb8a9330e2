use accent_color::{PixelSource, Rgb, RgbImage};

/// Center `image` on a canvas of `color`, with `padding` pixels on every
/// side.
pub fn compose(image: &RgbImage, color: Rgb, padding: u32) -> RgbImage {
    let width = image.width() + 2 * padding;
    let height = image.height() + 2 * padding;
    let inside = |v: u32, len: u32| v >= padding && v - padding < len;

    RgbImage::from_fn(width, height, |x, y| {
        if inside(x, image.width()) && inside(y, image.height()) {
            image.pixel(x - padding, y - padding)
        } else {
            color
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_adds_padding() {
        let image = RgbImage::filled(3, 2, Rgb::WHITE);
        let accent = Rgb::from_u8(10, 20, 30);
        let canvas = compose(&image, accent, 4);

        assert_eq!((canvas.width(), canvas.height()), (11, 10));
        assert_eq!(canvas.pixel(0, 0), accent);
        assert_eq!(canvas.pixel(3, 4), accent);
        assert_eq!(canvas.pixel(4, 4), Rgb::WHITE);
        assert_eq!(canvas.pixel(6, 5), Rgb::WHITE);
        assert_eq!(canvas.pixel(7, 5), accent);
        assert_eq!(canvas.pixel(6, 6), accent);
        let accent_pixels = canvas.pixels().iter().filter(|&&p| p == accent).count();
        assert_eq!(accent_pixels, 11 * 10 - 3 * 2);
    }

    #[test]
    fn test_compose_without_padding_is_identity() {
        let image = RgbImage::from_fn(4, 4, |x, y| Rgb::from_u8(x as u8, y as u8, 0));
        assert_eq!(compose(&image, Rgb::BLACK, 0), image);
    }
}
