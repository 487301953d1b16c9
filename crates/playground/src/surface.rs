//! The raster surface that demos draw onto.
//!
//! Coordinates given to the surface are logical ("CSS") pixels. The backing storage is scaled
//! by the pixel density so that circles stay crisp on dense displays.

use color_eyre::eyre::{bail, ContextCompat as _, Result};
use palette::blend::Compose as _;
use palette::{LinSrgba, Srgba};

use crate::colours::Colour;

/// The most device pixels a surface will provision, 4096x4096. Anything bigger is refused
/// rather than allocated.
pub const MAX_DEVICE_PIXELS: usize = 4096 * 4096;

/// Everything needed to draw a single filled circle.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Circle {
    /// Centre, in logical pixels.
    pub centre: glam::Vec2,
    /// Radius, in logical pixels.
    pub radius: f32,
    /// Fill colour.
    pub colour: Colour,
    /// Opacity, 0.0 to 1.0.
    pub alpha: f32,
    /// The width of a soft glow around the circle, in logical pixels.
    pub glow: Option<f32>,
}

impl Circle {
    /// A plain, fully opaque circle.
    #[must_use]
    pub const fn new(centre: glam::Vec2, radius: f32, colour: Colour) -> Self {
        Self {
            centre,
            radius,
            colour,
            alpha: 1.0,
            glow: None,
        }
    }

    /// Set the opacity.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Add a glow of the given width.
    #[must_use]
    pub const fn with_glow(mut self, width: f32) -> Self {
        self.glow = Some(width);
        self
    }
}

/// `Surface`
#[derive(Clone, Debug)]
pub struct Surface {
    /// Logical width of the container.
    pub width: f32,
    /// Logical height of the container.
    pub height: f32,
    /// How many device pixels make up one logical pixel.
    pub pixel_density: f32,
    /// Width of the backing storage in device pixels.
    columns: usize,
    /// Height of the backing storage in device pixels.
    rows: usize,
    /// Row-major pixels in linear colour space, ready for blending.
    pixels: Vec<LinSrgba>,
}

impl Surface {
    /// Create a surface for a container of the given logical size.
    pub fn new(width: f32, height: f32, pixel_density: f32) -> Result<Self> {
        let mut surface = Self {
            width: 0.0,
            height: 0.0,
            pixel_density,
            columns: 0,
            rows: 0,
            pixels: Vec::new(),
        };
        surface.resize(width, height)?;
        Ok(surface)
    }

    /// Whether there is anything to draw on. A surface of zero size hasn't been mounted yet.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.columns > 0 && self.rows > 0
    }

    /// The size of the backing storage in device pixels.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// Follow the container's new size, re-provisioning the backing storage. Sizes that aren't
    /// finite, or that would need more than [`MAX_DEVICE_PIXELS`], are refused and the surface
    /// is left as it was.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        let (columns, rows) = Self::provision(width, height, self.pixel_density)?;

        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.columns = columns;
        self.rows = rows;
        self.pixels = vec![Self::transparent(); columns * rows];
        tracing::debug!(
            "Surface resized to {}x{} ({}x{} device pixels)",
            self.width,
            self.height,
            self.columns,
            self.rows
        );
        Ok(())
    }

    /// Change the pixel density, for example when a window moves to another display.
    pub fn set_pixel_density(&mut self, pixel_density: f32) -> Result<()> {
        Self::provision(self.width, self.height, pixel_density)?;
        self.pixel_density = pixel_density;
        self.resize(self.width, self.height)
    }

    /// The backing storage size for a logical size, if it's one we can allocate.
    fn provision(width: f32, height: f32, pixel_density: f32) -> Result<(usize, usize)> {
        if !width.is_finite() || !height.is_finite() || !pixel_density.is_finite() {
            bail!("Surface size must be finite, got {width}x{height} at density {pixel_density}");
        }

        let columns = Self::device_pixels(width, pixel_density);
        let rows = Self::device_pixels(height, pixel_density);
        columns
            .checked_mul(rows)
            .filter(|area| *area <= MAX_DEVICE_PIXELS)
            .with_context(|| {
                format!("Surface of {columns}x{rows} device pixels is too big to provision")
            })?;
        Ok((columns, rows))
    }

    /// Wipe the whole surface, ready for a new frame.
    pub fn clear(&mut self) {
        self.pixels.fill(Self::transparent());
    }

    /// A fully transparent pixel.
    fn transparent() -> LinSrgba {
        LinSrgba::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Draw a filled, anti-aliased circle, with its glow underneath if it has one.
    pub fn fill_circle(&mut self, circle: &Circle) {
        if !self.is_ready() || circle.radius <= 0.0 || circle.alpha <= 0.0 {
            return;
        }

        let centre = circle.centre * self.pixel_density;
        let radius = circle.radius * self.pixel_density;
        let glow = circle.glow.map_or(0.0, |width| width * self.pixel_density);
        let reach = radius + glow + 1.0;

        let linear: palette::LinSrgb = circle.colour.into_linear();
        let (min_column, max_column) = Self::span(centre.x, reach, self.columns);
        let (min_row, max_row) = Self::span(centre.y, reach, self.rows);

        for row in min_row..max_row {
            for column in min_column..max_column {
                let pixel_centre = glam::Vec2::new(
                    Self::as_f32(column) + 0.5,
                    Self::as_f32(row) + 0.5,
                );
                let distance = pixel_centre.distance(centre);
                let coverage = Self::coverage(distance, radius, glow);
                if coverage <= 0.0 {
                    continue;
                }

                let incoming: LinSrgba = LinSrgba::new(
                    linear.red,
                    linear.green,
                    linear.blue,
                    circle.alpha * coverage,
                );
                if let Some(pixel) = self.pixels.get_mut(row * self.columns + column) {
                    *pixel = incoming.over(*pixel);
                }
            }
        }
    }

    /// How much of a pixel, at `distance` from the centre, is covered by the circle and its
    /// glow.
    fn coverage(distance: f32, radius: f32, glow: f32) -> f32 {
        let disc = (radius - distance + 0.5).clamp(0.0, 1.0);
        if glow <= 0.0 || distance <= radius {
            return disc;
        }

        let falloff = (1.0 - (distance - radius) / glow).clamp(0.0, 1.0);
        disc.max(0.5 * falloff * falloff)
    }

    /// The range of device pixels that a circle can touch along one axis.
    #[expect(
        clippy::as_conversions,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "The values are clamped to the surface before casting"
    )]
    fn span(centre: f32, reach: f32, limit: usize) -> (usize, usize) {
        let limit_f32 = Self::as_f32(limit);
        let start = (centre - reach).floor().clamp(0.0, limit_f32) as usize;
        let end = (centre + reach).ceil().clamp(0.0, limit_f32) as usize;
        (start, end)
    }

    /// Logical size to device pixels.
    #[expect(
        clippy::as_conversions,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "The cast saturates, and the result is checked before allocating"
    )]
    fn device_pixels(logical: f32, pixel_density: f32) -> usize {
        (logical * pixel_density).ceil().max(0.0) as usize
    }

    /// Pixel indices are always small enough to be exact as `f32`.
    #[expect(
        clippy::as_conversions,
        clippy::cast_precision_loss,
        reason = "Pixel indices are small"
    )]
    fn as_f32(value: usize) -> f32 {
        value as f32
    }

    /// Read a single device pixel as an 8-bit sRGBA colour.
    #[must_use]
    pub fn pixel(&self, column: usize, row: usize) -> Option<Srgba<u8>> {
        if column >= self.columns {
            return None;
        }
        self.pixels
            .get(row * self.columns + column)
            .map(|pixel| Srgba::<f32>::from_linear(*pixel).into_format::<u8, u8>())
    }

    /// Convert the frame into an image.
    pub fn to_image(&self) -> Result<image::RgbaImage> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            let srgba = Srgba::<f32>::from_linear(*pixel).into_format::<u8, u8>();
            bytes.extend_from_slice(&[srgba.red, srgba.green, srgba.blue, srgba.alpha]);
        }

        image::RgbaImage::from_raw(
            u32::try_from(self.columns)?,
            u32::try_from(self.rows)?,
            bytes,
        )
        .context("Couldn't build image from surface pixels")
    }

    /// Save the frame as a PNG.
    pub fn save_png(&self, path: &std::path::Path) -> Result<()> {
        self.to_image()?.save(path)?;
        tracing::debug!("Saved frame to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use glam::Vec2;

    const RED: Colour = Colour::new(1.0, 0.0, 0.0);

    #[test]
    fn backing_storage_follows_density() {
        let mut surface = Surface::new(10.0, 5.0, 2.0).unwrap();
        assert_eq!(surface.dimensions(), (20, 10));

        surface.resize(3.5, 1.0).unwrap();
        assert_eq!(surface.dimensions(), (7, 2));

        surface.set_pixel_density(1.0).unwrap();
        assert_eq!(surface.dimensions(), (4, 1));
    }

    #[test]
    fn oversized_and_non_finite_sizes_are_refused() {
        let mut surface = Surface::new(10.0, 5.0, 2.0).unwrap();

        assert!(surface.resize(1e19, 1e19).is_err());
        assert!(surface.resize(20_000.0, 20_000.0).is_err());
        assert!(surface.resize(f32::INFINITY, 10.0).is_err());
        assert!(surface.resize(10.0, f32::NAN).is_err());
        assert!(surface.set_pixel_density(1e10).is_err());

        assert_eq!(surface.dimensions(), (20, 10));
        assert!((surface.width - 10.0).abs() < f32::EPSILON);
        assert!((surface.pixel_density - 2.0).abs() < f32::EPSILON);
        assert!(surface.is_ready());

        surface.resize(4096.0, 4096.0).unwrap_err();
        surface.set_pixel_density(1.0).unwrap();
        surface.resize(4096.0, 4096.0).unwrap();
        assert_eq!(surface.dimensions(), (4096, 4096));
    }

    #[test]
    fn oversized_config_is_an_error() {
        assert!(Surface::new(1e19, 1e19, 1.0).is_err());
    }

    #[test]
    fn unmounted_surface_is_not_ready() {
        let surface = Surface::new(0.0, 100.0, 1.0).unwrap();
        assert!(!surface.is_ready());
    }

    #[test]
    fn fill_circle_paints_centre_but_not_corners() {
        let mut surface = Surface::new(20.0, 20.0, 1.0).unwrap();
        surface.fill_circle(&Circle::new(Vec2::new(10.0, 10.0), 5.0, RED));

        let centre = surface.pixel(10, 10).unwrap();
        assert_eq!((centre.red, centre.green, centre.blue, centre.alpha), (255, 0, 0, 255));

        let corner = surface.pixel(0, 0).unwrap();
        assert_eq!(corner.alpha, 0);
    }

    #[test]
    fn alpha_is_respected() {
        let mut surface = Surface::new(10.0, 10.0, 1.0).unwrap();
        surface.fill_circle(&Circle::new(Vec2::new(5.0, 5.0), 3.0, RED).with_alpha(0.5));
        let centre = surface.pixel(5, 5).unwrap();
        assert!((120..=135).contains(&centre.alpha));
    }

    #[test]
    fn glow_reaches_beyond_the_radius() {
        let mut plain = Surface::new(30.0, 30.0, 1.0).unwrap();
        plain.fill_circle(&Circle::new(Vec2::new(15.0, 15.0), 4.0, RED));
        let mut glowing = Surface::new(30.0, 30.0, 1.0).unwrap();
        glowing.fill_circle(&Circle::new(Vec2::new(15.0, 15.0), 4.0, RED).with_glow(6.0));

        assert_eq!(plain.pixel(22, 15).unwrap().alpha, 0);
        assert!(glowing.pixel(22, 15).unwrap().alpha > 0);
    }

    #[test]
    fn circles_partly_off_surface_are_clipped() {
        let mut surface = Surface::new(10.0, 10.0, 1.0).unwrap();
        surface.fill_circle(&Circle::new(Vec2::new(-2.0, 5.0), 4.0, RED));
        assert!(surface.pixel(0, 5).unwrap().alpha > 0);
        assert_eq!(surface.pixel(9, 5).unwrap().alpha, 0);
    }

    #[test]
    fn clear_wipes_everything() {
        let mut surface = Surface::new(10.0, 10.0, 1.0).unwrap();
        surface.fill_circle(&Circle::new(Vec2::new(5.0, 5.0), 3.0, RED));
        surface.clear();
        assert_eq!(surface.pixel(5, 5).unwrap().alpha, 0);
    }

    #[test]
    fn export_png() {
        let mut surface = Surface::new(8.0, 4.0, 1.0).unwrap();
        surface.fill_circle(&Circle::new(Vec2::new(4.0, 2.0), 2.0, RED));
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("frame.png");
        surface.save_png(&path).unwrap();

        let image = image::open(&path).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (8, 4));
        assert_eq!(image.get_pixel(4, 2).0, [255, 0, 0, 255]);
    }
}
