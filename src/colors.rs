//! RGB color used for lighting accumulation and raster pixels.

/// Largest value a channel may hold once clamped.
pub const MAX_COLOR: i32 = 255;

/// An RGB triple.
///
/// Channels are plain integers so lighting terms can be summed (and go
/// negative) before [`Color::clamped`] limits them to `[0, 255]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

pub const BLACK: Color = Color::new(0, 0, 0);
pub const WHITE: Color = Color::new(255, 255, 255);

impl Color {
    pub const fn new(red: i32, green: i32, blue: i32) -> Self {
        Self { red, green, blue }
    }

    /// Every channel limited to `[0, MAX_COLOR]`.
    pub fn clamped(self) -> Self {
        Self {
            red: self.red.clamp(0, MAX_COLOR),
            green: self.green.clamp(0, MAX_COLOR),
            blue: self.blue.clamp(0, MAX_COLOR),
        }
    }

    /// Clamped channels as bytes.
    pub fn to_rgb(self) -> [u8; 3] {
        let c = self.clamped();
        [c.red as u8, c.green as u8, c.blue as u8]
    }

    /// Build a color from floating channels, truncating toward zero.
    pub fn from_f64(rgb: [f64; 3]) -> Self {
        Self::new(rgb[0] as i32, rgb[1] as i32, rgb[2] as i32)
    }
}

impl std::ops::Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(
            self.red + rhs.red,
            self.green + rhs.green,
            self.blue + rhs.blue,
        )
    }
}

impl std::ops::AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}
