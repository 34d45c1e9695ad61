//! Core types for the rasterizer

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    /// White with zero alpha, used as the transparent clear color
    pub const CLEAR: Color = Color { r: 255, g: 255, b: 255, a: 0 };

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to [u8; 4] for framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::with_alpha(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

/// How the canvas is cleared before any stroke is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundMode {
    /// White, exported with 3 channels
    #[default]
    Opaque,
    /// Fully transparent, exported with 4 channels
    Transparent,
}

impl BackgroundMode {
    pub fn from_transparent_flag(transparent: bool) -> Self {
        if transparent {
            BackgroundMode::Transparent
        } else {
            BackgroundMode::Opaque
        }
    }

    pub fn is_transparent(self) -> bool {
        self == BackgroundMode::Transparent
    }

    pub fn clear_color(self) -> Color {
        match self {
            BackgroundMode::Opaque => Color::WHITE,
            BackgroundMode::Transparent => Color::CLEAR,
        }
    }

    /// Channel count of the exported buffer
    pub fn channels(self) -> usize {
        match self {
            BackgroundMode::Opaque => 3,
            BackgroundMode::Transparent => 4,
        }
    }
}

/// Uniform stroke used for every feature in one render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Stroke width in whole pixels (at least 1)
    pub width: u32,
    pub color: Color,
}

impl StrokeStyle {
    /// Round a fractional line thickness to a pixel width, never below 1.
    /// Halves go to the even neighbour.
    pub fn from_thickness(thickness: f32, color: Color) -> Self {
        let width = if thickness.is_finite() {
            thickness.round_ties_even().max(1.0) as u32
        } else {
            1
        };
        Self { width, color }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 2,
            color: Color::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_width_rounds_and_floors_at_one() {
        assert_eq!(StrokeStyle::from_thickness(2.0, Color::BLACK).width, 2);
        assert_eq!(StrokeStyle::from_thickness(2.6, Color::BLACK).width, 3);
        assert_eq!(StrokeStyle::from_thickness(0.5, Color::BLACK).width, 1);
        assert_eq!(StrokeStyle::from_thickness(0.2, Color::BLACK).width, 1);
    }

    #[test]
    fn test_stroke_width_halves_round_to_even() {
        assert_eq!(StrokeStyle::from_thickness(2.5, Color::BLACK).width, 2);
        assert_eq!(StrokeStyle::from_thickness(3.5, Color::BLACK).width, 4);
        assert_eq!(StrokeStyle::from_thickness(4.5, Color::BLACK).width, 4);
        assert_eq!(StrokeStyle::from_thickness(1.5, Color::BLACK).width, 2);
    }

    #[test]
    fn test_background_channels() {
        assert_eq!(BackgroundMode::Opaque.channels(), 3);
        assert_eq!(BackgroundMode::Transparent.channels(), 4);
        assert_eq!(BackgroundMode::Transparent.clear_color().a, 0);
        assert_eq!(BackgroundMode::from_transparent_flag(true), BackgroundMode::Transparent);
    }
}
