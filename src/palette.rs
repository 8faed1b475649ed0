//! Wheel color schemes
//!
//! Every wheel carries five role-tagged colors. Schemes are grouped so that
//! several wheels share a base color, which is what makes color-linked
//! dispersal interesting to watch.

/// An opaque RGB color with unit-range channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Combine with an opacity in the 0-255 convention the sim uses
    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, (alpha / 255.0).clamp(0.0, 1.0)]
    }

    pub fn opaque(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

/// The five role-tagged colors of one wheel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelPalette {
    /// Body disc; also the key used to group wheels for dispersal
    pub base: Color,
    /// Rim accent ring
    pub outer_accent: Color,
    /// Hub ring behind the spokes
    pub inner_accent: Color,
    /// Spokes and spoke fragments
    pub spoke_accent: Color,
    /// Center cap
    pub center: Color,
}

/// Background clear color
pub const BACKDROP: [f32; 4] = [0.96, 0.94, 0.89, 1.0];

/// Connector stroke
pub const LINK: [f32; 4] = [0.22, 0.20, 0.18, 0.55];

/// Scheme table; layout picks one per wheel at random
pub const SCHEMES: &[WheelPalette] = &[
    WheelPalette {
        base: Color::rgb(196, 73, 63),
        outer_accent: Color::rgb(239, 178, 90),
        inner_accent: Color::rgb(249, 231, 196),
        spoke_accent: Color::rgb(121, 35, 42),
        center: Color::rgb(42, 57, 80),
    },
    WheelPalette {
        base: Color::rgb(196, 73, 63),
        outer_accent: Color::rgb(249, 231, 196),
        inner_accent: Color::rgb(239, 178, 90),
        spoke_accent: Color::rgb(42, 57, 80),
        center: Color::rgb(121, 35, 42),
    },
    WheelPalette {
        base: Color::rgb(58, 104, 145),
        outer_accent: Color::rgb(249, 231, 196),
        inner_accent: Color::rgb(143, 184, 203),
        spoke_accent: Color::rgb(28, 49, 68),
        center: Color::rgb(196, 73, 63),
    },
    WheelPalette {
        base: Color::rgb(58, 104, 145),
        outer_accent: Color::rgb(143, 184, 203),
        inner_accent: Color::rgb(249, 231, 196),
        spoke_accent: Color::rgb(196, 73, 63),
        center: Color::rgb(28, 49, 68),
    },
    WheelPalette {
        base: Color::rgb(104, 130, 62),
        outer_accent: Color::rgb(214, 205, 141),
        inner_accent: Color::rgb(249, 231, 196),
        spoke_accent: Color::rgb(54, 69, 31),
        center: Color::rgb(196, 73, 63),
    },
    WheelPalette {
        base: Color::rgb(222, 155, 56),
        outer_accent: Color::rgb(121, 35, 42),
        inner_accent: Color::rgb(249, 231, 196),
        spoke_accent: Color::rgb(131, 86, 24),
        center: Color::rgb(42, 57, 80),
    },
    WheelPalette {
        base: Color::rgb(222, 155, 56),
        outer_accent: Color::rgb(42, 57, 80),
        inner_accent: Color::rgb(239, 178, 90),
        spoke_accent: Color::rgb(121, 35, 42),
        center: Color::rgb(131, 86, 24),
    },
    WheelPalette {
        base: Color::rgb(86, 63, 100),
        outer_accent: Color::rgb(214, 205, 141),
        inner_accent: Color::rgb(196, 164, 196),
        spoke_accent: Color::rgb(48, 33, 60),
        center: Color::rgb(222, 155, 56),
    },
];
