use std::fmt;

/// RGB color representation.
///
/// Represents a color using red, green, and blue components, each in the range 0-255.
/// This is the form RTF color tables take.
///
/// # Examples
///
/// ```rust
/// use pro6doc::common::RGBColor;
///
/// // Create a red color
/// let red = RGBColor::new(255, 0, 0);
///
/// // Create from hex string
/// let blue = RGBColor::from_hex("0000FF").unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    /// Opaque black, the fallback text color.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a new RGB color.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pro6doc::common::RGBColor;
    ///
    /// let color = RGBColor::new(255, 128, 0); // Orange
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an RGB color from a hex string.
    ///
    /// # Arguments
    ///
    /// * `hex` - Hex color string (e.g., "FF0000" or "#FF0000")
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pro6doc::common::RGBColor;
    ///
    /// let red = RGBColor::from_hex("FF0000").unwrap();
    /// let blue = RGBColor::from_hex("#0000FF").unwrap();
    /// assert!(RGBColor::from_hex("blue").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b))
    }

    /// Parse a `#RRGGBB` text color, falling back to black for anything else.
    ///
    /// Only strings starting with `#` are considered, matching how slide
    /// sidecars spell colors.
    pub fn from_text_color(color: &str) -> Self {
        if color.starts_with('#') {
            Self::from_hex(color).unwrap_or(Self::BLACK)
        } else {
            Self::BLACK
        }
    }

    /// Convert to hex string (without # prefix).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pro6doc::common::RGBColor;
    ///
    /// let color = RGBColor::new(255, 0, 0);
    /// assert_eq!(color.to_hex(), "FF0000");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// RGBA color with components normalized to `[0, 1]`.
///
/// Displays as four space-separated decimals (`"0 0 0.9981992244720459 1"`),
/// the form presentation documents use for group, slide and fill colors.
/// Components print in their shortest round-trip form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbaColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl RgbaColor {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from normalized components.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from normalized RGB components.
    #[inline]
    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Move the RGB components toward white by `fraction` (0 keeps the color,
    /// 1 yields white). Alpha is kept.
    pub fn lighten(&self, fraction: f64) -> Self {
        let mix = |c: f64| c + (1.0 - c) * fraction;
        Self::new(mix(self.r), mix(self.g), mix(self.b), self.a)
    }

    /// Parse a space-separated `"r g b a"` string.
    ///
    /// Every component must be a finite number in `[0, 1]`.
    pub fn parse_components(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace().map(|p| {
            p.parse::<f64>()
                .ok()
                .filter(|c| (0.0..=1.0).contains(c))
        });
        let r = parts.next()??;
        let g = parts.next()??;
        let b = parts.next()??;
        let a = parts.next()??;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(r, g, b, a))
    }

    /// Parse a user supplied color: `#RRGGBB`, `#RRGGBBAA` or `"r g b a"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pro6doc::common::RgbaColor;
    ///
    /// assert_eq!(RgbaColor::parse_user("#FF0000"), Some(RgbaColor::opaque(1.0, 0.0, 0.0)));
    /// assert_eq!(RgbaColor::parse_user("0 0 0 1"), Some(RgbaColor::BLACK));
    /// assert_eq!(RgbaColor::parse_user("tomato"), None);
    /// assert_eq!(RgbaColor::parse_user("2 -1 NaN 1"), None);
    /// ```
    pub fn parse_user(color: &str) -> Option<Self> {
        let Some(hex) = color.strip_prefix('#') else {
            return Self::parse_components(color);
        };
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .map(|v| f64::from(v) / 255.0)
        };
        match hex.len() {
            6 => Some(Self::opaque(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Like [`parse_user`](Self::parse_user), falling back to black.
    pub fn from_user(color: &str) -> Self {
        Self::parse_user(color).unwrap_or(Self::BLACK)
    }
}

impl fmt::Display for RgbaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.r, self.g, self.b, self.a)
    }
}
