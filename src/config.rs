//! Display configuration types and builder

use log::{debug, warn};

pub use crate::error::BuilderError;

/// Serial device opened when none is configured
pub const DEFAULT_DEVICE: &str = "/dev/ttyS0";

/// Output speed used when none (or an unsupported one) is configured
pub const DEFAULT_SPEED: u32 = 19_200;

/// Model identifier used when none (or an unknown one) is configured
pub const DEFAULT_MODEL: &str = "27977";

/// Default character cell width in pixels
pub const DEFAULT_CELL_WIDTH: u8 = 5;

/// Default character cell height in pixels
pub const DEFAULT_CELL_HEIGHT: u8 = 8;

/// Widest cell the glyph rows can describe
pub const MAX_CELL_WIDTH: u8 = 5;

/// Tallest cell a glyph can describe
pub const MAX_CELL_HEIGHT: u8 = crate::command::GLYPH_ROWS as u8;

/// Supported Parallax serial LCD models
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Model {
    /// 27976: 16x2, no backlight
    P27976,
    /// 27977: 16x2 with backlight
    #[default]
    P27977,
    /// 27979: 20x4 with backlight
    P27979,
}

impl Model {
    /// Resolve a model identifier such as `"27979"`
    ///
    /// Matching ignores ASCII case. Returns `None` for unknown identifiers.
    pub fn from_id(id: &str) -> Option<Self> {
        [Self::P27976, Self::P27977, Self::P27979]
            .into_iter()
            .find(|model| model.id().eq_ignore_ascii_case(id))
    }

    /// Model identifier as printed on the part
    pub fn id(self) -> &'static str {
        match self {
            Self::P27976 => "27976",
            Self::P27977 => "27977",
            Self::P27979 => "27979",
        }
    }

    /// Geometry of this model
    pub fn geometry(self) -> Geometry {
        let (width, height, has_backlight) = match self {
            Self::P27976 => (16, 2, false),
            Self::P27977 => (16, 2, true),
            Self::P27979 => (20, 4, true),
        };
        Geometry {
            width,
            height,
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            has_backlight,
        }
    }
}

/// Serial output speed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BaudRate {
    /// 2400 baud
    B2400,
    /// 9600 baud
    B9600,
    /// 19200 baud
    #[default]
    B19200,
}

impl BaudRate {
    /// Map a numeric speed to a supported baud rate
    pub fn from_speed(speed: u32) -> Option<Self> {
        match speed {
            2400 => Some(Self::B2400),
            9600 => Some(Self::B9600),
            19_200 => Some(Self::B19200),
            _ => None,
        }
    }

    /// Numeric speed in bits per second
    pub fn speed(self) -> u32 {
        match self {
            Self::B2400 => 2400,
            Self::B9600 => 9600,
            Self::B19200 => 19_200,
        }
    }
}

/// Display geometry
///
/// Immutable once the driver is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Width in character cells
    pub width: u8,
    /// Height in character cells
    pub height: u8,
    /// Cell width in pixels
    pub cell_width: u8,
    /// Cell height in pixels
    pub cell_height: u8,
    /// Whether the backlight commands have any effect
    pub has_backlight: bool,
}

impl Geometry {
    /// Create a geometry with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidGeometry` if any dimension is zero, or if
    /// the cell is larger than [`MAX_CELL_WIDTH`] x [`MAX_CELL_HEIGHT`].
    pub fn new(
        width: u8,
        height: u8,
        cell_width: u8,
        cell_height: u8,
        has_backlight: bool,
    ) -> Result<Self, BuilderError> {
        if width == 0
            || height == 0
            || !(1..=MAX_CELL_WIDTH).contains(&cell_width)
            || !(1..=MAX_CELL_HEIGHT).contains(&cell_height)
        {
            return Err(BuilderError::InvalidGeometry {
                width,
                height,
                cell_width,
                cell_height,
            });
        }
        Ok(Self {
            width,
            height,
            cell_width,
            cell_height,
            has_backlight,
        })
    }

    /// Number of character cells
    pub fn cells(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Resolved model
    pub model: Model,
    /// Resolved output speed
    pub baud_rate: BaudRate,
    /// Display geometry
    pub geometry: Geometry,
}

impl Default for Config {
    fn default() -> Self {
        let model = Model::default();
        Self {
            model,
            baud_rate: BaudRate::default(),
            geometry: model.geometry(),
        }
    }
}

/// Builder for constructing display configuration
///
/// Accepts the raw `Model` and `Speed` settings as the host reads them from its
/// configuration file. Unknown values are not fatal: they are replaced by the
/// defaults with a warning.
///
/// # Example
///
/// ```rust
/// use parallax_lcd::{BaudRate, Builder, Model};
///
/// let config = Builder::new().model("27979").speed(9600).build().unwrap();
/// assert_eq!(config.model, Model::P27979);
/// assert_eq!(config.baud_rate, BaudRate::B9600);
/// assert_eq!(config.geometry.width, 20);
/// ```
#[must_use]
pub struct Builder<'a> {
    /// Model identifier
    model: &'a str,
    /// Requested output speed
    speed: u32,
    /// Geometry override
    geometry: Option<Geometry>,
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL,
            speed: DEFAULT_SPEED,
            geometry: None,
        }
    }
}

impl<'a> Builder<'a> {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model identifier
    pub fn model(mut self, model: &'a str) -> Self {
        self.model = model;
        self
    }

    /// Set the output speed in baud (2400, 9600 or 19200)
    pub fn speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    /// Override the geometry derived from the model
    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidGeometry` if an overriding geometry is not
    /// valid, see [`Geometry::new`].
    pub fn build(self) -> Result<Config, BuilderError> {
        let baud_rate = BaudRate::from_speed(self.speed).unwrap_or_else(|| {
            warn!(
                "parallax: illegal Speed: {}; must be one of 2400, 9600, or 19200; using default {}",
                self.speed, DEFAULT_SPEED
            );
            BaudRate::default()
        });
        debug!("parallax: using Speed {}", baud_rate.speed());

        let model = Model::from_id(self.model).unwrap_or_else(|| {
            warn!("parallax: Unknown model; using defaults for {}", DEFAULT_MODEL);
            Model::default()
        });
        debug!("parallax: using Model \"{}\"", self.model);

        let geometry = match self.geometry {
            Some(g) => Geometry::new(
                g.width,
                g.height,
                g.cell_width,
                g.cell_height,
                g.has_backlight,
            )?,
            None => model.geometry(),
        };

        Ok(Config {
            model,
            baud_rate,
            geometry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_geometries() {
        let g = Model::P27976.geometry();
        assert_eq!((g.width, g.height, g.has_backlight), (16, 2, false));
        let g = Model::P27977.geometry();
        assert_eq!((g.width, g.height, g.has_backlight), (16, 2, true));
        let g = Model::P27979.geometry();
        assert_eq!((g.width, g.height, g.has_backlight), (20, 4, true));
        assert_eq!((g.cell_width, g.cell_height), (5, 8));
    }

    #[test]
    fn test_model_from_id_ignores_case() {
        assert_eq!(Model::from_id("27979"), Some(Model::P27979));
        assert_eq!(Model::from_id("27976"), Some(Model::P27976));
        assert_eq!(Model::from_id("lcd"), None);
        assert_eq!(Model::from_id(""), None);
    }

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.model, Model::P27977);
        assert_eq!(config.baud_rate, BaudRate::B19200);
    }

    #[test]
    fn test_builder_unknown_model_falls_back() {
        let config = Builder::new().model("12345").build().unwrap();
        assert_eq!(config.model, Model::P27977);
        assert_eq!(config.geometry.width, 16);
        assert_eq!(config.geometry.height, 2);
        assert!(config.geometry.has_backlight);
    }

    #[test]
    fn test_builder_large_model() {
        let config = Builder::new().model("27979").build().unwrap();
        assert_eq!(config.geometry.width, 20);
        assert_eq!(config.geometry.height, 4);
        assert!(config.geometry.has_backlight);
    }

    #[test]
    fn test_builder_illegal_speed_falls_back() {
        let config = Builder::new().speed(115_200).build().unwrap();
        assert_eq!(config.baud_rate, BaudRate::B19200);
        let config = Builder::new().speed(2400).build().unwrap();
        assert_eq!(config.baud_rate, BaudRate::B2400);
    }

    #[test]
    fn test_builder_geometry_override() {
        let geometry = Geometry::new(8, 1, 5, 7, false).unwrap();
        let config = Builder::new().geometry(geometry).build().unwrap();
        assert_eq!(config.geometry, geometry);
        assert_eq!(config.geometry.cells(), 8);
    }

    #[test]
    fn test_geometry_rejects_zero() {
        assert!(matches!(
            Geometry::new(0, 2, 5, 8, true),
            Err(BuilderError::InvalidGeometry { width: 0, .. })
        ));
        assert!(Geometry::new(16, 2, 5, 0, true).is_err());
    }

    #[test]
    fn test_geometry_rejects_oversized_cells() {
        assert!(matches!(
            Geometry::new(16, 2, 6, 8, true),
            Err(BuilderError::InvalidGeometry { cell_width: 6, .. })
        ));
        assert!(matches!(
            Geometry::new(16, 2, 5, 9, true),
            Err(BuilderError::InvalidGeometry { cell_height: 9, .. })
        ));
        assert!(Geometry::new(16, 2, 5, 8, true).is_ok());
    }

    #[test]
    fn test_builder_rejects_oversized_override() {
        let geometry = Geometry {
            width: 16,
            height: 2,
            cell_width: 5,
            cell_height: 9,
            has_backlight: true,
        };
        assert!(Builder::new().geometry(geometry).build().is_err());
    }

    #[test]
    fn test_baud_rate_roundtrip() {
        for speed in [2400, 9600, 19_200] {
            assert_eq!(BaudRate::from_speed(speed).map(BaudRate::speed), Some(speed));
        }
        assert_eq!(BaudRate::from_speed(4800), None);
    }
}
