//! Video resolutions and orientations.

use rcvis_error::{MovieError, MovieErrorKind};
use serde::{Deserialize, Serialize};

/// Largest accepted width or height, in pixels.
pub const MAX_DIMENSION: u32 = 1920;

/// A validated video resolution with both dimensions in `[1, 1920]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}x{}", width, height)]
#[serde(try_from = "RawResolution", into = "RawResolution")]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    /// Default landscape variant, 1920x1080.
    pub const HORIZONTAL: Self = Self {
        width: 1920,
        height: 1080,
    };

    /// Default portrait variant, 1080x1920.
    pub const VERTICAL: Self = Self {
        width: 1080,
        height: 1920,
    };

    /// Creates a resolution, rejecting dimensions outside `[1, 1920]`.
    ///
    /// ```
    /// use rcvis_core::Resolution;
    ///
    /// assert!(Resolution::new(1920, 1080).is_ok());
    /// assert!(Resolution::new(0, 1080).is_err());
    /// assert!(Resolution::new(1080, 1921).is_err());
    /// ```
    #[track_caller]
    pub fn new(width: u32, height: u32) -> Result<Self, MovieError> {
        let valid = |d: u32| (1..=MAX_DIMENSION).contains(&d);
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(MovieError::new(MovieErrorKind::InvalidResolution {
                width,
                height,
            }))
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Which variant this resolution belongs to.
    pub fn orientation(&self) -> Orientation {
        if self.height > self.width {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawResolution {
    width: u32,
    height: u32,
}

impl TryFrom<RawResolution> for Resolution {
    type Error = MovieError;

    fn try_from(raw: RawResolution) -> Result<Self, Self::Error> {
        Resolution::new(raw.width, raw.height)
    }
}

impl From<Resolution> for RawResolution {
    fn from(r: Resolution) -> Self {
        Self {
            width: r.width,
            height: r.height,
        }
    }
}

/// One of the two rendered variants of the same content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Orientation {
    /// Landscape
    Horizontal,
    /// Portrait
    Vertical,
}
