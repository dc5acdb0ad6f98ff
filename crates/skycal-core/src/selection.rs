//! Hemisphere selection over the uploaded image.

use crate::error::{CalibError, DomainError, ValidationError};
use crate::geometry::SourceRect;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decoded dimensions of the uploaded image. The raster itself stays with
/// the frontend that decoded it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
}

impl SourceImage {
    pub fn new(width: u32, height: u32) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::EmptyImage { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    #[inline]
    pub fn full_rect(&self) -> SourceRect {
        SourceRect::full(self.width, self.height)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    #[default]
    Undecided,
    Left,
    Right,
    Full,
}

impl Hemisphere {
    #[inline]
    pub fn is_decided(self) -> bool {
        self != Hemisphere::Undecided
    }

    /// Value sent to the services; an undecided choice is treated as `full`.
    pub fn wire(self) -> WireHemisphere {
        match self {
            Hemisphere::Left => WireHemisphere::Left,
            Hemisphere::Right => WireHemisphere::Right,
            Hemisphere::Undecided | Hemisphere::Full => WireHemisphere::Full,
        }
    }
}

impl FromStr for Hemisphere {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Hemisphere::Left),
            "right" => Ok(Hemisphere::Right),
            "full" => Ok(Hemisphere::Full),
            other => Err(ValidationError::UnknownHemisphere(other.to_string())),
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Hemisphere::Undecided => "undecided",
            Hemisphere::Left => "left",
            Hemisphere::Right => "right",
            Hemisphere::Full => "full",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireHemisphere {
    Left,
    Right,
    Full,
}

/// Source rectangle for a decided hemisphere. The right half absorbs the
/// odd column so that left and right widths always sum to the image width.
pub fn derive_rect(image: &SourceImage, hemisphere: Hemisphere) -> Result<SourceRect, CalibError> {
    let (w, h) = (image.width(), image.height());
    let half = w / 2;
    let rect = match hemisphere {
        Hemisphere::Undecided => return Err(ValidationError::UndecidedHemisphere.into()),
        Hemisphere::Full => SourceRect::full(w, h),
        Hemisphere::Left => SourceRect {
            sx: 0,
            sy: 0,
            sw: half,
            sh: h,
        },
        Hemisphere::Right => SourceRect {
            sx: half,
            sy: 0,
            sw: w - half,
            sh: h,
        },
    };
    if !rect.is_within(w, h) {
        return Err(DomainError::RectOutOfBounds {
            sx: rect.sx,
            sy: rect.sy,
            sw: rect.sw,
            sh: rect.sh,
            width: w,
            height: h,
        }
        .into());
    }
    Ok(rect)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub dual: bool,
    pub ratio: f64,
}

/// Heuristic: an image whose width/height falls in the closed band is
/// treated as a side-by-side dual fisheye.
pub fn classify_with(image: &SourceImage, min_ratio: f64, max_ratio: f64) -> Classification {
    let ratio = image.aspect();
    Classification {
        dual: (min_ratio..=max_ratio).contains(&ratio),
        ratio,
    }
}

pub fn classify(image: &SourceImage) -> Classification {
    use crate::constants::{DUAL_RATIO_MAX, DUAL_RATIO_MIN};
    classify_with(image, DUAL_RATIO_MIN, DUAL_RATIO_MAX)
}

/// The chosen hemisphere and the rectangle derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    image: SourceImage,
    classification: Classification,
    hemisphere: Hemisphere,
    rect: Option<SourceRect>,
}

impl Selection {
    /// Fresh selection for a newly decoded image: undecided when the image
    /// looks dual, otherwise locked to the full frame.
    pub fn for_image(image: SourceImage, classification: Classification) -> Self {
        let (hemisphere, rect) = if classification.dual {
            (Hemisphere::Undecided, None)
        } else {
            (Hemisphere::Full, Some(image.full_rect()))
        };
        Self {
            image,
            classification,
            hemisphere,
            rect,
        }
    }

    pub fn image(&self) -> &SourceImage {
        &self.image
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Derived rectangle, `None` while undecided.
    pub fn rect(&self) -> Option<SourceRect> {
        self.rect
    }

    /// What the previews show: the derived rectangle, or the whole image
    /// while the choice is still open.
    pub fn display_rect(&self) -> SourceRect {
        self.rect.unwrap_or_else(|| self.image.full_rect())
    }

    /// Returns whether the hemisphere actually changed.
    pub fn set_hemisphere(&mut self, hemisphere: Hemisphere) -> Result<bool, CalibError> {
        let rect = derive_rect(&self.image, hemisphere)?;
        let changed = self.hemisphere != hemisphere;
        self.hemisphere = hemisphere;
        self.rect = Some(rect);
        Ok(changed)
    }
}
