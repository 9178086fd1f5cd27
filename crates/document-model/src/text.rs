//! Typography shared by text blocks.
//!
//! A [`TextProperties`] value is meant to be defined once and reused as the
//! base style for many text blocks; per-block tweaks are derived copies made
//! with [`TextProperties::with_attribute`].

use std::fmt;
use std::str::FromStr;

use gtcompose_common::error::{GtError, GtResult};
use serde::{Deserialize, Serialize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment inside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

/// Word wrapping behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordWrapping {
    NoWrap,
    Wrap,
}

/// How the block resizes to fit its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutoSize {
    /// No automatic sizing; the frame is used as given.
    Fixed,
    Width,
    Height,
    WidthAndHeight,
    /// Shrink the font until the text fits.
    Shrink,
}

macro_rules! keyword_enum {
    ($ty:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            /// Keyword used in the package format.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        /// Accepts the package keyword or its snake_case spelling, any case.
        impl FromStr for $ty {
            type Err = GtError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted: String = s.chars().filter(|c| *c != '_').collect();
                $(
                    if wanted.eq_ignore_ascii_case($label) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(GtError::invalid_format(format!(
                    "'{s}' is not a valid {}",
                    stringify!($ty)
                )))
            }
        }
    };
}

keyword_enum!(TextAlign { Left => "Left", Center => "Center", Right => "Right" });
keyword_enum!(VerticalAlign { Top => "Top", Center => "Center", Bottom => "Bottom" });
keyword_enum!(WordWrapping { NoWrap => "NoWrap", Wrap => "Wrap" });
keyword_enum!(AutoSize {
    Fixed => "Fixed",
    Width => "Width",
    Height => "Height",
    WidthAndHeight => "WidthAndHeight",
    Shrink => "Shrink",
});

/// Font and paragraph settings for a text block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextProperties {
    font_family: String,
    font_size: f64,
    text_align: TextAlign,
    font_weight: Option<String>,
    vertical_align: Option<VerticalAlign>,
    word_wrapping: Option<WordWrapping>,
    ignore_overhang: Option<bool>,
    line_spacing: Option<i32>,
    auto_size: Option<AutoSize>,
}

/// One recognised override for [`TextProperties::with_attribute`].
#[derive(Debug, Clone, PartialEq)]
pub enum TextAttribute {
    FontFamily(String),
    FontSize(f64),
    FontWeight(String),
    TextAlign(TextAlign),
    VerticalAlign(VerticalAlign),
    WordWrapping(WordWrapping),
    IgnoreOverhang(bool),
    LineSpacing(i32),
    AutoSize(AutoSize),
}

impl TextAttribute {
    /// Keys accepted by [`TextAttribute::parse`].
    pub const KEYS: [&'static str; 9] = [
        "font_family",
        "font_size",
        "font_weight",
        "text_align",
        "vertical_align",
        "word_wrapping",
        "ignore_overhang",
        "line_spacing",
        "auto_size",
    ];

    /// Build an attribute from a `snake_case` key and a string value.
    pub fn parse(key: &str, value: &str) -> GtResult<Self> {
        let attr = match key {
            "font_family" => Self::FontFamily(value.to_string()),
            "font_size" => Self::FontSize(parse_number(key, value)?),
            "font_weight" => Self::FontWeight(value.to_string()),
            "text_align" => Self::TextAlign(value.parse()?),
            "vertical_align" => Self::VerticalAlign(value.parse()?),
            "word_wrapping" => Self::WordWrapping(value.parse()?),
            "ignore_overhang" => Self::IgnoreOverhang(parse_bool(key, value)?),
            "line_spacing" => Self::LineSpacing(parse_number(key, value)?),
            "auto_size" => Self::AutoSize(value.parse()?),
            other => return Err(GtError::unknown_attribute(other)),
        };
        Ok(attr)
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> GtResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| GtError::invalid_format(format!("{key}: '{value}' is not a number")))
}

fn parse_bool(key: &str, value: &str) -> GtResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(GtError::invalid_format(format!(
            "{key}: '{value}' is not a boolean"
        ))),
    }
}

impl TextProperties {
    pub fn new(font_family: impl Into<String>, font_size: f64) -> GtResult<Self> {
        let font_family = font_family.into();
        check_family(&font_family)?;
        check_size(font_size)?;
        Ok(Self {
            font_family,
            font_size,
            text_align: TextAlign::default(),
            font_weight: None,
            vertical_align: None,
            word_wrapping: None,
            ignore_overhang: None,
            line_spacing: None,
            auto_size: None,
        })
    }

    /// Copy of `self` with one field overridden.
    pub fn with_attribute(&self, attr: TextAttribute) -> GtResult<Self> {
        self.with_attributes([attr])
    }

    /// Copy of `self` with every given field overridden, applied in order.
    ///
    /// Either all overrides apply or none do; the receiver is never touched.
    pub fn with_attributes<I>(&self, attrs: I) -> GtResult<Self>
    where
        I: IntoIterator<Item = TextAttribute>,
    {
        let mut derived = self.clone();
        for attr in attrs {
            match attr {
                TextAttribute::FontFamily(family) => {
                    check_family(&family)?;
                    derived.font_family = family;
                }
                TextAttribute::FontSize(size) => {
                    check_size(size)?;
                    derived.font_size = size;
                }
                TextAttribute::FontWeight(weight) => derived.font_weight = Some(weight),
                TextAttribute::TextAlign(align) => derived.text_align = align,
                TextAttribute::VerticalAlign(align) => derived.vertical_align = Some(align),
                TextAttribute::WordWrapping(wrap) => derived.word_wrapping = Some(wrap),
                TextAttribute::IgnoreOverhang(flag) => derived.ignore_overhang = Some(flag),
                TextAttribute::LineSpacing(spacing) => derived.line_spacing = Some(spacing),
                TextAttribute::AutoSize(mode) => derived.auto_size = Some(mode),
            }
        }
        Ok(derived)
    }

    /// String-keyed variant of [`with_attributes`](Self::with_attributes).
    ///
    /// Fails with `UnknownAttribute` on any key outside [`TextAttribute::KEYS`].
    pub fn with_named_attributes<'a, I>(&self, pairs: I) -> GtResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let attrs = pairs
            .into_iter()
            .map(|(key, value)| TextAttribute::parse(key, value))
            .collect::<GtResult<Vec<_>>>()?;
        self.with_attributes(attrs)
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn text_align(&self) -> TextAlign {
        self.text_align
    }

    pub fn font_weight(&self) -> Option<&str> {
        self.font_weight.as_deref()
    }

    pub fn vertical_align(&self) -> Option<VerticalAlign> {
        self.vertical_align
    }

    pub fn word_wrapping(&self) -> Option<WordWrapping> {
        self.word_wrapping
    }

    pub fn ignore_overhang(&self) -> Option<bool> {
        self.ignore_overhang
    }

    pub fn line_spacing(&self) -> Option<i32> {
        self.line_spacing
    }

    pub fn auto_size(&self) -> Option<AutoSize> {
        self.auto_size
    }
}

fn check_family(family: &str) -> GtResult<()> {
    if family.trim().is_empty() {
        return Err(GtError::invalid_format("font family must not be empty"));
    }
    Ok(())
}

fn check_size(size: f64) -> GtResult<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(GtError::out_of_range(format!(
            "font size {size} must be positive"
        )));
    }
    Ok(())
}
