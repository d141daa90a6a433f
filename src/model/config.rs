//! Canonical representation of a device/environment qualifier set.
//!
//! A [`ConfigDescription`] names the conditions under which one variant of a resource
//! applies: mobile network codes, locale, screen shape, density, input hardware,
//! dp-dimensions and platform version. Two descriptions with identical axis values are
//! indistinguishable however they were built, so they behave correctly as map keys, and
//! the derived total order keeps (config, value) bindings deterministic.
//!
//! The canonical string form is the dash-separated qualifier list familiar from resource
//! directory names (`"hdpi-v9"`, `"en-rUS-land"`, empty for the default configuration).
//! [`ConfigDescription::parse`] accepts exactly that form, with qualifiers required in
//! canonical axis order; [`fmt::Display`] emits it back. The wire codecs transport
//! configurations as this string, so parse/display fidelity is what the round-trip
//! guarantees rest on.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::Result;

bitflags! {
    /// Set of configuration axes, as reported by [`ConfigDescription::diff`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ConfigAxes: u32 {
        /// Mobile country code
        const MCC = 0x0001;
        /// Mobile network code
        const MNC = 0x0002;
        /// Language and region
        const LOCALE = 0x0004;
        /// Screen size bucket
        const SCREEN_SIZE = 0x0008;
        /// Screen aspect (long/notlong)
        const SCREEN_LONG = 0x0010;
        /// Orientation
        const ORIENTATION = 0x0020;
        /// Pixel density
        const DENSITY = 0x0040;
        /// Touchscreen kind
        const TOUCHSCREEN = 0x0080;
        /// Keyboard kind
        const KEYBOARD = 0x0100;
        /// Navigation kind
        const NAVIGATION = 0x0200;
        /// Smallest/available dp dimensions
        const SCREEN_DP = 0x0400;
        /// Platform version
        const VERSION = 0x0800;
    }
}

/// Screen size bucket qualifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
pub enum ScreenSize {
    /// No size qualifier
    #[default]
    #[strum(disabled)]
    Any,
    /// `small` screens
    #[strum(serialize = "small")]
    Small,
    /// `normal` screens
    #[strum(serialize = "normal")]
    Normal,
    /// `large` screens
    #[strum(serialize = "large")]
    Large,
    /// `xlarge` screens
    #[strum(serialize = "xlarge")]
    XLarge,
}

/// Screen aspect qualifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
pub enum ScreenLong {
    /// No aspect qualifier
    #[default]
    #[strum(disabled)]
    Any,
    /// `long` aspect screens
    #[strum(serialize = "long")]
    Long,
    /// `notlong` aspect screens
    #[strum(serialize = "notlong")]
    NotLong,
}

/// Device orientation qualifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
pub enum Orientation {
    /// No orientation qualifier
    #[default]
    #[strum(disabled)]
    Any,
    /// `port` - portrait orientation
    #[strum(serialize = "port")]
    Portrait,
    /// `land` - landscape orientation
    #[strum(serialize = "land")]
    Landscape,
    /// `square` - square screens
    #[strum(serialize = "square")]
    Square,
}

/// Touchscreen hardware qualifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
pub enum Touchscreen {
    /// No touchscreen qualifier
    #[default]
    #[strum(disabled)]
    Any,
    /// `notouch` - no touch input
    #[strum(serialize = "notouch")]
    NoTouch,
    /// `stylus` - stylus input
    #[strum(serialize = "stylus")]
    Stylus,
    /// `finger` - finger touch input
    #[strum(serialize = "finger")]
    Finger,
}

/// Keyboard hardware qualifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
pub enum Keyboard {
    /// No keyboard qualifier
    #[default]
    #[strum(disabled)]
    Any,
    /// `nokeys` - no hardware keyboard
    #[strum(serialize = "nokeys")]
    NoKeys,
    /// `qwerty` - full hardware keyboard
    #[strum(serialize = "qwerty")]
    Qwerty,
    /// `12key` - numeric keypad
    #[strum(serialize = "12key")]
    TwelveKey,
}

/// Navigation hardware qualifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
pub enum Navigation {
    /// No navigation qualifier
    #[default]
    #[strum(disabled)]
    Any,
    /// `nonav` - no navigation hardware
    #[strum(serialize = "nonav")]
    NoNav,
    /// `dpad` - directional pad
    #[strum(serialize = "dpad")]
    Dpad,
    /// `trackball` - trackball
    #[strum(serialize = "trackball")]
    Trackball,
    /// `wheel` - scroll wheel
    #[strum(serialize = "wheel")]
    Wheel,
}

/// Pixel density in dpi, with the conventional named buckets.
///
/// Zero means no density qualifier. Formats as the bucket name when the value matches
/// one, otherwise as `<value>dpi`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Density(pub u16);

impl Density {
    /// No density qualifier
    pub const ANY: Density = Density(0);
    /// `ldpi` (120 dpi)
    pub const LOW: Density = Density(120);
    /// `mdpi` (160 dpi)
    pub const MEDIUM: Density = Density(160);
    /// `tvdpi` (213 dpi)
    pub const TV: Density = Density(213);
    /// `hdpi` (240 dpi)
    pub const HIGH: Density = Density(240);
    /// `xhdpi` (320 dpi)
    pub const XHIGH: Density = Density(320);
    /// `xxhdpi` (480 dpi)
    pub const XXHIGH: Density = Density(480);
    /// `xxxhdpi` (640 dpi)
    pub const XXXHIGH: Density = Density(640);
    /// `nodpi` - density-independent resources
    pub const NONE: Density = Density(0xFFFF);

    fn parse(segment: &str) -> Option<Density> {
        match segment {
            "ldpi" => Some(Density::LOW),
            "mdpi" => Some(Density::MEDIUM),
            "tvdpi" => Some(Density::TV),
            "hdpi" => Some(Density::HIGH),
            "xhdpi" => Some(Density::XHIGH),
            "xxhdpi" => Some(Density::XXHIGH),
            "xxxhdpi" => Some(Density::XXXHIGH),
            "nodpi" => Some(Density::NONE),
            _ => {
                let digits = segment.strip_suffix("dpi")?;
                let value: u16 = digits.parse().ok()?;
                (value > 0).then_some(Density(value))
            }
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Density::LOW => write!(f, "ldpi"),
            Density::MEDIUM => write!(f, "mdpi"),
            Density::TV => write!(f, "tvdpi"),
            Density::HIGH => write!(f, "hdpi"),
            Density::XHIGH => write!(f, "xhdpi"),
            Density::XXHIGH => write!(f, "xxhdpi"),
            Density::XXXHIGH => write!(f, "xxxhdpi"),
            Density::NONE => write!(f, "nodpi"),
            Density(value) => write!(f, "{value}dpi"),
        }
    }
}

/// A structured device/environment qualifier set.
///
/// Field order matches canonical qualifier order, which also defines the derived total
/// order used when configurations key sorted maps.
///
/// # Examples
///
/// ```rust
/// use restable::model::{ConfigDescription, Density};
///
/// let config = ConfigDescription::parse("hdpi-v9")?;
/// assert_eq!(config.density, Density::HIGH);
/// assert_eq!(config.sdk_version, 9);
/// assert_eq!(config.to_string(), "hdpi-v9");
///
/// assert!(ConfigDescription::default().is_default());
/// # Ok::<(), restable::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigDescription {
    /// Mobile country code, 0 when unset
    pub mcc: u16,
    /// Mobile network code, 0 when unset
    pub mnc: u16,
    /// ISO-639-1 language code, empty when unset
    pub language: String,
    /// ISO-3166-1 region code, empty when unset
    pub region: String,
    /// Screen size bucket
    pub screen_size: ScreenSize,
    /// Screen aspect
    pub screen_long: ScreenLong,
    /// Device orientation
    pub orientation: Orientation,
    /// Pixel density
    pub density: Density,
    /// Touchscreen hardware
    pub touchscreen: Touchscreen,
    /// Keyboard hardware
    pub keyboard: Keyboard,
    /// Navigation hardware
    pub navigation: Navigation,
    /// Smallest screen dimension in dp, 0 when unset
    pub smallest_width_dp: u16,
    /// Available width in dp, 0 when unset
    pub screen_width_dp: u16,
    /// Available height in dp, 0 when unset
    pub screen_height_dp: u16,
    /// Platform API level, 0 when unset
    pub sdk_version: u16,
    /// Minor platform revision, 0 when unset
    pub minor_version: u16,
}

// Parsing proceeds axis by axis: each axis may consume the current segment and never
// looks backwards, which enforces canonical qualifier order.
struct Segments<'a> {
    parts: Vec<&'a str>,
    pos: usize,
}

impl<'a> Segments<'a> {
    fn current(&self) -> Option<&'a str> {
        self.parts.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn exhausted(&self) -> bool {
        self.pos == self.parts.len()
    }
}

impl ConfigDescription {
    /// Parse a canonical dash-separated qualifier string.
    ///
    /// The empty string parses to the default configuration. Qualifiers must appear in
    /// canonical axis order, each at most once.
    ///
    /// # Errors
    /// Returns an error if any segment is not a recognized qualifier or appears out of
    /// order.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut config = ConfigDescription::default();
        if raw.is_empty() {
            return Ok(config);
        }

        let mut segments = Segments {
            parts: raw.split('-').collect(),
            pos: 0,
        };

        if let Some(digits) = segments.current().and_then(|s| s.strip_prefix("mcc")) {
            config.mcc = digits
                .parse()
                .map_err(|_| malformed_error!("Invalid mcc qualifier in '{}'", raw))?;
            segments.advance();
        }

        if let Some(digits) = segments.current().and_then(|s| s.strip_prefix("mnc")) {
            config.mnc = digits
                .parse()
                .map_err(|_| malformed_error!("Invalid mnc qualifier in '{}'", raw))?;
            segments.advance();
        }

        if let Some(segment) = segments.current() {
            if segment.len() == 2 && segment.chars().all(|c| c.is_ascii_lowercase()) {
                config.language = segment.to_owned();
                segments.advance();

                if let Some(region) = segments.current().and_then(|s| s.strip_prefix('r')) {
                    if region.len() == 2 && region.chars().all(|c| c.is_ascii_uppercase()) {
                        config.region = region.to_owned();
                        segments.advance();
                    }
                }
            }
        }

        if let Some(value) = segments.current().and_then(|s| ScreenSize::from_str(s).ok()) {
            config.screen_size = value;
            segments.advance();
        }

        if let Some(value) = segments.current().and_then(|s| ScreenLong::from_str(s).ok()) {
            config.screen_long = value;
            segments.advance();
        }

        if let Some(value) = segments.current().and_then(|s| Orientation::from_str(s).ok()) {
            config.orientation = value;
            segments.advance();
        }

        if let Some(value) = segments.current().and_then(Density::parse) {
            config.density = value;
            segments.advance();
        }

        if let Some(value) = segments.current().and_then(|s| Touchscreen::from_str(s).ok()) {
            config.touchscreen = value;
            segments.advance();
        }

        if let Some(value) = segments.current().and_then(|s| Keyboard::from_str(s).ok()) {
            config.keyboard = value;
            segments.advance();
        }

        if let Some(value) = segments.current().and_then(|s| Navigation::from_str(s).ok()) {
            config.navigation = value;
            segments.advance();
        }

        for (prefix, field) in [("sw", 0usize), ("w", 1), ("h", 2)] {
            let Some(segment) = segments.current() else {
                break;
            };
            let Some(value) = segment
                .strip_prefix(prefix)
                .and_then(|s| s.strip_suffix("dp"))
                .and_then(|s| s.parse::<u16>().ok())
            else {
                continue;
            };
            match field {
                0 => config.smallest_width_dp = value,
                1 => config.screen_width_dp = value,
                _ => config.screen_height_dp = value,
            }
            segments.advance();
        }

        if let Some(digits) = segments.current().and_then(|s| s.strip_prefix('v')) {
            // Optional minor revision: "v21" or "v21.1"
            let (sdk, minor) = match digits.split_once('.') {
                Some((sdk, minor)) => (sdk, Some(minor)),
                None => (digits, None),
            };
            config.sdk_version = sdk
                .parse()
                .map_err(|_| malformed_error!("Invalid version qualifier in '{}'", raw))?;
            if let Some(minor) = minor {
                config.minor_version = minor
                    .parse()
                    .map_err(|_| malformed_error!("Invalid version qualifier in '{}'", raw))?;
            }
            segments.advance();
        }

        if !segments.exhausted() {
            return Err(malformed_error!(
                "Unrecognized configuration qualifier '{}' in '{}'",
                segments.current().unwrap_or(""),
                raw
            ));
        }

        Ok(config)
    }

    /// Returns true if no axis carries a qualifier.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == ConfigDescription::default()
    }

    /// Report the axes on which `self` and `other` differ.
    #[must_use]
    pub fn diff(&self, other: &ConfigDescription) -> ConfigAxes {
        let mut axes = ConfigAxes::empty();
        if self.mcc != other.mcc {
            axes |= ConfigAxes::MCC;
        }
        if self.mnc != other.mnc {
            axes |= ConfigAxes::MNC;
        }
        if self.language != other.language || self.region != other.region {
            axes |= ConfigAxes::LOCALE;
        }
        if self.screen_size != other.screen_size {
            axes |= ConfigAxes::SCREEN_SIZE;
        }
        if self.screen_long != other.screen_long {
            axes |= ConfigAxes::SCREEN_LONG;
        }
        if self.orientation != other.orientation {
            axes |= ConfigAxes::ORIENTATION;
        }
        if self.density != other.density {
            axes |= ConfigAxes::DENSITY;
        }
        if self.touchscreen != other.touchscreen {
            axes |= ConfigAxes::TOUCHSCREEN;
        }
        if self.keyboard != other.keyboard {
            axes |= ConfigAxes::KEYBOARD;
        }
        if self.navigation != other.navigation {
            axes |= ConfigAxes::NAVIGATION;
        }
        if self.smallest_width_dp != other.smallest_width_dp
            || self.screen_width_dp != other.screen_width_dp
            || self.screen_height_dp != other.screen_height_dp
        {
            axes |= ConfigAxes::SCREEN_DP;
        }
        if self.sdk_version != other.sdk_version || self.minor_version != other.minor_version {
            axes |= ConfigAxes::VERSION;
        }
        axes
    }

    /// Axis-wise compatibility: every axis of `self` is either unset or equal to the
    /// corresponding axis of `other`.
    #[must_use]
    pub fn matches(&self, other: &ConfigDescription) -> bool {
        (self.mcc == 0 || self.mcc == other.mcc)
            && (self.mnc == 0 || self.mnc == other.mnc)
            && (self.language.is_empty() || self.language == other.language)
            && (self.region.is_empty() || self.region == other.region)
            && (self.screen_size == ScreenSize::Any || self.screen_size == other.screen_size)
            && (self.screen_long == ScreenLong::Any || self.screen_long == other.screen_long)
            && (self.orientation == Orientation::Any || self.orientation == other.orientation)
            && (self.density == Density::ANY || self.density == other.density)
            && (self.touchscreen == Touchscreen::Any || self.touchscreen == other.touchscreen)
            && (self.keyboard == Keyboard::Any || self.keyboard == other.keyboard)
            && (self.navigation == Navigation::Any || self.navigation == other.navigation)
            && (self.smallest_width_dp == 0 || self.smallest_width_dp <= other.smallest_width_dp)
            && (self.screen_width_dp == 0 || self.screen_width_dp <= other.screen_width_dp)
            && (self.screen_height_dp == 0 || self.screen_height_dp <= other.screen_height_dp)
            && (self.sdk_version == 0 || self.sdk_version <= other.sdk_version)
    }
}

impl fmt::Display for ConfigDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();

        if self.mcc != 0 {
            parts.push(format!("mcc{}", self.mcc));
        }
        if self.mnc != 0 {
            parts.push(format!("mnc{}", self.mnc));
        }
        if !self.language.is_empty() {
            parts.push(self.language.clone());
            if !self.region.is_empty() {
                parts.push(format!("r{}", self.region));
            }
        }
        if self.screen_size != ScreenSize::Any {
            parts.push(self.screen_size.to_string());
        }
        if self.screen_long != ScreenLong::Any {
            parts.push(self.screen_long.to_string());
        }
        if self.orientation != Orientation::Any {
            parts.push(self.orientation.to_string());
        }
        if self.density != Density::ANY {
            parts.push(self.density.to_string());
        }
        if self.touchscreen != Touchscreen::Any {
            parts.push(self.touchscreen.to_string());
        }
        if self.keyboard != Keyboard::Any {
            parts.push(self.keyboard.to_string());
        }
        if self.navigation != Navigation::Any {
            parts.push(self.navigation.to_string());
        }
        if self.smallest_width_dp != 0 {
            parts.push(format!("sw{}dp", self.smallest_width_dp));
        }
        if self.screen_width_dp != 0 {
            parts.push(format!("w{}dp", self.screen_width_dp));
        }
        if self.screen_height_dp != 0 {
            parts.push(format!("h{}dp", self.screen_height_dp));
        }
        if self.minor_version != 0 {
            parts.push(format!("v{}.{}", self.sdk_version, self.minor_version));
        } else if self.sdk_version != 0 {
            parts.push(format!("v{}", self.sdk_version));
        }

        write!(f, "{}", parts.join("-"))
    }
}
