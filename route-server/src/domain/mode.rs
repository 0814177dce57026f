//! Transport modes and mode-inclusion sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport mode: {0:?}")]
pub struct InvalidMode(String);

/// A transport mode that can be switched on or off for a search.
///
/// The first group names networks (air, bus, ...), the second group names
/// propulsion categories that lines and flights are tagged with. A leg is
/// generated only when every mode it depends on is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Air,
    Sea,
    Bus,
    Rail,
    SpawnWarp,
    Traincarts,
    Warp,
    Vehicles,
    Cart,
}

impl Mode {
    /// Every mode, in display order.
    pub const ALL: [Mode; 9] = [
        Mode::Air,
        Mode::Sea,
        Mode::Bus,
        Mode::Rail,
        Mode::SpawnWarp,
        Mode::Traincarts,
        Mode::Warp,
        Mode::Vehicles,
        Mode::Cart,
    ];

    /// The name used in query strings and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Air => "air",
            Mode::Sea => "sea",
            Mode::Bus => "bus",
            Mode::Rail => "rail",
            Mode::SpawnWarp => "spawn_warp",
            Mode::Traincarts => "traincarts",
            Mode::Warp => "warp",
            Mode::Vehicles => "vehicles",
            Mode::Cart => "cart",
        }
    }

    /// Human-readable label for form controls.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Air => "Air",
            Mode::Sea => "Sea",
            Mode::Bus => "Bus",
            Mode::Rail => "Rail",
            Mode::SpawnWarp => "Spawn warps",
            Mode::Traincarts => "Traincarts",
            Mode::Warp => "Warp",
            Mode::Vehicles => "Vehicles",
            Mode::Cart => "Carts",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| InvalidMode(s.to_string()))
    }
}

/// A set of enabled modes.
///
/// # Examples
///
/// ```
/// use route_server::domain::{Mode, ModeSet};
///
/// let modes: ModeSet = "bus, warp".parse().unwrap();
/// assert!(modes.contains(Mode::Bus));
/// assert!(!modes.contains(Mode::Rail));
/// assert!(modes.contains_all(&[Mode::Bus, Mode::Warp]));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModeSet(u16);

impl ModeSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// The set of all modes.
    pub fn all() -> Self {
        Mode::ALL.into_iter().collect()
    }

    pub fn contains(self, mode: Mode) -> bool {
        self.0 & mode.bit() != 0
    }

    /// True if every mode in `modes` is enabled.
    pub fn contains_all(self, modes: &[Mode]) -> bool {
        modes.iter().all(|m| self.contains(*m))
    }

    pub fn insert(&mut self, mode: Mode) {
        self.0 |= mode.bit();
    }

    pub fn remove(&mut self, mode: Mode) {
        self.0 &= !mode.bit();
    }

    /// Returns a copy with `mode` removed.
    pub fn without(mut self, mode: Mode) -> Self {
        self.remove(mode);
        self
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the enabled modes in display order.
    pub fn iter(self) -> impl Iterator<Item = Mode> {
        Mode::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<Mode> for ModeSet {
    fn from_iter<I: IntoIterator<Item = Mode>>(iter: I) -> Self {
        let mut set = ModeSet::empty();
        for mode in iter {
            set.insert(mode);
        }
        set
    }
}

/// Parses a comma-separated list of mode names. Empty items are ignored.
impl FromStr for ModeSet {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse::<Mode>)
            .collect()
    }
}

impl fmt::Debug for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Propulsion tag carried by a line.
///
/// Unknown tags (for instance sea lines tagged `ferry`) deserialize as
/// [`LineMode::Other`] and are costed like warp lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    #[default]
    Warp,
    Traincarts,
    Vehicles,
    Cart,
    #[serde(other)]
    Other,
}

impl LineMode {
    /// The mode that must be enabled to ride a line with this tag.
    pub fn required_mode(self) -> Mode {
        match self {
            LineMode::Warp | LineMode::Other => Mode::Warp,
            LineMode::Traincarts => Mode::Traincarts,
            LineMode::Vehicles => Mode::Vehicles,
            LineMode::Cart => Mode::Cart,
        }
    }
}

/// Whether a flight warps between gates or physically travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlightMode {
    #[default]
    #[serde(rename = "warp plane")]
    WarpPlane,
    #[serde(rename = "traincarts plane")]
    TraincartsPlane,
}

impl FlightMode {
    /// The mode that must be enabled to board a flight with this tag.
    pub fn required_mode(self) -> Mode {
        match self {
            FlightMode::WarpPlane => Mode::Warp,
            FlightMode::TraincartsPlane => Mode::Traincarts,
        }
    }
}
