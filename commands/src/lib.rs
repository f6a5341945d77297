//! Wire model for the rewind viewer protocol.
//!
//! This crate owns the wire representation consumed by the viewer: the
//! closed set of drawing commands, the integer enumerations they carry, and
//! the RGBA color packing rule. Each command encodes to exactly one compact,
//! self-contained JSON object with no framing around it — the receiving
//! parser locates object boundaries by brace balancing alone, and ordering
//! on the wire is ordering on the stream.
//!
//! The protocol is write-only from the client's perspective, so only
//! serialization is implemented here.

use serde::Serialize;

/// Error returned by [`encode_command`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The JSON serializer failed. Not expected for this closed command
    /// set; surfaced rather than panicked on.
    #[error("failed to encode command as JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Conventional middle drawing layer for callers that do not care about
/// z-order.
pub const DEFAULT_LAYER: i32 = 3;

/// Faction of a unit or facility relative to the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Our = -1,
    Neutral = 0,
    Enemy = 1,
}

/// Terrain category of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaType {
    Unknown = 0,
    Forest = 1,
    Swamp = 2,
    Rain = 3,
    Cloud = 4,
}

/// Vehicle class of a living unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitType {
    Unknown = 0,
    Tank = 1,
    Ifv = 2,
    Arrv = 3,
    Helicopter = 4,
    Fighter = 5,
}

/// Kind of a capturable structure on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacilityType {
    ControlCenter = 0,
    VehicleFactory = 1,
}

impl Side {
    /// Convert side into its wire integer value.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl AreaType {
    /// Convert area type into its wire integer value.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl UnitType {
    /// Convert unit type into its wire integer value.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl FacilityType {
    /// Convert facility type into its wire integer value.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Four-channel RGBA color with wide (16-bit-range) channels.
///
/// The viewer receives colors as one packed `u32`. Channels are packed raw,
/// exactly as they arrive, without rescaling to 8 bits — a generic color
/// abstraction reporting channels in the 0–65535 range packs those values
/// directly into nominally 8-bit byte slots, and the viewer interprets the
/// same layout. [`Color::pack`] reproduces that layout bit-for-bit; do not
/// normalize the channels before packing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Color {
    pub const RED: Color = Color::new(0xff, 0, 0, 0);
    pub const GREEN: Color = Color::new(0, 0xff, 0, 0);
    pub const BLUE: Color = Color::new(0, 0, 0xff, 0);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff, 0);
    pub const BLACK: Color = Color::new(0, 0, 0, 0);

    /// Build a color from raw channel values. No range check: values above
    /// 0xff spill into neighboring byte slots when packed.
    #[must_use]
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Widen four 8-bit channels to the 16-bit range by bit replication,
    /// matching what generic color abstractions report.
    #[must_use]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn widen(c: u8) -> u16 {
            (u16::from(c) << 8) | u16::from(c)
        }
        Self::new(widen(r), widen(g), widen(b), widen(a))
    }

    /// Replace the alpha channel.
    #[must_use]
    pub const fn with_alpha(mut self, a: u16) -> Self {
        self.a = a;
        self
    }

    /// Pack into the wire integer: alpha in bits 24–31, red in 16–23,
    /// green in 8–15, blue in 0–7, computed from the raw channel values.
    /// Channels wider than 8 bits overlap their neighbors; the viewer
    /// expects exactly this arithmetic.
    #[must_use]
    pub fn pack(self) -> u32 {
        (u32::from(self.a) << 24)
            | (u32::from(self.r) << 16)
            | (u32::from(self.g) << 8)
            | u32::from(self.b)
    }
}

/// Full description of a living unit.
///
/// `Default` yields the minimal form: course 0, unknown type, no cooldown,
/// unselected — so sparse call sites can spread `..Unit::default()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub hp: i32,
    pub max_hp: i32,
    pub side: Side,
    /// Heading in radians. Carried at 3-decimal precision on the wire.
    pub course: f64,
    pub unit_type: UnitType,
    /// Ticks until the weapon is available again.
    pub rem_cooldown: i32,
    /// Full cooldown duration in ticks.
    pub max_cooldown: i32,
    /// Whether the viewer highlights the unit as selected.
    pub selected: bool,
}

impl Default for Unit {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            r: 0.0,
            hp: 0,
            max_hp: 0,
            side: Side::Neutral,
            course: 0.0,
            unit_type: UnitType::Unknown,
            rem_cooldown: 0,
            max_cooldown: 0,
            selected: false,
        }
    }
}

/// Description of a capturable/production structure occupying one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facility {
    /// X of the facility's top-left grid cell.
    pub cell_x: i32,
    /// Y of the facility's top-left grid cell.
    pub cell_y: i32,
    pub facility_type: FacilityType,
    pub side: Side,
    /// Current production progress; 0 when idle.
    pub production: i32,
    pub max_production: i32,
    /// Capture progress in `[-max_capture, max_capture]`; negative means
    /// the enemy is capturing.
    pub capture: i32,
    pub max_capture: i32,
}

/// One wire object. Field declaration order is wire order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Command {
    Circle {
        x: f64,
        y: f64,
        r: f64,
        color: u32,
        layer: i32,
    },
    Rectangle {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: u32,
        layer: i32,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: u32,
        layer: i32,
    },
    Popup {
        x: f64,
        y: f64,
        r: f64,
        text: String,
    },
    Facility {
        x: i32,
        y: i32,
        facility_type: i32,
        enemy: i32,
        production: i32,
        max_production: i32,
        capture: i32,
        max_capture: i32,
    },
    Unit {
        x: f64,
        y: f64,
        r: f64,
        hp: i32,
        max_hp: i32,
        enemy: i32,
        unit_type: i32,
        course: f64,
        rem_cooldown: i32,
        cooldown: i32,
        selected: i32,
    },
    Area {
        x: i32,
        y: i32,
        area_type: i32,
    },
    Message {
        message: String,
    },
    /// End-of-frame sentinel. Everything sent since the previous `End`
    /// belongs to one rendered frame.
    End,
}

impl Command {
    /// Create a circle at world coordinates.
    #[must_use]
    pub fn circle(x: f64, y: f64, r: f64, color: Color, layer: i32) -> Self {
        Self::Circle { x, y, r, color: color.pack(), layer }
    }

    /// Create an axis-aligned rectangle by opposite corners.
    #[must_use]
    pub fn rectangle(x1: f64, y1: f64, x2: f64, y2: f64, color: Color, layer: i32) -> Self {
        Self::Rectangle { x1, y1, x2, y2, color: color.pack(), layer }
    }

    /// Create a straight segment.
    #[must_use]
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, color: Color, layer: i32) -> Self {
        Self::Line { x1, y1, x2, y2, color: color.pack(), layer }
    }

    /// Create a text annotation anchored at a point with a radius hint.
    #[must_use]
    pub fn popup(x: f64, y: f64, r: f64, text: impl Into<String>) -> Self {
        Self::Popup { x, y, r, text: text.into() }
    }

    /// Create a facility marker from its full description.
    #[must_use]
    pub fn facility(facility: Facility) -> Self {
        Self::Facility {
            x: facility.cell_x,
            y: facility.cell_y,
            facility_type: facility.facility_type.as_i32(),
            enemy: facility.side.as_i32(),
            production: facility.production,
            max_production: facility.max_production,
            capture: facility.capture,
            max_capture: facility.max_capture,
        }
    }

    /// Create a unit marker from its full description. The course is
    /// rounded to 3 decimals and `selected` becomes a 0/1 integer, as the
    /// viewer expects.
    #[must_use]
    pub fn unit(unit: Unit) -> Self {
        Self::Unit {
            x: unit.x,
            y: unit.y,
            r: unit.r,
            hp: unit.hp,
            max_hp: unit.max_hp,
            enemy: unit.side.as_i32(),
            unit_type: unit.unit_type.as_i32(),
            course: (unit.course * 1000.0).round() / 1000.0,
            rem_cooldown: unit.rem_cooldown,
            cooldown: unit.max_cooldown,
            selected: i32::from(unit.selected),
        }
    }

    /// Declare the terrain type of one grid cell.
    #[must_use]
    pub fn area(cell_x: i32, cell_y: i32, area_type: AreaType) -> Self {
        Self::Area { x: cell_x, y: cell_y, area_type: area_type.as_i32() }
    }

    /// Create a free-text annotation stored alongside the frame.
    #[must_use]
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message { message: text.into() }
    }
}

/// Encode one command as a compact JSON object.
///
/// Text fields pass through the JSON encoder, so embedded quotes and
/// backslashes are escaped and the output is always a syntactically valid
/// object.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if the JSON serializer fails; this does
/// not happen for any command this crate can construct.
pub fn encode_command(command: &Command) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(command)?)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
