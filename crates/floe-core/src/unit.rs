use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Process unit-operation types the editor knows about.
///
/// The set is closed so icon lookups can be matched exhaustively; producer
/// tags outside the set land in [`UnitType::Unknown`] and still load, they
/// just render without an icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnitType {
    Mixer,
    Splitter,
    Heater,
    HeatExchanger,
    PressureChanger,
    Pump,
    Compressor,
    Turbine,
    Reactor,
    GibbsReactor,
    Cstr,
    Pfr,
    Flash,
    Separator,
    Feed,
    Product,
    StateJunction,
    Unknown(String),
}

impl UnitType {
    /// Total conversion from a producer type tag. Never fails; unrecognized
    /// tags become [`UnitType::Unknown`] with the original tag preserved.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Mixer" => Self::Mixer,
            "Splitter" => Self::Splitter,
            "Heater" => Self::Heater,
            "HeatExchanger" => Self::HeatExchanger,
            "PressureChanger" => Self::PressureChanger,
            "Pump" => Self::Pump,
            "Compressor" => Self::Compressor,
            "Turbine" => Self::Turbine,
            "Reactor" => Self::Reactor,
            "GibbsReactor" => Self::GibbsReactor,
            "CSTR" => Self::Cstr,
            "PFR" => Self::Pfr,
            "Flash" => Self::Flash,
            "Separator" => Self::Separator,
            "Feed" => Self::Feed,
            "Product" => Self::Product,
            "StateJunction" => Self::StateJunction,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Mixer => "Mixer",
            Self::Splitter => "Splitter",
            Self::Heater => "Heater",
            Self::HeatExchanger => "HeatExchanger",
            Self::PressureChanger => "PressureChanger",
            Self::Pump => "Pump",
            Self::Compressor => "Compressor",
            Self::Turbine => "Turbine",
            Self::Reactor => "Reactor",
            Self::GibbsReactor => "GibbsReactor",
            Self::Cstr => "CSTR",
            Self::Pfr => "PFR",
            Self::Flash => "Flash",
            Self::Separator => "Separator",
            Self::Feed => "Feed",
            Self::Product => "Product",
            Self::StateJunction => "StateJunction",
            Self::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

// On the wire a unit type is just its tag, matching the producer's JSON.
impl Serialize for UnitType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for UnitType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}
