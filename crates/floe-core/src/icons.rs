use crate::unit::UnitType;

pub const DEFAULT_ICON_ROOT: &str = "icons";

/// Maps unit types to icon asset paths under a configured root.
///
/// Purely a lookup table: constructed once at startup and never mutated. The
/// lookup is total over the closed [`UnitType`] set; types without a mapped
/// asset resolve to `None` and callers render a placeholder instead.
#[derive(Debug, Clone)]
pub struct IconRegistry {
    root: String,
}

impl Default for IconRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_ROOT)
    }
}

impl IconRegistry {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn resolve(&self, unit: &UnitType) -> Option<String> {
        let file = match unit {
            UnitType::Mixer => "mixer.svg",
            UnitType::Splitter => "splitter.svg",
            UnitType::Heater => "heater.svg",
            UnitType::HeatExchanger => "heat_exchanger.svg",
            UnitType::PressureChanger => "compressor.svg",
            UnitType::Pump => "pump.svg",
            UnitType::Compressor => "compressor.svg",
            UnitType::Turbine => "expander.svg",
            UnitType::Reactor => "reactor.svg",
            UnitType::GibbsReactor => "reactor_g.svg",
            UnitType::Cstr => "reactor_c.svg",
            UnitType::Pfr => "reactor_pfr.svg",
            UnitType::Flash => "flash.svg",
            UnitType::Separator => "splitter.svg",
            UnitType::Feed => "feed.svg",
            UnitType::Product => "product.svg",
            // Junctions draw as bare connectors.
            UnitType::StateJunction => return None,
            UnitType::Unknown(_) => return None,
        };
        Some(format!("{}/{file}", self.root.trim_end_matches('/')))
    }
}
