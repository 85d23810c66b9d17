use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::parser::parse_value_or;
use crate::units::{Resistance, Voltage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Battery,
    Resistor,
    Led,
    Capacitor,
    Switch,
    AndGate,
    OrGate,
    NotGate,
    Ground,
    Vcc,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 10] = [
        Self::Battery,
        Self::Resistor,
        Self::Led,
        Self::Capacitor,
        Self::Switch,
        Self::AndGate,
        Self::OrGate,
        Self::NotGate,
        Self::Ground,
        Self::Vcc,
    ];

    pub fn is_source(&self) -> bool {
        matches!(self, Self::Battery)
    }

    pub fn is_switch(&self) -> bool {
        matches!(self, Self::Switch)
    }

    pub fn is_led(&self) -> bool {
        matches!(self, Self::Led)
    }

    pub fn is_resistor(&self) -> bool {
        matches!(self, Self::Resistor)
    }

    pub fn is_gate(&self) -> bool {
        matches!(self, Self::AndGate | Self::OrGate | Self::NotGate)
    }

    /// Kinds whose energized state is shown as `on` rather than `normal`.
    pub fn glows(&self) -> bool {
        matches!(self, Self::Battery | Self::Led)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::Resistor => "resistor",
            Self::Led => "led",
            Self::Capacitor => "capacitor",
            Self::Switch => "switch",
            Self::AndGate => "and-gate",
            Self::OrGate => "or-gate",
            Self::NotGate => "not-gate",
            Self::Ground => "ground",
            Self::Vcc => "vcc",
        }
    }

    /// Resolves the loose type names used by analysis documents.
    ///
    /// Accepts the editor names, their snake_case spellings, `power` for the
    /// rail and the Korean part names of the analysis prompts.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace('_', "-");
        let kind = match normalized.as_str() {
            "battery" | "전지" | "배터리" => Self::Battery,
            "resistor" | "저항" => Self::Resistor,
            "led" => Self::Led,
            "capacitor" | "커패시터" => Self::Capacitor,
            "switch" | "스위치" => Self::Switch,
            "and-gate" | "and" => Self::AndGate,
            "or-gate" | "or" => Self::OrGate,
            "not-gate" | "not" => Self::NotGate,
            "ground" | "gnd" => Self::Ground,
            "vcc" | "power" => Self::Vcc,
            _ => return None,
        };
        Some(kind)
    }

    /// Display label given to a freshly placed part.
    pub fn palette_label(&self) -> &'static str {
        match self {
            Self::Battery => "Battery",
            Self::Resistor => "Resistor",
            Self::Led => "LED",
            Self::Capacitor => "Capacitor",
            Self::Switch => "Switch",
            Self::AndGate => "AND",
            Self::OrGate => "OR",
            Self::NotGate => "NOT",
            Self::Ground => "GND",
            Self::Vcc => "VCC",
        }
    }

    /// Value string given to a freshly placed part.
    pub fn palette_value(&self) -> Option<&'static str> {
        match self {
            Self::Battery => Some("9V"),
            Self::Resistor => Some("220Ω"),
            Self::Led => Some("red"),
            Self::Capacitor => Some("100μF"),
            Self::Vcc => Some("5V"),
            Self::Switch | Self::AndGate | Self::OrGate | Self::NotGate | Self::Ground => None,
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    #[serde(alias = "type")]
    pub kind: ComponentKind,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, alias = "isOn", skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
}

impl Component {
    pub fn new(id: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            id: id.into(),
            kind,
            label: kind.palette_label().to_string(),
            value: None,
            closed: kind.is_switch().then_some(false),
        }
    }

    pub fn battery(id: impl Into<String>, value: &str) -> Self {
        Self::new(id, ComponentKind::Battery).with_value(value)
    }

    pub fn resistor(id: impl Into<String>, value: &str) -> Self {
        Self::new(id, ComponentKind::Resistor).with_value(value)
    }

    pub fn led(id: impl Into<String>) -> Self {
        Self::new(id, ComponentKind::Led)
    }

    pub fn switch(id: impl Into<String>, closed: bool) -> Self {
        Self {
            closed: Some(closed),
            ..Self::new(id, ComponentKind::Switch)
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// A switch without an explicit state counts as open.
    pub fn is_closed(&self) -> bool {
        self.closed.unwrap_or(false)
    }

    /// Whether this component lets current through an otherwise closed loop.
    pub fn conducts(&self) -> bool {
        !self.kind.is_switch() || self.is_closed()
    }

    /// Series resistance this component adds to a loop.
    pub fn series_resistance(&self, config: &SimulationConfig) -> Resistance {
        let ohms = match self.kind {
            ComponentKind::Resistor => {
                parse_value_or(self.value.as_deref(), config.default_resistor_ohms)
            }
            ComponentKind::Led => config.led_internal_ohms,
            _ => 0.0,
        };
        Resistance::new(ohms).unwrap_or(Resistance::ZERO)
    }

    /// Nominal voltage of a source; zero for every other kind.
    pub fn source_voltage(&self, config: &SimulationConfig) -> Voltage {
        if !self.kind.is_source() {
            return Voltage::ZERO;
        }
        let volts = parse_value_or(self.value.as_deref(), config.default_source_volts);
        Voltage::new(volts).unwrap_or(Voltage::ZERO)
    }
}

/// A wire between two components, traversable in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    #[serde(alias = "source")]
    pub source_id: String,
    #[serde(alias = "target")]
    pub target_id: String,
}

impl Connection {
    pub fn new(
        id: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
        }
    }

    pub fn touches(&self, component_id: &str) -> bool {
        self.source_id == component_id || self.target_id == component_id
    }

    /// The endpoint opposite `component_id`, if the wire touches it.
    pub fn other_end(&self, component_id: &str) -> Option<&str> {
        if self.source_id == component_id {
            Some(&self.target_id)
        } else if self.target_id == component_id {
            Some(&self.source_id)
        } else {
            None
        }
    }
}
