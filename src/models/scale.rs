//! Shade scale model

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One step of a 10-step design-system color ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShadeStep {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
}

impl ShadeStep {
    /// Lightest first
    pub const ALL: [ShadeStep; 10] = [
        ShadeStep::S50,
        ShadeStep::S100,
        ShadeStep::S200,
        ShadeStep::S300,
        ShadeStep::S400,
        ShadeStep::S500,
        ShadeStep::S600,
        ShadeStep::S700,
        ShadeStep::S800,
        ShadeStep::S900,
    ];

    pub fn key(&self) -> u16 {
        match self {
            ShadeStep::S50 => 50,
            ShadeStep::S100 => 100,
            ShadeStep::S200 => 200,
            ShadeStep::S300 => 300,
            ShadeStep::S400 => 400,
            ShadeStep::S500 => 500,
            ShadeStep::S600 => 600,
            ShadeStep::S700 => 700,
            ShadeStep::S800 => 800,
            ShadeStep::S900 => 900,
        }
    }

    pub fn from_key(key: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.key() == key)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for ShadeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Hex colors for every [`ShadeStep`], lowercase `#rrggbb`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadeScale {
    shades: [String; 10],
}

impl ShadeScale {
    pub fn new(shades: [String; 10]) -> Self {
        Self { shades }
    }

    pub fn get(&self, step: ShadeStep) -> &str {
        &self.shades[step.index()]
    }

    pub fn set(&mut self, step: ShadeStep, hex: String) {
        self.shades[step.index()] = hex;
    }

    /// Steps with their colors, lightest first
    pub fn iter(&self) -> impl Iterator<Item = (ShadeStep, &str)> {
        ShadeStep::ALL
            .into_iter()
            .zip(self.shades.iter().map(String::as_str))
    }
}

// keys stay in step order (50 before 100), which a sorted map would not give
impl Serialize for ShadeScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.shades.len()))?;
        for (step, hex) in self.iter() {
            map.serialize_entry(&step.key().to_string(), hex)?;
        }
        map.end()
    }
}
