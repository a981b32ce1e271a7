//! Raw schematic description types.
//!
//! Every field is defaulted so partially-populated records deserialize
//! cleanly; validation happens in the classifier, not here.

use serde::{Deserialize, Serialize};

/// The caller-supplied circuit snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchematicDescription {
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
}

impl SchematicDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_component(&mut self, record: ComponentRecord) {
        self.components.push(record);
    }
}

/// One raw component entry. Missing keys default to empty/zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentRecord {
    #[serde(default)]
    pub reference: String,

    #[serde(default)]
    pub value: String,

    /// (x, y) in mm.
    #[serde(default)]
    pub position: (f64, f64),

    #[serde(default)]
    pub pins: Vec<String>,

    #[serde(default)]
    pub nets: Vec<String>,
}

impl ComponentRecord {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = (x, y);
        self
    }

    pub fn with_pins<I, S>(mut self, pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pins = pins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_nets<I, S>(mut self, nets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nets = nets.into_iter().map(Into::into).collect();
        self
    }
}
