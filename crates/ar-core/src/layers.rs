use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mutually exclusive display layers of the anatomical model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    #[default]
    Body,
    Skeleton,
    Organs,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Body, Layer::Skeleton, Layer::Organs];

    pub fn name(self) -> &'static str {
        match self {
            Layer::Body => "body",
            Layer::Skeleton => "skeleton",
            Layer::Organs => "organs",
        }
    }

    /// Scene node name of the layer root (`layer_body`, ...).
    pub fn node_name(self) -> &'static str {
        match self {
            Layer::Body => "layer_body",
            Layer::Skeleton => "layer_skeleton",
            Layer::Organs => "layer_organs",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layer::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown layer '{s}'"))
    }
}

/// Which layer is shown. Exactly one layer is visible at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerVisibility {
    selected: Layer,
}

impl LayerVisibility {
    pub fn new(selected: Layer) -> Self {
        Self { selected }
    }

    pub fn selected(&self) -> Layer {
        self.selected
    }

    /// Select `layer`; returns `true` when the selection changed.
    pub fn select(&mut self, layer: Layer) -> bool {
        let changed = self.selected != layer;
        self.selected = layer;
        changed
    }

    pub fn is_visible(&self, layer: Layer) -> bool {
        self.selected == layer
    }

    pub fn iter(&self) -> impl Iterator<Item = (Layer, bool)> + '_ {
        Layer::ALL.into_iter().map(|l| (l, self.is_visible(l)))
    }
}
