use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OrreryError;

/// Scene layers the renderer can show or hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayLayer {
    Orbits,
    Labels,
    Moons,
    Asteroids,
    Grid,
}

impl DisplayLayer {
    pub const ALL: [DisplayLayer; 5] = [
        DisplayLayer::Orbits,
        DisplayLayer::Labels,
        DisplayLayer::Moons,
        DisplayLayer::Asteroids,
        DisplayLayer::Grid,
    ];

    /// Bit used for this layer in [`VisibilityToggles::bits`].
    pub fn bit(self) -> u32 {
        match self {
            DisplayLayer::Orbits => 1 << 0,
            DisplayLayer::Labels => 1 << 1,
            DisplayLayer::Moons => 1 << 2,
            DisplayLayer::Asteroids => 1 << 3,
            DisplayLayer::Grid => 1 << 4,
        }
    }
}

impl FromStr for DisplayLayer {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "orbits" => Ok(DisplayLayer::Orbits),
            "labels" => Ok(DisplayLayer::Labels),
            "moons" => Ok(DisplayLayer::Moons),
            "asteroids" => Ok(DisplayLayer::Asteroids),
            "grid" => Ok(DisplayLayer::Grid),
            _ => Err(OrreryError::UnknownLayer(s.to_string())),
        }
    }
}

/// Independent display flags read by the renderer every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityToggles {
    pub orbits: bool,
    pub labels: bool,
    pub moons: bool,
    pub asteroids: bool,
    pub grid: bool,
}

impl Default for VisibilityToggles {
    fn default() -> Self {
        Self {
            orbits: true,
            labels: true,
            moons: true,
            asteroids: true,
            grid: false,
        }
    }
}

impl VisibilityToggles {
    fn flag_mut(&mut self, layer: DisplayLayer) -> &mut bool {
        match layer {
            DisplayLayer::Orbits => &mut self.orbits,
            DisplayLayer::Labels => &mut self.labels,
            DisplayLayer::Moons => &mut self.moons,
            DisplayLayer::Asteroids => &mut self.asteroids,
            DisplayLayer::Grid => &mut self.grid,
        }
    }

    pub fn is_visible(&self, layer: DisplayLayer) -> bool {
        match layer {
            DisplayLayer::Orbits => self.orbits,
            DisplayLayer::Labels => self.labels,
            DisplayLayer::Moons => self.moons,
            DisplayLayer::Asteroids => self.asteroids,
            DisplayLayer::Grid => self.grid,
        }
    }

    pub fn set(&mut self, layer: DisplayLayer, visible: bool) {
        *self.flag_mut(layer) = visible;
    }

    /// Flip one layer. Returns the new value.
    pub fn toggle(&mut self, layer: DisplayLayer) -> bool {
        let flag = self.flag_mut(layer);
        *flag = !*flag;
        *flag
    }

    /// Packed flags, one [`DisplayLayer::bit`] per visible layer.
    pub fn bits(&self) -> u32 {
        DisplayLayer::ALL
            .iter()
            .filter(|layer| self.is_visible(**layer))
            .fold(0, |acc, layer| acc | layer.bit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_hide_only_grid() {
        let v = VisibilityToggles::default();
        assert!(v.orbits && v.labels && v.moons && v.asteroids);
        assert!(!v.grid);
    }

    #[test]
    fn toggles_are_independent() {
        let mut v = VisibilityToggles::default();
        assert!(!v.toggle(DisplayLayer::Moons));
        assert!(!v.moons);
        assert!(v.orbits && v.labels && v.asteroids);
        assert!(v.toggle(DisplayLayer::Moons));
    }

    #[test]
    fn bits_track_flags() {
        let mut v = VisibilityToggles::default();
        assert_eq!(v.bits(), 0b01111);
        v.set(DisplayLayer::Grid, true);
        v.set(DisplayLayer::Orbits, false);
        assert_eq!(v.bits(), 0b11110);
    }

    #[test]
    fn parse_layer_names() {
        assert_eq!("Asteroids".parse::<DisplayLayer>().unwrap(), DisplayLayer::Asteroids);
        assert!("comets".parse::<DisplayLayer>().is_err());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let v: VisibilityToggles = serde_json::from_str(r#"{ "grid": true }"#).unwrap();
        assert!(v.grid && v.orbits);
    }
}
