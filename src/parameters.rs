use std::fs;
use std::path::Path;

use derive_more::Display;
use log::debug;
use serde::Deserialize;
use serde_yaml::Mapping;
use serde_yaml::Value;

use crate::ics::DEFAULT_SEED;

pub trait Named {
    fn name() -> &'static str;
}

/// A section of the parameter file. Sections that are missing from the
/// file fall back to their `Default`.
pub trait Parameters: Named + for<'de> Deserialize<'de> + Default {
    fn validate(&self) -> Result<(), ReadParametersError> {
        Ok(())
    }
}

#[derive(Debug, Display, Clone, PartialEq)]
pub struct ReadParametersError(pub String);

impl std::error::Error for ReadParametersError {}

pub struct ParameterFileContents(String);

impl ParameterFileContents {
    pub fn new(contents: impl Into<String>) -> Self {
        Self(contents.into())
    }

    pub fn read(path: &Path) -> Result<Self, ReadParametersError> {
        fs::read_to_string(path).map(Self).map_err(|err| {
            ReadParametersError(format!(
                "Failed to read parameter file at {:?}: {}",
                path, err
            ))
        })
    }

    pub fn get_section_names(&self) -> Result<Vec<String>, ReadParametersError> {
        self.value()?
            .as_mapping()
            .unwrap_or(&Mapping::default())
            .keys()
            .map(|key| {
                key.as_str().map(|key| key.to_owned()).ok_or_else(|| {
                    ReadParametersError(format!("Non-string parameter section: {:?}", key))
                })
            })
            .collect()
    }

    pub fn section<T: Parameters>(&self) -> Result<T, ReadParametersError> {
        let parameters = match self.value()?.get(T::name()) {
            Some(section) => serde_yaml::from_value(section.clone()).map_err(|err| {
                ReadParametersError(format!(
                    "Failed to read parameter file section \"{}\": \n{}",
                    T::name(),
                    err
                ))
            })?,
            None => {
                debug!(
                    "Parameter section missing for '{}', assuming defaults",
                    T::name()
                );
                T::default()
            }
        };
        parameters.validate()?;
        Ok(parameters)
    }

    fn value(&self) -> Result<Value, ReadParametersError> {
        if self.0.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_yaml::from_str::<Value>(&self.0)
            .map_err(|err| ReadParametersError(format!("Invalid parameter file: {}", err)))
    }
}

/// Parameters for the trees of the forest.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeParameters {
    /// Side length of the square root box of every tree, centered
    /// at the origin.
    #[serde(default = "default_width")]
    pub width: f64,
    /// Number of trees to create.
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_width() -> f64 {
    100.0
}

fn default_count() -> usize {
    1
}

impl Default for TreeParameters {
    fn default() -> Self {
        Self {
            width: default_width(),
            count: default_count(),
        }
    }
}

impl Named for TreeParameters {
    fn name() -> &'static str {
        "tree"
    }
}

impl Parameters for TreeParameters {
    fn validate(&self) -> Result<(), ReadParametersError> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ReadParametersError(format!(
                "tree width must be positive, got {}",
                self.width
            )));
        }
        Ok(())
    }
}

/// Parameters of the rotating disk of stars that is sampled into
/// every tree.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalaxyParameters {
    #[serde(default = "default_num_stars")]
    pub num_stars: usize,
    /// Radius of the disk. Stars outside of the root box of a tree are
    /// skipped by the driver.
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_min_mass")]
    pub min_mass: f64,
    #[serde(default = "default_max_mass")]
    pub max_mass: f64,
    /// Tangential velocity at the edge of the disk. Velocity grows
    /// linearly with the distance from the center.
    #[serde(default)]
    pub rotation_speed: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_num_stars() -> usize {
    1000
}

fn default_radius() -> f64 {
    45.0
}

fn default_min_mass() -> f64 {
    1.0
}

fn default_max_mass() -> f64 {
    10.0
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            num_stars: default_num_stars(),
            radius: default_radius(),
            min_mass: default_min_mass(),
            max_mass: default_max_mass(),
            rotation_speed: 0.0,
            seed: default_seed(),
        }
    }
}

impl Named for GalaxyParameters {
    fn name() -> &'static str {
        "galaxy"
    }
}

impl Parameters for GalaxyParameters {
    fn validate(&self) -> Result<(), ReadParametersError> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ReadParametersError(format!(
                "galaxy radius must be non-negative, got {}",
                self.radius
            )));
        }
        if !self.rotation_speed.is_finite() {
            return Err(ReadParametersError(format!(
                "rotation speed must be finite, got {}",
                self.rotation_speed
            )));
        }
        if !self.min_mass.is_finite()
            || !self.max_mass.is_finite()
            || self.min_mass < 0.0
            || self.min_mass > self.max_mass
        {
            return Err(ReadParametersError(format!(
                "invalid mass range {}..{}",
                self.min_mass, self.max_mass
            )));
        }
        Ok(())
    }
}
