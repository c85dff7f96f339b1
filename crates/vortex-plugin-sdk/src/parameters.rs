use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position of a parameter in its plugin's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParameterId(pub usize);

impl ParameterId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for ParameterId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How the host should present a parameter's integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterUnit {
    None,
    /// Index into the definition's option strings.
    Enum,
    /// The plugin renders its own display string.
    HasStrings,
    Percent,
    AudioInput,
    AudioOutput,
    CvInput,
    OutputMode,
}

/// Decimal scaling hint for the host's default formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterScaling {
    None,
    /// Display code / 10.
    Tenths,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub id: ParameterId,
    pub name: String,
    pub min: i32,
    pub max: i32,
    pub default: i32,
    pub unit: ParameterUnit,
    pub scaling: ParameterScaling,
    pub options: Vec<String>,
    pub read_only: bool,
    pub description: Option<String>,
}

impl ParameterDefinition {
    /// Integer range parameter.
    pub fn range(
        id: impl Into<ParameterId>,
        name: impl Into<String>,
        range: RangeInclusive<i32>,
        default: i32,
    ) -> Self {
        let min = *range.start();
        let max = *range.end();
        assert!(min <= max, "parameter min must be <= max");
        assert!(default >= min && default <= max, "default outside range");
        Self {
            id: id.into(),
            name: name.into(),
            min,
            max,
            default,
            unit: ParameterUnit::None,
            scaling: ParameterScaling::None,
            options: Vec::new(),
            read_only: false,
            description: None,
        }
    }

    /// Enumerated parameter whose codes index `options`.
    pub fn choice(
        id: impl Into<ParameterId>,
        name: impl Into<String>,
        options: &[&str],
        default: usize,
    ) -> Self {
        assert!(!options.is_empty(), "choice parameter needs options");
        let max = options.len() as i32 - 1;
        let mut definition = Self::range(id, name, 0..=max, default as i32);
        definition.unit = ParameterUnit::Enum;
        definition.options = options.iter().map(|option| option.to_string()).collect();
        definition
    }

    /// Bus selector; code 0 is "unrouted" when `min` is 0.
    pub fn bus(
        id: impl Into<ParameterId>,
        name: impl Into<String>,
        unit: ParameterUnit,
        min: i32,
        bus_count: usize,
        default: i32,
    ) -> Self {
        Self::range(id, name, min..=bus_count as i32, default).with_unit(unit)
    }

    pub fn with_unit(mut self, unit: ParameterUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_scaling(mut self, scaling: ParameterScaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Option string for enumerated parameters.
    pub fn option(&self, value: i32) -> Option<&str> {
        usize::try_from(value)
            .ok()
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterPage {
    pub name: String,
    pub parameters: Vec<ParameterId>,
}

impl ParameterPage {
    pub fn new(name: impl Into<String>, parameters: &[ParameterId]) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterLayout {
    parameters: Vec<ParameterDefinition>,
    pages: Vec<ParameterPage>,
}

impl ParameterLayout {
    /// Definitions must be listed in id order.
    pub fn new(parameters: Vec<ParameterDefinition>) -> Self {
        assert!(
            parameters
                .iter()
                .enumerate()
                .all(|(index, definition)| definition.id.index() == index),
            "parameter ids must match their layout position"
        );
        Self {
            parameters,
            pages: Vec::new(),
        }
    }

    pub fn with_pages(mut self, pages: Vec<ParameterPage>) -> Self {
        self.pages = pages;
        self
    }

    pub fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    pub fn pages(&self) -> &[ParameterPage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn find(&self, id: ParameterId) -> Option<&ParameterDefinition> {
        self.parameters.get(id.index())
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ParameterDefinition> {
        self.parameters
            .iter()
            .find(|definition| definition.name.eq_ignore_ascii_case(name))
    }
}

/// Current integer codes for every parameter of a layout.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    layout: ParameterLayout,
    values: Vec<i32>,
}

impl ParameterSet {
    pub fn new(layout: ParameterLayout) -> Self {
        let values = layout
            .parameters()
            .iter()
            .map(|parameter| parameter.default)
            .collect();
        Self { layout, values }
    }

    pub fn layout(&self) -> &ParameterLayout {
        &self.layout
    }

    pub fn get(&self, id: ParameterId) -> Option<i32> {
        self.values.get(id.index()).copied()
    }

    /// Stores a validated code and returns the previous one.
    pub fn set(&mut self, id: ParameterId, value: i32) -> Result<i32, PluginParameterError> {
        let definition = self
            .layout
            .find(id)
            .ok_or(PluginParameterError::UnknownParameter(id))?;
        if definition.read_only {
            return Err(PluginParameterError::ReadOnly(id));
        }
        if !definition.contains(value) {
            return Err(PluginParameterError::OutOfRange {
                id,
                min: definition.min,
                max: definition.max,
                value,
            });
        }
        Ok(std::mem::replace(&mut self.values[id.index()], value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParameterDefinition, i32)> {
        self.layout
            .parameters()
            .iter()
            .zip(self.values.iter().copied())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PluginParameterError {
    #[error("unknown parameter `{0}`")]
    UnknownParameter(ParameterId),
    #[error("parameter `{id}` received value {value} outside of range {min}..={max}")]
    OutOfRange {
        id: ParameterId,
        min: i32,
        max: i32,
        value: i32,
    },
    #[error("parameter `{0}` is read-only")]
    ReadOnly(ParameterId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ParameterLayout {
        ParameterLayout::new(vec![
            ParameterDefinition::choice(0usize, "Shape", &["A", "B", "C"], 1),
            ParameterDefinition::range(1usize, "Amount", -10..=10, 0),
            ParameterDefinition::range(2usize, "Version", 0..=0, 0).read_only(),
        ])
    }

    #[test]
    fn defaults_populate_the_set() {
        let set = ParameterSet::new(layout());
        assert_eq!(set.get(ParameterId(0)), Some(1));
        assert_eq!(set.get(ParameterId(1)), Some(0));
        assert_eq!(set.get(ParameterId(9)), None);
    }

    #[test]
    fn set_validates_and_returns_previous() {
        let mut set = ParameterSet::new(layout());
        assert_eq!(set.set(ParameterId(1), -7), Ok(0));
        assert_eq!(set.get(ParameterId(1)), Some(-7));
        assert_eq!(
            set.set(ParameterId(0), 3),
            Err(PluginParameterError::OutOfRange {
                id: ParameterId(0),
                min: 0,
                max: 2,
                value: 3
            })
        );
        assert_eq!(
            set.set(ParameterId(2), 0),
            Err(PluginParameterError::ReadOnly(ParameterId(2)))
        );
        assert_eq!(
            set.set(ParameterId(5), 0),
            Err(PluginParameterError::UnknownParameter(ParameterId(5)))
        );
    }

    #[test]
    fn choice_options_and_lookup() {
        let layout = layout();
        let shape = layout.find_by_name("shape").map(|d| d.option(2));
        assert_eq!(shape, Some(Some("C")));
        assert_eq!(layout.find(ParameterId(0)).and_then(|d| d.option(-1)), None);
    }

    #[test]
    #[should_panic(expected = "layout position")]
    fn out_of_order_ids_are_rejected() {
        ParameterLayout::new(vec![ParameterDefinition::range(1usize, "X", 0..=1, 0)]);
    }
}
