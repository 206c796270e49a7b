//! Construction options for a widget.

use serde::{Deserialize, Deserializer};

use crate::error::TabcordionError;

/// Viewport width (px) at or below which the widget renders as an accordion.
pub const DEFAULT_BREAKPOINT: u32 = 480;

/// Prefix of the fragment key; instance `n` is stored under `tc{n}`.
pub const KEY_PREFIX: &str = "tc";

/// Options recognized when binding a widget.
///
/// Numbers may also arrive as strings, which is what element data attributes
/// and query-string style configs produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TabsOptions {
    #[serde(deserialize_with = "number_or_string")]
    pub breakpoint: u32,
    #[serde(deserialize_with = "number_or_string")]
    pub tabsindex: u32,
}

impl Default for TabsOptions {
    fn default() -> Self {
        Self {
            breakpoint: DEFAULT_BREAKPOINT,
            tabsindex: 0,
        }
    }
}

impl TabsOptions {
    pub fn with_tabsindex(mut self, tabsindex: u32) -> Self {
        self.tabsindex = tabsindex;
        self
    }

    /// Fragment key of this instance, e.g. `tc0`.
    pub fn key(&self) -> String {
        format!("{}{}", KEY_PREFIX, self.tabsindex)
    }

    /// Media query that switches the widget into accordion mode.
    pub fn media_query(&self) -> String {
        format!("(max-width: {}px)", self.breakpoint)
    }

    /// Override options with element data attributes (`breakpoint`,
    /// `tabsindex`). Attributes win over explicit options; unknown names are
    /// ignored.
    pub fn merge_data_attributes<'a, I>(mut self, attributes: I) -> Result<Self, TabcordionError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in attributes {
            match name {
                "breakpoint" => self.breakpoint = parse_number("breakpoint", value)?,
                "tabsindex" => self.tabsindex = parse_number("tabsindex", value)?,
                _ => {}
            }
        }
        Ok(self)
    }
}

fn parse_number(name: &'static str, value: &str) -> Result<u32, TabcordionError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| TabcordionError::InvalidOption {
            name,
            value: value.to_string(),
        })
}

fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => Ok(n as u32),
        Raw::Number(n) => Err(serde::de::Error::custom(format!(
            "expected a non-negative integer, got {}",
            n
        ))),
        Raw::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got '{}'", s))),
    }
}
