//! Pure state of one tabs/accordion widget.
//!
//! Nothing here touches the page. Transitions take the current
//! [`FragmentState`], update it in place and report what the host has to
//! write back to its selector elements.

use crate::config::TabsOptions;
use crate::fragment::FragmentState;

/// Interaction model of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Tabs,
    Accordion,
}

impl Mode {
    /// Accordion while the breakpoint media query matches.
    pub fn from_breakpoint_match(matches: bool) -> Self {
        if matches {
            Mode::Accordion
        } else {
            Mode::Tabs
        }
    }

    pub fn role(self) -> Role {
        match self {
            Mode::Tabs => Role::Radio,
            Mode::Accordion => Role::Checkbox,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Tabs => "tabs",
            Mode::Accordion => "accordion",
        }
    }
}

/// Input role of a selector element (`type` attribute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Radio,
    Checkbox,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Radio => "radio",
            Role::Checkbox => "checkbox",
        }
    }
}

/// One selectable panel header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSelector {
    pub id: String,
    pub role: Role,
    pub checked: bool,
}

impl PanelSelector {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            checked: false,
        }
    }
}

/// Result of an activation: the active selector and the checked states the
/// host must write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub active: String,
    pub writes: Vec<(String, bool)>,
}

#[derive(Debug, Clone)]
pub struct WidgetInstance {
    key: String,
    mode: Mode,
    selectors: Vec<PanelSelector>,
}

impl WidgetInstance {
    pub fn new<I, S>(options: &TabsOptions, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mode = Mode::default();
        Self {
            key: options.key(),
            mode,
            selectors: ids
                .into_iter()
                .map(|id| PanelSelector::new(id, mode.role()))
                .collect(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selectors(&self) -> &[PanelSelector] {
        &self.selectors
    }

    pub fn selector(&self, id: &str) -> Option<&PanelSelector> {
        self.selectors.iter().find(|s| s.id == id)
    }

    /// Currently checked selector, if any.
    pub fn active(&self) -> Option<&PanelSelector> {
        self.selectors.iter().find(|s| s.checked)
    }

    /// Re-read selectors in document order. Known ids keep their checked
    /// state; every selector takes the role of the current mode.
    pub fn sync_selectors<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let role = self.mode.role();
        let previous = std::mem::take(&mut self.selectors);
        self.selectors = ids
            .into_iter()
            .map(|id| {
                let id = id.into();
                let checked = previous.iter().any(|s| s.id == id && s.checked);
                PanelSelector { id, role, checked }
            })
            .collect();
    }

    /// The selector named in the fragment, falling back to the first one.
    /// `None` only when the widget has no selectors.
    pub fn resolve_active(&self, fragment: &FragmentState) -> Option<&PanelSelector> {
        fragment
            .get(&self.key)
            .and_then(|id| self.selector(id))
            .or_else(|| self.selectors.first())
    }

    /// Make `id` (or the resolved selector when `None`) the only active one
    /// and record it in `fragment`.
    ///
    /// Returns `None` without touching the fragment when there is nothing to
    /// activate: no selectors, or an id this widget does not own.
    pub fn activate(&mut self, fragment: &mut FragmentState, id: Option<&str>) -> Option<Activation> {
        let active = match id {
            Some(id) => self.selector(id)?.id.clone(),
            None => self.resolve_active(fragment)?.id.clone(),
        };

        fragment.set(&self.key, &active);

        let mut writes = Vec::new();
        for selector in &mut self.selectors {
            let checked = selector.id == active;
            selector.checked = checked;
            match self.mode {
                // Checkboxes do not exclude each other; clear the rest by hand.
                Mode::Accordion => writes.push((selector.id.clone(), checked)),
                // Radios uncheck their siblings natively.
                Mode::Tabs if checked => writes.push((selector.id.clone(), true)),
                Mode::Tabs => {}
            }
        }

        log::debug!("{}: activated '{}' in {} mode", self.key, active, self.mode.as_str());
        Some(Activation { active, writes })
    }

    /// Relabel every selector for `mode` and re-resolve the active one.
    pub fn switch_mode(&mut self, mode: Mode, fragment: &mut FragmentState) -> Option<Activation> {
        self.mode = mode;
        let role = mode.role();
        for selector in &mut self.selectors {
            selector.role = role;
        }
        self.activate(fragment, None)
    }
}
