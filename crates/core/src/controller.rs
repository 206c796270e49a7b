//! Drives a [`WidgetInstance`] against a host page.
//!
//! Every handler follows the same shape: read the fragment, run a pure
//! transition on the widget, then project the result onto the host.

use std::rc::Rc;

use crate::config::TabsOptions;
use crate::focus::{self, Platform, ScrollMetrics};
use crate::fragment::FragmentState;
use crate::scheduler::LayoutScheduler;
use crate::widget::{Activation, Mode, Role, WidgetInstance};

/// The page as seen by one widget: its container, its selectors and the
/// location fragment shared with every other widget on the page.
pub trait PanelHost {
    /// Raw location fragment, with or without the leading `#`.
    fn read_fragment(&self) -> String;
    fn write_fragment(&self, fragment: &str);

    /// Ids of the selector elements in document order.
    fn selector_ids(&self) -> Vec<String>;
    fn set_role(&self, id: &str, role: Role);
    fn set_checked(&self, id: &str, checked: bool);

    /// Tag the container with the instance key.
    fn set_container_key(&self, key: &str);
    /// Toggle the presentation-mode class of the container.
    fn set_mode_class(&self, mode: Mode);

    /// Measure the content panel that belongs to selector `id`.
    fn scroll_metrics(&self, id: &str) -> Option<ScrollMetrics>;
    fn scroll_to(&self, top: f64);
}

pub struct PanelStateController<H> {
    widget: WidgetInstance,
    host: Rc<H>,
    scheduler: Rc<dyn LayoutScheduler>,
    platform: Platform,
}

impl<H: PanelHost + 'static> PanelStateController<H> {
    /// Bind a widget to `host` and apply the mode for the current breakpoint
    /// state.
    pub fn new(
        options: &TabsOptions,
        host: Rc<H>,
        scheduler: Rc<dyn LayoutScheduler>,
        platform: Platform,
        breakpoint_matches: bool,
    ) -> Self {
        let widget = WidgetInstance::new(options, host.selector_ids());
        host.set_container_key(widget.key());

        let mut controller = Self {
            widget,
            host,
            scheduler,
            platform,
        };
        controller.on_breakpoint_change(breakpoint_matches);
        controller
    }

    pub fn widget(&self) -> &WidgetInstance {
        &self.widget
    }

    pub fn key(&self) -> &str {
        self.widget.key()
    }

    pub fn mode(&self) -> Mode {
        self.widget.mode()
    }

    /// The viewport crossed the breakpoint (or is evaluated for the first
    /// time).
    pub fn on_breakpoint_change(&mut self, matches: bool) {
        let mode = Mode::from_breakpoint_match(matches);
        self.widget.sync_selectors(self.host.selector_ids());

        let mut fragment = self.read_fragment();
        let activation = self.widget.switch_mode(mode, &mut fragment);

        let role = mode.role();
        for selector in self.widget.selectors() {
            self.host.set_role(&selector.id, role);
        }
        if let Some(activation) = &activation {
            self.project(activation, &fragment);
        }
        self.host.set_mode_class(mode);

        log::debug!("{}: switched to {} mode", self.widget.key(), mode.as_str());
        self.focus(activation.map(|a| a.active));
    }

    /// A selector was clicked.
    pub fn on_selector_click(&mut self, id: &str) {
        let active = self.activate(Some(id));
        if active.is_some() {
            self.focus(active);
        }
    }

    /// The page finished loading; bring the active panel into view.
    pub fn on_load(&self) {
        self.focus(None);
    }

    /// Activate `id`, or the panel the fragment names when `None`.
    /// Returns the id that ended up active.
    pub fn activate(&mut self, id: Option<&str>) -> Option<String> {
        let mut fragment = self.read_fragment();
        let activation = self.widget.activate(&mut fragment, id)?;
        self.project(&activation, &fragment);
        Some(activation.active)
    }

    fn read_fragment(&self) -> FragmentState {
        FragmentState::parse(&self.host.read_fragment())
    }

    fn project(&self, activation: &Activation, fragment: &FragmentState) {
        for (id, checked) in &activation.writes {
            self.host.set_checked(id, *checked);
        }
        self.host.write_fragment(&fragment.serialize());
    }

    fn focus(&self, id: Option<String>) {
        let id = match id {
            Some(id) => id,
            None => match self.widget.resolve_active(&self.read_fragment()) {
                Some(selector) => selector.id.clone(),
                None => return,
            },
        };
        let Some(selector) = self.widget.selector(&id) else {
            return;
        };
        if !focus::should_scroll(selector.role, self.platform) {
            return;
        }

        let host = Rc::clone(&self.host);
        let platform = self.platform;
        self.scheduler.after_layout(Box::new(move || {
            if let Some(metrics) = host.scroll_metrics(&id) {
                host.scroll_to(focus::scroll_destination(metrics, platform));
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::QueuedScheduler;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    struct FakePage {
        fragment: Rc<RefCell<String>>,
        ids: RefCell<Vec<String>>,
        roles: RefCell<HashMap<String, Role>>,
        checked: RefCell<HashMap<String, bool>>,
        container_key: RefCell<String>,
        accordion_class: Cell<bool>,
        fragment_writes: Cell<usize>,
        scrolls: RefCell<Vec<f64>>,
    }

    impl FakePage {
        fn new(fragment: &Rc<RefCell<String>>, ids: &[&str]) -> Rc<Self> {
            Rc::new(Self {
                fragment: Rc::clone(fragment),
                ids: RefCell::new(ids.iter().map(|s| s.to_string()).collect()),
                roles: RefCell::default(),
                checked: RefCell::default(),
                container_key: RefCell::default(),
                accordion_class: Cell::new(false),
                fragment_writes: Cell::new(0),
                scrolls: RefCell::default(),
            })
        }

        fn checked_ids(&self) -> Vec<String> {
            let checked = self.checked.borrow();
            self.ids
                .borrow()
                .iter()
                .filter(|id| checked.get(*id).copied().unwrap_or(false))
                .cloned()
                .collect()
        }
    }

    impl PanelHost for FakePage {
        fn read_fragment(&self) -> String {
            format!("#{}", self.fragment.borrow())
        }

        fn write_fragment(&self, fragment: &str) {
            *self.fragment.borrow_mut() = fragment.to_string();
            self.fragment_writes.set(self.fragment_writes.get() + 1);
        }

        fn selector_ids(&self) -> Vec<String> {
            self.ids.borrow().clone()
        }

        fn set_role(&self, id: &str, role: Role) {
            self.roles.borrow_mut().insert(id.to_string(), role);
        }

        fn set_checked(&self, id: &str, checked: bool) {
            let mut states = self.checked.borrow_mut();
            // Radios in one group exclude each other.
            if checked && self.roles.borrow().get(id) == Some(&Role::Radio) {
                for value in states.values_mut() {
                    *value = false;
                }
            }
            states.insert(id.to_string(), checked);
        }

        fn set_container_key(&self, key: &str) {
            *self.container_key.borrow_mut() = key.to_string();
        }

        fn set_mode_class(&self, mode: Mode) {
            self.accordion_class.set(mode == Mode::Accordion);
        }

        fn scroll_metrics(&self, id: &str) -> Option<ScrollMetrics> {
            let index = self.ids.borrow().iter().position(|s| s == id)?;
            Some(ScrollMetrics {
                page_y_offset: 40.0,
                document_scroll_top: 100.0,
                target_top: 10.0 * index as f64,
            })
        }

        fn scroll_to(&self, top: f64) {
            self.scrolls.borrow_mut().push(top);
        }
    }

    const DESKTOP: Platform = Platform {
        touch_primary: false,
        unreliable_scroll_offset: false,
    };
    const IOS: Platform = Platform {
        touch_primary: true,
        unreliable_scroll_offset: true,
    };

    fn bind(
        page: &Rc<FakePage>,
        tabsindex: u32,
        platform: Platform,
        narrow: bool,
    ) -> (PanelStateController<FakePage>, Rc<QueuedScheduler>) {
        let scheduler = Rc::new(QueuedScheduler::new());
        let options = TabsOptions::default().with_tabsindex(tabsindex);
        let controller = PanelStateController::new(
            &options,
            Rc::clone(page),
            scheduler.clone(),
            platform,
            narrow,
        );
        (controller, scheduler)
    }

    fn shared_fragment(raw: &str) -> Rc<RefCell<String>> {
        Rc::new(RefCell::new(raw.to_string()))
    }

    #[test]
    fn test_construction_resolves_from_fragment() {
        let fragment = shared_fragment("tc0=b");
        let page = FakePage::new(&fragment, &["a", "b", "c"]);
        let (controller, _) = bind(&page, 0, DESKTOP, false);

        assert_eq!(page.checked_ids(), vec!["b"]);
        assert_eq!(controller.widget().active().map(|s| s.id.as_str()), Some("b"));
        assert_eq!(*page.container_key.borrow(), "tc0");
        assert_eq!(page.roles.borrow().get("a"), Some(&Role::Radio));
        assert!(!page.accordion_class.get());
    }

    #[test]
    fn test_construction_stale_id_falls_back() {
        let fragment = shared_fragment("tc0=z");
        let page = FakePage::new(&fragment, &["a", "b", "c"]);
        bind(&page, 0, DESKTOP, false);

        assert_eq!(page.checked_ids(), vec!["a"]);
        assert_eq!(*fragment.borrow(), "tc0=a");
    }

    #[test]
    fn test_construction_in_accordion_mode() {
        let fragment = shared_fragment("");
        let page = FakePage::new(&fragment, &["a", "b"]);
        let (controller, _) = bind(&page, 0, DESKTOP, true);

        assert_eq!(controller.mode(), Mode::Accordion);
        assert!(page.accordion_class.get());
        assert_eq!(page.roles.borrow().get("b"), Some(&Role::Checkbox));
        assert_eq!(page.checked_ids(), vec!["a"]);
    }

    #[test]
    fn test_click_preserves_unrelated_keys() {
        let fragment = shared_fragment("other=xyz");
        let page = FakePage::new(&fragment, &["a", "b", "c"]);
        let (mut controller, _) = bind(&page, 0, DESKTOP, false);

        controller.on_selector_click("c");
        assert_eq!(*fragment.borrow(), "other=xyz&tc0=c");
        assert_eq!(page.checked_ids(), vec!["c"]);
    }

    #[test]
    fn test_accordion_click_is_exclusive() {
        let fragment = shared_fragment("");
        let page = FakePage::new(&fragment, &["a", "b", "c"]);
        let (mut controller, _) = bind(&page, 0, DESKTOP, true);
        assert_eq!(page.checked_ids(), vec!["a"]);

        // The browser already toggled the clicked checkbox on its own.
        page.set_checked("b", true);
        controller.on_selector_click("b");

        assert_eq!(page.checked_ids(), vec!["b"]);
        assert_eq!(*fragment.borrow(), "tc0=b");
    }

    #[test]
    fn test_accordion_reclick_rewrites_fragment() {
        let fragment = shared_fragment("tc0=b");
        let page = FakePage::new(&fragment, &["a", "b"]);
        let (mut controller, _) = bind(&page, 0, DESKTOP, true);
        let writes = page.fragment_writes.get();

        controller.on_selector_click("b");
        assert_eq!(page.fragment_writes.get(), writes + 1);
        assert_eq!(page.checked_ids(), vec!["b"]);
        assert_eq!(*fragment.borrow(), "tc0=b");
    }

    #[test]
    fn test_undecodable_foreign_segment_survives() {
        let fragment = shared_fragment("tc0=b&tc1=x&utm=%E9t%E9");
        let page = FakePage::new(&fragment, &["a", "b"]);
        let (mut controller, _) = bind(&page, 0, DESKTOP, false);

        assert_eq!(page.checked_ids(), vec!["b"]);
        assert_eq!(*fragment.borrow(), "tc0=b&tc1=x&utm=%E9t%E9");

        controller.on_selector_click("a");
        assert_eq!(page.checked_ids(), vec!["a"]);
        assert_eq!(*fragment.borrow(), "tc0=a&tc1=x&utm=%E9t%E9");
    }

    #[test]
    fn test_mode_round_trip_keeps_active_panel() {
        let fragment = shared_fragment("tc0=c&other=xyz");
        let page = FakePage::new(&fragment, &["a", "b", "c"]);
        let (mut controller, _) = bind(&page, 0, DESKTOP, false);
        let before = fragment.borrow().clone();

        controller.on_breakpoint_change(true);
        assert_eq!(page.checked_ids(), vec!["c"]);
        controller.on_breakpoint_change(false);

        assert_eq!(page.checked_ids(), vec!["c"]);
        assert_eq!(*fragment.borrow(), before);
        assert!(!page.accordion_class.get());
    }

    #[test]
    fn test_two_instances_share_fragment() {
        let fragment = shared_fragment("");
        let first = FakePage::new(&fragment, &["a1", "b1"]);
        let second = FakePage::new(&fragment, &["a2", "b2"]);
        let (mut c0, _) = bind(&first, 0, DESKTOP, false);
        let (mut c1, _) = bind(&second, 1, DESKTOP, false);

        c0.on_selector_click("b1");
        c1.on_selector_click("b2");

        let state = FragmentState::parse(&fragment.borrow());
        assert_eq!(state.get("tc0"), Some("b1"));
        assert_eq!(state.get("tc1"), Some("b2"));

        // A click in one widget never touches the other's selectors.
        c0.on_selector_click("a1");
        assert_eq!(second.checked_ids(), vec!["b2"]);
        assert_eq!(FragmentState::parse(&fragment.borrow()).get("tc1"), Some("b2"));
    }

    #[test]
    fn test_empty_container_is_noop() {
        let fragment = shared_fragment("other=1");
        let page = FakePage::new(&fragment, &[]);
        let (mut controller, scheduler) = bind(&page, 0, IOS, true);

        assert_eq!(controller.activate(None), None);
        controller.on_selector_click("a");
        controller.on_load();

        assert_eq!(*fragment.borrow(), "other=1");
        assert_eq!(page.fragment_writes.get(), 0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_focus_skipped_for_desktop_tabs() {
        let fragment = shared_fragment("");
        let page = FakePage::new(&fragment, &["a", "b"]);
        let (mut controller, scheduler) = bind(&page, 0, DESKTOP, false);

        controller.on_selector_click("b");
        controller.on_load();
        assert_eq!(scheduler.run_pending(), 0);
        assert!(page.scrolls.borrow().is_empty());
    }

    #[test]
    fn test_focus_deferred_in_accordion_mode() {
        let fragment = shared_fragment("");
        let page = FakePage::new(&fragment, &["a", "b"]);
        let (mut controller, scheduler) = bind(&page, 0, DESKTOP, true);

        controller.on_selector_click("b");
        // Nothing scrolls until layout settles.
        assert!(page.scrolls.borrow().is_empty());

        assert_eq!(scheduler.run_pending(), 2);
        assert_eq!(*page.scrolls.borrow(), vec![100.0, 110.0]);
    }

    #[test]
    fn test_focus_uses_corrected_offset_on_ios() {
        let fragment = shared_fragment("tc0=b");
        let page = FakePage::new(&fragment, &["a", "b"]);
        let (controller, scheduler) = bind(&page, 0, IOS, false);

        controller.on_load();
        scheduler.run_pending();
        assert_eq!(*page.scrolls.borrow(), vec![50.0, 50.0]);
    }

    #[test]
    fn test_selectors_rediscovered_on_mode_switch() {
        let fragment = shared_fragment("tc0=c");
        let page = FakePage::new(&fragment, &["a", "b"]);
        let (mut controller, _) = bind(&page, 0, DESKTOP, false);
        assert_eq!(page.checked_ids(), vec!["a"]);

        page.ids.borrow_mut().push("c".to_string());
        *fragment.borrow_mut() = "tc0=c".to_string();
        controller.on_breakpoint_change(true);

        assert_eq!(page.roles.borrow().get("c"), Some(&Role::Checkbox));
        assert_eq!(page.checked_ids(), vec!["c"]);
    }
}
