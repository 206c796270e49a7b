//! [`PanelHost`] over the real page.

use tabcordion_core::{Mode, PanelHost, Role, ScrollMetrics, TabcordionError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlInputElement, Window};

/// Class carried by every selector element inside a container.
pub const SELECTOR_QUERY: &str = ".selector";

/// Presentation-mode class set on the container in accordion mode.
pub const ACCORDION_CLASS: &str = "accordion";

pub fn dom_error(err: JsValue) -> TabcordionError {
    TabcordionError::Dom(
        err.as_string()
            .unwrap_or_else(|| format!("{:?}", err)),
    )
}

pub struct DomHost {
    window: Window,
    container: Element,
}

impl DomHost {
    pub fn new(container: Element) -> Result<Self, TabcordionError> {
        let window = web_sys::window().ok_or(TabcordionError::MissingWindow)?;
        Ok(Self { window, container })
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Selector elements of this container in document order.
    pub fn selectors(&self) -> Vec<Element> {
        let list = match self.container.query_selector_all(SELECTOR_QUERY) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("selector query failed: {:?}", e);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn selector(&self, id: &str) -> Option<Element> {
        let found = self.selectors().into_iter().find(|el| el.id() == id);
        if found.is_none() {
            log::warn!("selector '{}' is no longer in the container", id);
        }
        found
    }

    fn document_scroll_top(&self) -> f64 {
        self.window
            .document()
            .and_then(|d| d.document_element())
            .map(|root| root.scroll_top() as f64)
            .unwrap_or(0.0)
    }
}

impl PanelHost for DomHost {
    fn read_fragment(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn write_fragment(&self, fragment: &str) {
        if let Err(e) = self.window.location().set_hash(fragment) {
            log::warn!("failed to write location hash: {:?}", e);
        }
    }

    fn selector_ids(&self) -> Vec<String> {
        self.selectors().iter().map(Element::id).collect()
    }

    fn set_role(&self, id: &str, role: Role) {
        if let Some(el) = self.selector(id) {
            let _ = el.set_attribute("type", role.as_str());
        }
    }

    fn set_checked(&self, id: &str, checked: bool) {
        let Some(el) = self.selector(id) else {
            return;
        };
        match el.dyn_ref::<HtmlInputElement>() {
            Some(input) => input.set_checked(checked),
            None => {
                let _ = js_sys::Reflect::set(&el, &"checked".into(), &checked.into());
            }
        }
    }

    fn set_container_key(&self, key: &str) {
        let _ = self.container.set_attribute("id", key);
    }

    fn set_mode_class(&self, mode: Mode) {
        let _ = self
            .container
            .class_list()
            .toggle_with_force(ACCORDION_CLASS, mode == Mode::Accordion);
    }

    fn scroll_metrics(&self, id: &str) -> Option<ScrollMetrics> {
        let content = self.selector(id)?.next_element_sibling()?;
        Some(ScrollMetrics {
            page_y_offset: self.window.page_y_offset().unwrap_or(0.0),
            document_scroll_top: self.document_scroll_top(),
            target_top: content.get_bounding_client_rect().top(),
        })
    }

    fn scroll_to(&self, top: f64) {
        self.window.scroll_to_with_x_and_y(0.0, top);
    }
}
