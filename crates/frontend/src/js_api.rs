//! JavaScript API.
//!
//! ```js
//! import init, { Tabcordion, tabcordions, bindAll } from "./pkg/tabcordion.js";
//! await init();
//! new Tabcordion(document.querySelector(".tabs"), { breakpoint: 600, tabsindex: 0 });
//! bindAll(".tabs");
//! ```

use std::cell::RefCell;

use tabcordion_core::{TabcordionError, TabsOptions};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::binding::{bind, SharedController};
use crate::dom::dom_error;

const DATA_OPTIONS: [&str; 2] = ["breakpoint", "tabsindex"];

fn to_js_error(err: TabcordionError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn options_from_js(options: JsValue) -> Result<TabsOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(TabsOptions::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| {
        to_js_error(TabcordionError::InvalidOption {
            name: "options",
            value: e.to_string(),
        })
    })
}

/// `data-breakpoint` / `data-tabsindex` attributes of `element`.
fn data_attributes(element: &Element) -> Vec<(&'static str, String)> {
    DATA_OPTIONS
        .iter()
        .filter_map(|name| {
            element
                .get_attribute(&format!("data-{}", name))
                .map(|value| (*name, value))
        })
        .collect()
}

/// Run `f` on the value unless it is already mutably borrowed.
fn read<T, R>(cell: &RefCell<T>, f: impl FnOnce(&T) -> R) -> Option<R> {
    cell.try_borrow().ok().map(|value| f(&*value))
}

/// Run `f` on the value unless it is already borrowed.
fn write<T, R>(cell: &RefCell<T>, f: impl FnOnce(&mut T) -> R) -> Option<R> {
    cell.try_borrow_mut().ok().map(|mut value| f(&mut *value))
}

/// A widget bound to one container element.
#[wasm_bindgen]
pub struct Tabcordion {
    key: String,
    controller: SharedController,
}

impl Tabcordion {
    fn from_controller(controller: SharedController) -> Self {
        let key = controller.borrow().key().to_string();
        Self { key, controller }
    }
}

#[wasm_bindgen]
impl Tabcordion {
    #[wasm_bindgen(constructor)]
    pub fn new(container: Element, options: JsValue) -> Result<Tabcordion, JsValue> {
        let options = options_from_js(options)?;
        let controller = bind(container, options).map_err(to_js_error)?;
        Ok(Self::from_controller(controller))
    }

    /// Activate the panel with selector `id`, or re-resolve it from the
    /// location fragment when omitted. Returns the active id, or `undefined`
    /// when nothing was activated.
    pub fn activate(&self, id: Option<String>) -> Option<String> {
        match write(&self.controller, |c| c.activate(id.as_deref())) {
            Some(active) => active,
            None => {
                log::warn!("{}: activate ignored: controller busy", self.key);
                None
            }
        }
    }

    /// Fragment key of this widget, e.g. `tc0`.
    #[wasm_bindgen(getter)]
    pub fn key(&self) -> String {
        self.key.clone()
    }

    /// `"tabs"` or `"accordion"`; `undefined` while the widget is busy.
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> Option<String> {
        read(&self.controller, |c| c.mode().as_str().to_string())
    }

    #[wasm_bindgen(getter, js_name = activeId)]
    pub fn active_id(&self) -> Option<String> {
        read(&self.controller, |c| c.widget().active().map(|s| s.id.clone())).flatten()
    }
}

/// Plugin entry point for DOM-query libraries: explicit options are
/// overridden by the element's data attributes. An empty collection
/// (`undefined` element) is rejected.
///
/// ```js
/// $.fn.tabcordions = function (options) {
///     tabcordions(this.get(0), options);
///     return this;
/// };
/// ```
#[wasm_bindgen]
pub fn tabcordions(element: Option<Element>, options: JsValue) -> Result<Tabcordion, JsValue> {
    let element = element
        .ok_or_else(|| to_js_error(TabcordionError::MissingContainer("tabcordions".to_string())))?;
    let data = data_attributes(&element);
    let options = options_from_js(options)?
        .merge_data_attributes(data.iter().map(|(name, value)| (*name, value.as_str())))
        .map_err(to_js_error)?;
    let controller = bind(element, options).map_err(to_js_error)?;
    Ok(Tabcordion::from_controller(controller))
}

/// Bind every element matching `selector`, numbering instances by their
/// position in the document (`tc0`, `tc1`, ...).
#[wasm_bindgen(js_name = bindAll)]
pub fn bind_all(selector: &str, options: JsValue) -> Result<js_sys::Array, JsValue> {
    let options = options_from_js(options)?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| to_js_error(TabcordionError::MissingWindow))?;
    let nodes = document
        .query_selector_all(selector)
        .map_err(|e| to_js_error(dom_error(e)))?;

    let widgets = js_sys::Array::new();
    for index in 0..nodes.length() {
        let Some(element) = nodes.item(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let controller = bind(element, options.with_tabsindex(index)).map_err(to_js_error)?;
        widgets.push(&Tabcordion::from_controller(controller).into());
    }
    if widgets.length() == 0 {
        log::debug!("bindAll: nothing matches '{}'", selector);
    }
    Ok(widgets)
}
