//! Wires a controller to browser events.
//!
//! Listeners live as long as the page, so their closures are leaked with
//! `forget()` and keep the shared controller alive.

use std::cell::RefCell;
use std::rc::Rc;

use tabcordion_core::{PanelStateController, TabcordionError, TabsOptions};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MediaQueryList, Window};

use crate::dom::{dom_error, DomHost};
use crate::platform::detect_platform;
use crate::schedule::TimerScheduler;

pub type SharedController = Rc<RefCell<PanelStateController<DomHost>>>;

/// Bind a widget to `container` and start listening for breakpoint
/// crossings, selector clicks and the page `load` event.
pub fn bind(container: Element, options: TabsOptions) -> Result<SharedController, TabcordionError> {
    let window = web_sys::window().ok_or(TabcordionError::MissingWindow)?;
    let media = window
        .match_media(&options.media_query())
        .map_err(dom_error)?
        .ok_or_else(|| TabcordionError::Dom("matchMedia is not supported".to_string()))?;

    let host = Rc::new(DomHost::new(container)?);
    let controller = PanelStateController::new(
        &options,
        Rc::clone(&host),
        Rc::new(TimerScheduler),
        detect_platform(),
        media.matches(),
    );
    let controller = Rc::new(RefCell::new(controller));

    listen_breakpoint(&media, &controller)?;
    listen_clicks(&host, &controller);
    listen_load(&window, &controller)?;

    log::debug!(
        "tabcordion {} bound ({} selectors)",
        options.key(),
        host.selectors().len()
    );
    Ok(controller)
}

fn listen_breakpoint(media: &MediaQueryList, controller: &SharedController) -> Result<(), TabcordionError> {
    let query = media.clone();
    let controller = Rc::clone(controller);
    let on_change = Closure::wrap(Box::new(move |_: Event| {
        match controller.try_borrow_mut() {
            Ok(mut c) => c.on_breakpoint_change(query.matches()),
            Err(_) => log::warn!("breakpoint change ignored: controller busy"),
        }
    }) as Box<dyn FnMut(Event)>);

    media
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .map_err(dom_error)?;
    on_change.forget();
    Ok(())
}

fn listen_clicks(host: &DomHost, controller: &SharedController) {
    for selector in host.selectors() {
        let controller = Rc::clone(controller);
        let on_click = Closure::wrap(Box::new(move |event: Event| {
            let Some(id) = event
                .current_target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|el| el.id())
            else {
                return;
            };
            match controller.try_borrow_mut() {
                Ok(mut c) => c.on_selector_click(&id),
                Err(_) => log::warn!("click on '{}' ignored: controller busy", id),
            }
        }) as Box<dyn FnMut(Event)>);

        if let Err(e) =
            selector.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        {
            log::warn!("failed to listen on selector '{}': {:?}", selector.id(), e);
        }
        on_click.forget();
    }
}

fn listen_load(window: &Window, controller: &SharedController) -> Result<(), TabcordionError> {
    let controller = Rc::clone(controller);
    let on_load = Closure::wrap(Box::new(move |_: Event| {
        if let Ok(c) = controller.try_borrow() {
            c.on_load();
        }
    }) as Box<dyn FnMut(Event)>);

    window
        .add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())
        .map_err(dom_error)?;
    on_load.forget();
    Ok(())
}
