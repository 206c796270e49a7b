use leptos::prelude::*;
use tabcordion_core::{TabsOptions, DEFAULT_BREAKPOINT};

use crate::binding::bind;

/// Container that turns its `.selector` children into tabs, or an accordion
/// below `breakpoint` pixels.
///
/// Children follow the usual markup: each selector input is immediately
/// followed by its content panel.
///
/// ```ignore
/// view! {
///     <TabcordionGroup tabsindex=1>
///         <input class="selector" id="overview" name="tc1" />
///         <div class="content">"..."</div>
///     </TabcordionGroup>
/// }
/// ```
#[component]
pub fn TabcordionGroup(
    #[prop(default = DEFAULT_BREAKPOINT)] breakpoint: u32,
    #[prop(default = 0)] tabsindex: u32,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let options = TabsOptions {
        breakpoint,
        tabsindex,
    };
    let container_ref = NodeRef::<leptos::html::Div>::new();
    let is_bound = StoredValue::new(false);

    // Bind once, after the children are in the DOM.
    Effect::new(move |_| {
        if is_bound.get_value() {
            return;
        }
        if let Some(container) = container_ref.get() {
            is_bound.set_value(true);
            if let Err(e) = bind(container.into(), options) {
                log::warn!("tabcordion {}: {}", options.key(), e);
            }
        }
    });

    let class = if class.is_empty() {
        "tabs".to_string()
    } else {
        format!("tabs {}", class)
    };

    view! {
        <div node_ref=container_ref class=class>
            {children()}
        </div>
    }
}
