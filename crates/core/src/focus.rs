//! Deciding whether and where to scroll after an activation.

use crate::widget::Role;

/// Capabilities of the environment the widget runs in, supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Platform {
    /// Touch is the primary input (phones, tablets).
    pub touch_primary: bool,
    /// The standard document scroll offset reports wrong values here and
    /// the window's page offset has to be used instead.
    pub unreliable_scroll_offset: bool,
}

/// Measurements taken once layout has settled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// `window.pageYOffset`
    pub page_y_offset: f64,
    /// `document.documentElement.scrollTop`
    pub document_scroll_top: f64,
    /// Viewport-relative top of the panel content.
    pub target_top: f64,
}

/// Tab strips on pointer devices stay where they are.
pub fn should_scroll(role: Role, platform: Platform) -> bool {
    role != Role::Radio || platform.touch_primary
}

/// Absolute offset that puts the panel content at the top of the viewport.
pub fn scroll_destination(metrics: ScrollMetrics, platform: Platform) -> f64 {
    let (primary, fallback) = if platform.unreliable_scroll_offset {
        (metrics.page_y_offset, metrics.document_scroll_top)
    } else {
        (metrics.document_scroll_top, metrics.page_y_offset)
    };
    let offset = if primary != 0.0 { primary } else { fallback };
    offset + metrics.target_top
}
