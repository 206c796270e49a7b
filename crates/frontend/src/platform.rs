//! Platform capabilities derived from the browser's user agent.

use tabcordion_core::Platform;
use web_sys::window;

const IOS_DEVICES: [&str; 3] = ["iPod", "iPhone", "iPad"];

pub fn platform_from_user_agent(user_agent: &str) -> Platform {
    let ios = IOS_DEVICES.iter().any(|device| user_agent.contains(device));
    let android = user_agent.contains("Android");
    Platform {
        touch_primary: ios || android,
        // iOS Safari reports a stale documentElement.scrollTop.
        unreliable_scroll_offset: ios,
    }
}

/// Platform of the running browser; a desktop pointer device when unknown.
pub fn detect_platform() -> Platform {
    window()
        .and_then(|w| w.navigator().user_agent().ok())
        .map(|ua| platform_from_user_agent(&ua))
        .unwrap_or_default()
}
