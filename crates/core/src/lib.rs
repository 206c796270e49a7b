//! Active-panel state for tab strips that turn into accordions below a
//! viewport breakpoint.
//!
//! The active panel of every widget on a page lives in the location fragment
//! (`#tc0=panel-3&tc1=panel-1`). This crate holds everything that can be
//! decided without a browser:
//!
//! - `fragment` - the fragment codec, safe for several widgets per page
//! - `widget` - selector roles, activation and mode switching
//! - `focus` - whether and where to scroll after an activation
//! - `controller` - glue driving a widget against a [`PanelHost`]

pub mod config;
pub mod controller;
pub mod error;
pub mod focus;
pub mod fragment;
pub mod scheduler;
pub mod widget;

pub use config::{TabsOptions, DEFAULT_BREAKPOINT, KEY_PREFIX};
pub use controller::{PanelHost, PanelStateController};
pub use error::TabcordionError;
pub use focus::{Platform, ScrollMetrics};
pub use fragment::FragmentState;
pub use scheduler::{LayoutScheduler, QueuedScheduler, Task};
pub use widget::{Activation, Mode, PanelSelector, Role, WidgetInstance};
