use thiserror::Error;

/// Errors raised while binding a widget to the page.
///
/// Runtime DOM failures after binding are logged and swallowed instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabcordionError {
    #[error("Invalid option `{name}`: {value}")]
    InvalidOption { name: &'static str, value: String },

    #[error("Browser window is not available")]
    MissingWindow,

    #[error("Container not found: {0}")]
    MissingContainer(String),

    #[error("DOM error: {0}")]
    Dom(String),
}
