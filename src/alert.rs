//! Alert partials for surfacing errors to users.
//!
//! Forms target `#alert-container` (see [crate::html::base]) via
//! `hx-target-error` so failed requests surface here without a page reload.

use maud::{Markup, html};

/// Renders an error message with appropriate styling
#[derive(Debug, Clone)]
pub struct AlertTemplate<'a> {
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> AlertTemplate<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    /// Create a new error alert without details
    pub fn error_simple(message: &'a str) -> Self {
        Self::error(message, "")
    }

    pub fn into_html(self) -> Markup {
        html!(
            div
                class="p-4 rounded-lg border border-red-300 bg-red-50 \
                    dark:border-red-800 dark:bg-red-900/30 shadow-lg"
                role="alert"
            {
                p class="font-semibold text-red-800 dark:text-red-200" { (self.message) }

                @if !self.details.is_empty() {
                    p class="text-sm text-gray-700 dark:text-gray-300 mt-1"
                    {
                        (self.details)
                    }
                }
            }
        )
    }
}
