#![allow(missing_docs)]

pub mod action;
pub mod html;
pub mod init_data;
pub mod page;
pub mod prelude;
pub mod signal;

#[cfg(target_arch = "wasm32")]
mod mount;

pub use action::Action;
pub use html::{Element, Html, Node};
pub use page::PageShell;
pub use signal::{Signal, SubscriptionId};

pub use js_sys;
pub use wasm_bindgen;
pub use web_sys;

#[cfg(target_arch = "wasm32")]
pub use mount::MountHandle;

/// Trait that defines the view layer for components
///
/// Components must implement this trait to provide their rendering logic.
/// `render` must be a pure function of the component's current state.
pub trait View {
    /// Render the component to a view tree
    fn render(&self) -> Html;
}

/// Client-side entry point that mounts a root component.
#[derive(Debug, Default)]
pub struct Herald {
    root: Option<String>,
}

impl Herald {
    /// Create a new Herald application
    pub fn new() -> Self {
        Self::default()
    }

    /// CSS selector of the element to mount into; defaults to `<body>`.
    pub fn root(mut self, selector: impl Into<String>) -> Self {
        self.root = Some(selector.into());
        self
    }

    /// Mount `view` and keep it in sync with its state: every listener run is
    /// followed by a fresh render of the root.
    #[cfg(target_arch = "wasm32")]
    pub fn mount<V: View + 'static>(self, view: V) -> Result<MountHandle, wasm_bindgen::JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        mount::mount(view, self.root.as_deref())
    }
}
