//! Release page
//!
//! A single page that greets visitors, counts button clicks and shows the
//! release version it was built with. The same `App` component is rendered
//! to HTML by the server and mounted in the browser by the wasm client.

#![allow(missing_docs)]

pub mod app;
pub mod greet;
pub mod release;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;

pub use app::App;
pub use release::{ConfigError, ReleaseVersion};

/// Browser entry point, run by the wasm-bindgen bootstrap module.
///
/// The server embeds the release version as INIT_DATA; the bundled
/// descriptor is the fallback when the page was not server rendered.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    use herald::Herald;
    use herald::init_data::get_typed_init_data;

    let release = match get_typed_init_data::<ReleaseVersion>() {
        Some(release) => release,
        None => ReleaseVersion::bundled().map_err(|err| err.to_string())?,
    };

    let app = App::new(release);
    app.count_signal().subscribe(|count| {
        web_sys::console::log_1(&format!("Count: {count}").into());
    });

    Herald::new().root(format!("#{}", app::ROOT_ID)).mount(app)?;
    Ok(())
}
