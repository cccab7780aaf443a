//! Data handed from the server-rendered page to the client as `window.INIT_DATA`.

use herald_utils::escape_inline_script;
use serde::Serialize;

/// `id` of the inline script carrying INIT_DATA.
pub const INIT_DATA_SCRIPT_ID: &str = "herald-init-data";

/// Render the inline script that assigns `data` to `window.INIT_DATA`.
pub fn init_data_script<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    let json = escape_inline_script(&serde_json::to_string(data)?);
    Ok(format!(
        r#"<script id="{INIT_DATA_SCRIPT_ID}">window.INIT_DATA = {json};</script>"#
    ))
}

/// Get INIT_DATA from window object as JsValue
#[cfg(target_arch = "wasm32")]
pub fn get_init_data() -> Option<wasm_bindgen::JsValue> {
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let init_data = js_sys::Reflect::get(&window, &JsValue::from_str("INIT_DATA")).ok()?;

    if init_data.is_undefined() || init_data.is_null() {
        return None;
    }

    Some(init_data)
}

/// Deserialize the whole INIT_DATA object into `T`.
#[cfg(target_arch = "wasm32")]
pub fn get_typed_init_data<T>() -> Option<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let init_data = get_init_data()?;

    let json_string = js_sys::JSON::stringify(&init_data).ok()?;
    let json_str = json_string.as_string()?;

    serde_json::from_str(&json_str).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Data {
        version: &'static str,
    }

    #[test]
    fn test_init_data_script() {
        let script = init_data_script(&Data { version: "1.2.3" }).unwrap();
        assert_eq!(
            script,
            r#"<script id="herald-init-data">window.INIT_DATA = {"version":"1.2.3"};</script>"#
        );
    }

    #[test]
    fn test_init_data_script_cannot_close_tag() {
        let script = init_data_script(&Data {
            version: "</script><script>alert(1)</script>",
        })
        .unwrap();

        assert_eq!(script.matches("</script>").count(), 1);
        assert!(script.ends_with("</script>"));
    }

    #[test]
    fn test_init_data_script_cannot_open_comment() {
        let script = init_data_script(&Data {
            version: "<!--<script>",
        })
        .unwrap();

        assert_eq!(
            script,
            r#"<script id="herald-init-data">window.INIT_DATA = {"version":"\u003c!--\u003cscript\u003e"};</script>"#
        );
    }
}
