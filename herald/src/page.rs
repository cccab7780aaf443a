//! Full HTML document wrapped around a server-rendered view.

use serde::Serialize;

use crate::Html;
use crate::init_data::init_data_script;
use herald_utils::{escape_attr, escape_inline_script, escape_text};

/// Document shell for server-side rendering.
///
/// The rendered view is placed inside `<div id="{root_id}">`, which is also
/// where the client mounts.
#[derive(Debug, Clone)]
pub struct PageShell {
    title: String,
    lang: String,
    root_id: String,
    stylesheets: Vec<String>,
    init_data: Option<String>,
    module: Option<String>,
}

impl PageShell {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lang: "en".to_owned(),
            root_id: "app".to_owned(),
            stylesheets: Vec::new(),
            init_data: None,
            module: None,
        }
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn root_id(mut self, root_id: impl Into<String>) -> Self {
        self.root_id = root_id.into();
        self
    }

    pub fn stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheets.push(href.into());
        self
    }

    /// Embed `data` as `window.INIT_DATA` for the client.
    pub fn init_data<T: Serialize>(mut self, data: &T) -> Result<Self, serde_json::Error> {
        self.init_data = Some(init_data_script(data)?);
        Ok(self)
    }

    /// ES module produced by wasm-bindgen; its default export is called on load.
    pub fn module(mut self, src: impl Into<String>) -> Self {
        self.module = Some(src.into());
        self
    }

    pub fn render(&self, body: &Html) -> String {
        let mut out = String::from("<!DOCTYPE html>");
        out.push_str(&format!("<html lang=\"{}\"><head>", escape_attr(&self.lang)));
        out.push_str("<meta charset=\"utf-8\">");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
        out.push_str(&format!("<title>{}</title>", escape_text(&self.title)));

        for href in &self.stylesheets {
            out.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">",
                escape_attr(href)
            ));
        }

        if let Some(script) = &self.init_data {
            out.push_str(script);
        }

        out.push_str("</head><body>");
        out.push_str(&format!(
            "<div id=\"{}\">{body}</div>",
            escape_attr(&self.root_id)
        ));

        if let Some(src) = &self.module {
            // serde_json gives a correctly quoted JS string literal.
            let src = serde_json::to_string(src).unwrap_or_else(|_| "\"\"".to_owned());
            let src = escape_inline_script(&src);
            out.push_str(&format!(
                "<script type=\"module\">import init from {src}; init();</script>"
            ));
        }

        out.push_str("</body></html>");
        out
    }
}
