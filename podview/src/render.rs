//! Page rendering.
//!
//! The four templates are embedded into the binary and parsed once when the
//! [`Renderer`] is built; a template that fails to parse prevents startup.

use std::collections::HashMap;

use anyhow::Context as _;
use tera::{Context, Tera, Value};

use crate::sections::Section;

pub const INDEX_TEMPLATE: &str = "index.html";
pub const STYLE_TEMPLATE: &str = "style.css";
pub const SCRIPT_TEMPLATE: &str = "script.js";
pub const DATA_TEMPLATE: &str = "data.html";

/// Turn any string into something usable as an element id or anchor:
/// lowercase ASCII, words separated by `-`, diacritics removed.
pub fn to_slug(value: &str) -> String {
    slug::slugify(value)
}

fn to_slug_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let slug = match value {
        Value::String(s) => to_slug(s),
        other => to_slug(&other.to_string()),
    };
    Ok(Value::String(slug))
}

pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.register_filter("to_slug", to_slug_filter);
        tera.add_raw_templates(vec![
            (INDEX_TEMPLATE, include_str!("../templates/index.html")),
            (STYLE_TEMPLATE, include_str!("../templates/style.css")),
            (SCRIPT_TEMPLATE, include_str!("../templates/script.js")),
            (DATA_TEMPLATE, include_str!("../templates/data.html")),
        ])
        .context("Failed parsing page templates")?;

        Ok(Self { tera })
    }

    /// Renders `name`. On failure whatever was produced before the error is
    /// returned as is.
    fn render(&self, name: &str, context: &Context) -> Vec<u8> {
        let mut output = Vec::new();
        if let Err(err) = self.tera.render_to(name, context, &mut output) {
            tracing::error!("Failed rendering {}: {:?}", name, err);
        }
        output
    }

    pub fn index(&self, title: &str) -> Vec<u8> {
        let mut context = Context::new();
        context.insert("title", title);
        self.render(INDEX_TEMPLATE, &context)
    }

    pub fn style(&self, background_color: &str, foreground_color: &str) -> Vec<u8> {
        let mut context = Context::new();
        context.insert("background_color", background_color);
        context.insert("foreground_color", foreground_color);
        self.render(STYLE_TEMPLATE, &context)
    }

    pub fn script(&self) -> Vec<u8> {
        self.render(SCRIPT_TEMPLATE, &Context::new())
    }

    pub fn data(
        &self,
        sections: &[Section],
        background_color: &str,
        foreground_color: &str,
    ) -> Vec<u8> {
        let mut context = Context::new();
        context.insert("sections", sections);
        context.insert("background_color", background_color);
        context.insert("foreground_color", foreground_color);
        self.render(DATA_TEMPLATE, &context)
    }
}
