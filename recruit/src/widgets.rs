//! Bundled UI widgets
//!
//! Each `*.html` file in the assets directory becomes a widget addressable as
//! `ui://widget/<name>.html`. The registry is built once at startup and is
//! read-only afterwards.

use crate::error::{Error, Result};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

/// MIME type hosts expect for widget templates
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";

/// URI scheme and prefix for widget resources
pub const WIDGET_URI_PREFIX: &str = "ui://widget/";

/// Resource URI of the widget named `name`
///
/// # Examples
/// ```
/// assert_eq!(recruit::widgets::widget_uri("recruiting"), "ui://widget/recruiting.html");
/// ```
pub fn widget_uri(name: &str) -> String {
    format!("{}{}.html", WIDGET_URI_PREFIX, name)
}

/// Rendering hints attached to tools, tool results and resource contents
/// that use the widget named `name`.
pub fn widget_meta(name: &str) -> Value {
    json!({
        "openai/outputTemplate": widget_uri(name),
        "openai/toolInvocation/invoking": format!("Preparing {} UI", name),
        "openai/toolInvocation/invoked": format!("Rendered {} UI", name),
        "openai/widgetAccessible": true,
        "openai/resultCanProduceWidget": true
    })
}

/// A loaded widget template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    /// File stem, e.g. `recruiting`
    pub name: String,
    /// `ui://widget/<name>.html`
    pub uri: String,
    /// Display title, e.g. `Recruiting Widget`
    pub title: String,
    /// Template HTML
    pub html: String,
}

impl Widget {
    pub fn new(name: impl Into<String>, html: impl Into<String>) -> Self {
        let name = name.into();
        let mut chars = name.chars();
        let title = match chars.next() {
            Some(first) => format!("{}{} Widget", first.to_uppercase(), chars.as_str()),
            None => "Widget".to_string(),
        };

        Self {
            uri: widget_uri(&name),
            title,
            name,
            html: html.into(),
        }
    }

    /// Human-readable resource name
    pub fn display_name(&self) -> String {
        format!("{} UI", self.name)
    }

    /// Resource description
    pub fn description(&self) -> String {
        format!("UI for {}", self.name)
    }
}

/// Immutable lookup table of widgets by URI
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    widgets: Vec<Widget>,
    by_uri: HashMap<String, usize>,
}

impl WidgetRegistry {
    /// Build a registry from already loaded widgets. Later entries with the
    /// same URI replace earlier ones.
    pub fn from_widgets(widgets: impl IntoIterator<Item = Widget>) -> Self {
        let mut registry = Self::default();
        for widget in widgets {
            match registry.by_uri.get(&widget.uri) {
                Some(&index) => registry.widgets[index] = widget,
                None => {
                    registry.by_uri.insert(widget.uri.clone(), registry.widgets.len());
                    registry.widgets.push(widget);
                }
            }
        }
        registry
    }

    /// Load every `*.html` file in `dir`, ordered by file name.
    ///
    /// A missing directory yields an empty registry.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            tracing::warn!("Assets directory {} not found, no widgets loaded", dir.display());
            return Ok(Self::default());
        }

        let pattern = dir.join("*.html");
        let pattern = pattern
            .to_str()
            .ok_or_else(|| Error::ConfigError(format!("Non UTF-8 assets path: {}", dir.display())))?;

        let mut paths = Vec::new();
        for entry in glob::glob(pattern)? {
            let path = entry?;
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut widgets = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let html = std::fs::read_to_string(&path)?;
            tracing::debug!("Loaded widget {} from {}", name, path.display());
            widgets.push(Widget::new(name, html));
        }

        tracing::info!("Loaded {} widget(s) from {}", widgets.len(), dir.display());
        Ok(Self::from_widgets(widgets))
    }

    /// Look up a widget by resource URI
    pub fn get(&self, uri: &str) -> Result<&Widget> {
        self.by_uri
            .get(uri)
            .map(|&index| &self.widgets[index])
            .ok_or_else(|| Error::UnknownResource(uri.to_string()))
    }

    /// Widgets in load order
    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
