//! Declarative UI description.
//!
//! The presenter builds a tree of [`Component`]s; drawing it is the host's
//! business. Serialization follows the host's component JSON (`{"type": ...}`).

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Component {
    Panel { children: Vec<Component> },
    Heading { value: String },
    /// Markdown-flavoured text (`**bold**`, `_italic_`, `[label](url)`).
    Text { value: String },
    Row { label: String, value: Box<Component> },
    Address { value: String },
    Divider,
    /// Inline SVG.
    Image { value: String },
}

pub fn panel(children: Vec<Component>) -> Component {
    Component::Panel { children }
}

pub fn heading(value: impl Into<String>) -> Component {
    Component::Heading {
        value: value.into(),
    }
}

pub fn text(value: impl Into<String>) -> Component {
    Component::Text {
        value: value.into(),
    }
}

pub fn row(label: impl Into<String>, value: Component) -> Component {
    Component::Row {
        label: label.into(),
        value: Box::new(value),
    }
}

pub fn address(value: impl Into<String>) -> Component {
    Component::Address {
        value: value.into(),
    }
}

pub fn divider() -> Component {
    Component::Divider
}

pub fn image(svg: impl Into<String>) -> Component {
    Component::Image { value: svg.into() }
}

/// Modal dialogs shown through the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Dialog {
    Prompt { content: Component, placeholder: String },
    Alert { content: Component },
}

impl Dialog {
    pub fn content(&self) -> &Component {
        match self {
            Dialog::Prompt { content, .. } | Dialog::Alert { content } => content,
        }
    }
}

pub trait Visitor {
    fn enter_panel(&mut self) {}
    fn leave_panel(&mut self) {}
    fn heading(&mut self, value: &str);
    fn text(&mut self, value: &str);
    fn row(&mut self, label: &str, value: &Component);
    fn address(&mut self, value: &str);
    fn divider(&mut self);
    fn image(&mut self, svg: &str);
}

impl Component {
    /// Depth-first walk; rows hand their value to the visitor unvisited.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Component::Panel { children } => {
                visitor.enter_panel();
                for child in children {
                    child.accept(visitor);
                }
                visitor.leave_panel();
            }
            Component::Heading { value } => visitor.heading(value),
            Component::Text { value } => visitor.text(value),
            Component::Row { label, value } => visitor.row(label, value),
            Component::Address { value } => visitor.address(value),
            Component::Divider => visitor.divider(),
            Component::Image { value } => visitor.image(value),
        }
    }

    /// Plain-text lines, one per leaf.
    pub fn lines(&self) -> Vec<String> {
        let mut out = PlainText::default();
        self.accept(&mut out);
        out.lines
    }
}

/// Terminal rendering, one line per leaf.
#[derive(Debug, Default)]
pub struct PlainText {
    pub lines: Vec<String>,
}

impl PlainText {
    pub fn render(component: &Component) -> String {
        let mut out = Self::default();
        component.accept(&mut out);
        out.lines.join("\n")
    }

    fn inline(component: &Component) -> String {
        match component {
            Component::Text { value }
            | Component::Heading { value }
            | Component::Address { value } => value.clone(),
            Component::Row { label, value } => format!("{label}: {}", Self::inline(value)),
            Component::Divider | Component::Image { .. } => String::new(),
            Component::Panel { children } => children
                .iter()
                .map(Self::inline)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl Visitor for PlainText {
    fn heading(&mut self, value: &str) {
        self.lines.push(format!("# {value}"));
    }

    fn text(&mut self, value: &str) {
        self.lines.push(value.replace("&bull;", "•"));
    }

    fn row(&mut self, label: &str, value: &Component) {
        self.lines.push(format!("{label}: {}", Self::inline(value)));
    }

    fn address(&mut self, value: &str) {
        self.lines.push(value.to_string());
    }

    fn divider(&mut self) {
        self.lines.push("---".to_string());
    }

    fn image(&mut self, _svg: &str) {}
}
