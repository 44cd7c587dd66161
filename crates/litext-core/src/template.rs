#![forbid(unsafe_code)]

//! Data-driven templates.
//!
//! A [`Template`] wraps a pure function from data to [`Fragment`]. Rendering
//! replaces a container's children with the freshly built fragment.

use std::fmt;

use crate::dom::{Document, NodeId};
use crate::dom_helper;
use crate::error::DomError;
use crate::fragment::Fragment;

/// A reusable template over data of type `T`.
pub struct Template<T> {
    render_fn: Box<dyn Fn(&T) -> Fragment>,
}

impl<T> fmt::Debug for Template<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template").finish_non_exhaustive()
    }
}

impl<T> Template<T> {
    /// Wrap a template function.
    pub fn new(render_fn: impl Fn(&T) -> Fragment + 'static) -> Self {
        Self {
            render_fn: Box::new(render_fn),
        }
    }

    /// Evaluate the template without touching any tree.
    #[must_use]
    pub fn template(&self, data: &T) -> Fragment {
        (self.render_fn)(data)
    }

    /// Render `data` into `container`, replacing its children.
    pub fn render(
        &self,
        doc: &mut Document,
        data: &T,
        container: NodeId,
    ) -> Result<Vec<NodeId>, DomError> {
        self.overwrite(doc, container, data)
    }

    /// Replace the children of `container` with the rendered fragment.
    ///
    /// Fails when `container` is not a live element.
    pub fn overwrite(
        &self,
        doc: &mut Document,
        container: NodeId,
        data: &T,
    ) -> Result<Vec<NodeId>, DomError> {
        dom_helper::overwrite(doc, container, &self.template(data))
    }

    /// Inner HTML the template produces for `data`.
    #[must_use]
    pub fn apply(&self, data: &T) -> String {
        self.template(data).to_html()
    }

    /// Alias of [`Template::apply`] for server-side style callers.
    #[must_use]
    pub fn render_to_string(&self, data: &T) -> String {
        self.apply(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomError;
    use crate::fragment::VNode;

    struct Greeting {
        msg: &'static str,
    }

    fn greeting() -> Template<Greeting> {
        Template::new(|g: &Greeting| VNode::element("p").with_text(g.msg).into())
    }

    #[test]
    fn render_replaces_previous_content() {
        let mut doc = Document::new();
        let host = doc.create_element("div");
        let tpl = greeting();
        tpl.render(&mut doc, &Greeting { msg: "one" }, host).unwrap();
        tpl.render(&mut doc, &Greeting { msg: "two" }, host).unwrap();
        assert_eq!(doc.children(host).len(), 1);
        assert_eq!(doc.text_content(host), "two");
    }

    #[test]
    fn overwrite_rejects_dead_container() {
        let mut doc = Document::new();
        let host = doc.create_element("div");
        doc.remove(host).unwrap();
        let err = greeting()
            .overwrite(&mut doc, host, &Greeting { msg: "x" })
            .unwrap_err();
        assert_eq!(err, DomError::UnknownNode(host));
    }

    #[test]
    fn apply_returns_html() {
        let tpl = greeting();
        assert_eq!(tpl.apply(&Greeting { msg: "Olá" }), "<p>Olá</p>");
        assert_eq!(tpl.render_to_string(&Greeting { msg: "a<b" }), "<p>a&lt;b</p>");
    }
}
