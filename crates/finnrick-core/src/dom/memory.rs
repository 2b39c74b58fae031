use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

use html_escape::encode_double_quoted_attribute;
use parking_lot::Mutex;

use crate::dom::{Container, Document};

#[derive(Debug, Default)]
struct ContainerState {
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    inner_html: String,
    attached: bool,
}

/// In-memory element. Clones share the same underlying node.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    node: Arc<Mutex<ContainerState>>,
}

impl MemoryContainer {
    pub fn new(classes: &[&str]) -> Self {
        Self {
            node: Arc::new(Mutex::new(ContainerState {
                classes: classes.iter().map(|c| c.to_string()).collect(),
                ..Default::default()
            })),
        }
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.node
            .lock()
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.node.lock().classes.iter().any(|c| c == class)
    }

    pub fn inner_html(&self) -> String {
        self.node.lock().inner_html.clone()
    }

    pub fn is_attached(&self) -> bool {
        self.node.lock().attached
    }

    pub fn same_node(&self, other: &MemoryContainer) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    fn set_attached(&self, attached: bool) {
        self.node.lock().attached = attached;
    }

    fn write_html(&self, out: &mut String) -> std::fmt::Result {
        let node = self.node.lock();
        write!(
            out,
            "<div class=\"{}\"",
            encode_double_quoted_attribute(&node.classes.join(" "))
        )?;
        for (name, value) in &node.attributes {
            write!(out, " {}=\"{}\"", name, encode_double_quoted_attribute(value))?;
        }
        write!(out, ">{}</div>", node.inner_html)
    }
}

impl Container for MemoryContainer {
    fn attribute(&self, name: &str) -> Option<String> {
        self.node.lock().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.node
            .lock()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_inner_html(&self, html: String) {
        let mut node = self.node.lock();
        if node.attached {
            node.inner_html = html;
        }
    }

    fn try_mark(&self, name: &str) -> bool {
        let mut node = self.node.lock();
        if node.attributes.contains_key(name) {
            return false;
        }
        node.attributes.insert(name.to_string(), "true".to_string());
        true
    }
}

#[derive(Default)]
struct DocumentState {
    containers: Vec<MemoryContainer>,
    styles: Vec<(String, String)>,
    ready: bool,
    ready_callbacks: Vec<Box<dyn FnOnce() + Send>>,
}

/// In-memory page: a flat list of containers plus `<head>` style blocks.
#[derive(Clone, Default)]
pub struct MemoryDocument {
    state: Arc<Mutex<DocumentState>>,
}

impl std::fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MemoryDocument")
            .field("containers", &state.containers)
            .field("styles", &state.styles)
            .field("ready", &state.ready)
            .field("ready_callbacks", &state.ready_callbacks.len())
            .finish()
    }
}

impl MemoryDocument {
    /// A document that has finished loading.
    pub fn ready() -> Self {
        let doc = Self::default();
        doc.state.lock().ready = true;
        doc
    }

    /// A document still loading; see [`MemoryDocument::mark_ready`].
    pub fn loading() -> Self {
        Self::default()
    }

    pub fn append(&self, container: MemoryContainer) {
        container.set_attached(true);
        self.state.lock().containers.push(container);
    }

    /// Detaches `container`. Returns whether it was attached here.
    pub fn remove(&self, container: &MemoryContainer) -> bool {
        let mut state = self.state.lock();
        let before = state.containers.len();
        state.containers.retain(|c| !c.same_node(container));
        let removed = state.containers.len() != before;
        if removed {
            container.set_attached(false);
        }
        removed
    }

    pub fn containers(&self) -> Vec<MemoryContainer> {
        self.state.lock().containers.clone()
    }

    pub fn styles(&self) -> Vec<(String, String)> {
        self.state.lock().styles.clone()
    }

    /// Flips the document to ready and runs the queued callbacks.
    pub fn mark_ready(&self) {
        let callbacks = {
            let mut state = self.state.lock();
            state.ready = true;
            std::mem::take(&mut state.ready_callbacks)
        };
        for callback in callbacks {
            callback();
        }
    }

    /// Serializes the style blocks and containers as an HTML fragment.
    pub fn to_html(&self) -> Result<String, std::fmt::Error> {
        let (styles, containers) = {
            let state = self.state.lock();
            (state.styles.clone(), state.containers.clone())
        };

        let mut out = String::new();
        // Style text is raw inside <style>, so it is written as-is.
        for (id, css) in &styles {
            writeln!(
                out,
                "<style id=\"{}\">{}</style>",
                encode_double_quoted_attribute(id),
                css
            )?;
        }
        for container in &containers {
            container.write_html(&mut out)?;
            out.push('\n');
        }
        Ok(out)
    }
}

impl Document for MemoryDocument {
    type Container = MemoryContainer;

    fn containers_with_class(&self, class: &str) -> Vec<MemoryContainer> {
        self.state
            .lock()
            .containers
            .iter()
            .filter(|c| c.has_class(class))
            .cloned()
            .collect()
    }

    fn has_style(&self, id: &str) -> bool {
        self.state.lock().styles.iter().any(|(s, _)| s == id)
    }

    fn append_style(&self, id: &str, css: &str) {
        self.state
            .lock()
            .styles
            .push((id.to_string(), css.to_string()));
    }

    fn ensure_style(&self, id: &str, css: &str) -> bool {
        let mut state = self.state.lock();
        if state.styles.iter().any(|(s, _)| s == id) {
            return false;
        }
        state.styles.push((id.to_string(), css.to_string()));
        true
    }

    fn is_ready(&self) -> bool {
        self.state.lock().ready
    }

    fn on_ready(&self, callback: Box<dyn FnOnce() + Send>) {
        let mut state = self.state.lock();
        if state.ready {
            drop(state);
            callback();
        } else {
            state.ready_callbacks.push(callback);
        }
    }
}
