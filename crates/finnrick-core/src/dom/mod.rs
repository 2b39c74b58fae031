//! Host document contract.
//!
//! The widget only needs a handful of operations from the page it is
//! embedded in. They are expressed as traits so the pipeline can run over a
//! browser binding or over [`memory::MemoryDocument`].
//!
//! Handles use interior mutability: the scanner and every widget task hold
//! clones of the same container.

pub mod memory;

pub use memory::{MemoryContainer, MemoryDocument};

/// One host element the widget may own.
pub trait Container: Send + Sync {
    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    /// Replaces the element's content. A no-op once the element has been
    /// removed from its document.
    fn set_inner_html(&self, html: String);

    /// Sets `name="true"` if absent. Returns whether this call set it.
    ///
    /// Implementations shared across threads should override this with an
    /// atomic version.
    fn try_mark(&self, name: &str) -> bool {
        if self.attribute(name).is_some() {
            return false;
        }
        self.set_attribute(name, "true");
        true
    }
}

/// The page hosting the widget.
pub trait Document: Send + Sync {
    type Container: Container + Clone + 'static;

    /// Attached elements carrying `class`, in document order.
    fn containers_with_class(&self, class: &str) -> Vec<Self::Container>;

    fn has_style(&self, id: &str) -> bool;

    fn append_style(&self, id: &str, css: &str);

    /// Appends the style block unless one with `id` exists. Returns whether
    /// this call appended it.
    fn ensure_style(&self, id: &str, css: &str) -> bool {
        if self.has_style(id) {
            return false;
        }
        self.append_style(id, css);
        true
    }

    fn is_ready(&self) -> bool;

    /// Runs `callback` once the document is ready; immediately if it already is.
    fn on_ready(&self, callback: Box<dyn FnOnce() + Send>);
}
