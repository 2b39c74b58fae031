use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::dom::{Container, Document};
use crate::rating::fetch::RatingFetcher;
use crate::render::assets::WIDGET_STYLES;
use crate::widget::controller::{WidgetState, init_widget};
use crate::{MARKER_CLASS, PROCESSED_ATTR, STYLE_ID};

/// Finds unprocessed widget containers and starts one task per container.
#[derive(Clone)]
pub struct PageScanner {
    fetcher: RatingFetcher,
    runtime: Handle,
}

impl PageScanner {
    pub fn new(fetcher: RatingFetcher, runtime: Handle) -> Self {
        Self { fetcher, runtime }
    }

    /// Injects the shared styles and initializes every container not yet
    /// claimed by an earlier scan.
    ///
    /// Tasks are started but not awaited; the returned handles may be joined
    /// or dropped. Completion order is unspecified.
    pub fn auto_init<D: Document>(&self, document: &D) -> Vec<JoinHandle<WidgetState>> {
        if document.ensure_style(STYLE_ID, WIDGET_STYLES) {
            debug!("injected widget styles");
        }

        let handles: Vec<_> = document
            .containers_with_class(MARKER_CLASS)
            .into_iter()
            .filter(|container| container.try_mark(PROCESSED_ATTR))
            .map(|container| self.spawn_init(container))
            .collect();

        info!(started = handles.len(), "scanned page for rating widgets");
        handles
    }

    /// Starts a task for `container` regardless of its processed marker.
    pub fn spawn_init<C: Container + 'static>(&self, container: C) -> JoinHandle<WidgetState> {
        let fetcher = self.fetcher.clone();
        self.runtime
            .spawn(async move { init_widget(&container, &fetcher).await })
    }
}
