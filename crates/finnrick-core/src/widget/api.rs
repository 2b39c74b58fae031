use std::sync::{Arc, Weak};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::WIDGET_VERSION;
use crate::dom::Document;
use crate::rating::fetch::RatingFetcher;
use crate::widget::controller::WidgetState;
use crate::widget::scanner::PageScanner;

/// Entry point a host page talks to: `version`, `init`, `refresh`.
pub struct FinnrickWidget<D: Document> {
    document: Arc<D>,
    scanner: PageScanner,
}

impl<D: Document + 'static> FinnrickWidget<D> {
    pub fn new(document: Arc<D>, scanner: PageScanner) -> Self {
        Self { document, scanner }
    }

    /// Creates the entry point and schedules the first scan for when the
    /// document becomes ready (immediately if it already is).
    ///
    /// The document holds the pending callback, so the callback only keeps a
    /// weak handle to the widget. A widget dropped before the ready
    /// notification never scans.
    pub fn install(document: Arc<D>, fetcher: RatingFetcher, runtime: Handle) -> Arc<Self> {
        let widget = Arc::new(Self::new(document, PageScanner::new(fetcher, runtime)));
        let on_ready: Weak<Self> = Arc::downgrade(&widget);
        widget.document.on_ready(Box::new(move || {
            if let Some(widget) = on_ready.upgrade() {
                widget.refresh();
            }
        }));
        widget
    }

    pub fn version(&self) -> &'static str {
        WIDGET_VERSION
    }

    /// Re-runs the lifecycle for one container, ignoring its processed marker.
    pub fn init(&self, container: D::Container) -> JoinHandle<WidgetState> {
        self.scanner.spawn_init(container)
    }

    /// Picks up containers added since the last scan. Safe to call repeatedly.
    pub fn refresh(&self) -> Vec<JoinHandle<WidgetState>> {
        self.scanner.auto_init(self.document.as_ref())
    }
}
