//! Per-container widget lifecycle.
//!
//!   Uninitialized ──(no product id)──────────────▶ Error
//!        │
//!        ▼
//!     Loading ──(record rendered)──▶ Rendered
//!        │
//!        └────(unexpected failure)──▶ Error
//!
//! Transport failures never reach this module: the fetcher absorbs them into
//! the fallback record, which renders normally.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::dom::Container;
use crate::error::WidgetError;
use crate::rating::fetch::RatingFetcher;
use crate::rating::record::RatingRecord;
use crate::render::{render, render_load_failed, render_loading, render_missing_product_id};
use crate::{PRODUCT_ID_ATTR, STATE_ATTR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetState {
    Uninitialized,
    Loading,
    Rendered,
    Error,
}

impl WidgetState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetState::Uninitialized => "uninitialized",
            WidgetState::Loading => "loading",
            WidgetState::Rendered => "rendered",
            WidgetState::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WidgetState::Rendered | WidgetState::Error)
    }
}

impl std::fmt::Display for WidgetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drives one container from its current content to a terminal state.
///
/// Never fails: every path ends in a rendered card, the missing-id message,
/// or the generic failure message.
pub async fn init_widget<C: Container>(container: &C, fetcher: &RatingFetcher) -> WidgetState {
    let product_id = container
        .attribute(PRODUCT_ID_ATTR)
        .filter(|id| !id.is_empty());

    let Some(product_id) = product_id else {
        let html = render_missing_product_id().unwrap_or_default();
        return settle(container, WidgetState::Error, html);
    };

    enter(container, WidgetState::Loading);
    if let Ok(html) = render_loading() {
        container.set_inner_html(html);
    }

    match load_card(fetcher, product_id).await {
        Ok(html) => settle(container, WidgetState::Rendered, html),
        Err(err) => {
            error!(error = %err, "finnrick widget failed");
            let html = render_load_failed().unwrap_or_default();
            settle(container, WidgetState::Error, html)
        }
    }
}

async fn load_card(fetcher: &RatingFetcher, product_id: String) -> Result<String, WidgetError> {
    let fetcher = fetcher.clone();
    let record: RatingRecord =
        tokio::spawn(async move { fetcher.fetch_rating(Some(&product_id)).await })
            .await
            .map_err(|e| WidgetError::Task(e.to_string()))?;
    render(&record)
}

fn enter<C: Container>(container: &C, state: WidgetState) {
    container.set_attribute(STATE_ATTR, state.as_str());
}

fn settle<C: Container>(container: &C, state: WidgetState, html: String) -> WidgetState {
    container.set_inner_html(html);
    enter(container, state);
    state
}
