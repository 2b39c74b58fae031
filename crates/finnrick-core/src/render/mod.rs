pub mod assets;
pub mod card;
pub mod markup;

pub use card::{render, render_load_failed, render_loading, render_missing_product_id};
