use std::collections::BTreeMap;
use std::{fs, path::Path};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use finnrick_core::dom::{MemoryContainer, MemoryDocument};

/// Host page as described on disk.
///
/// ```json
/// {
///   "containers": [
///     { "class": "finnrick-rating", "attributes": { "data-product-id": "product-1" } }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct PageSpec {
    #[serde(default)]
    pub containers: Vec<ContainerSpec>,
}

#[derive(Debug, Deserialize)]
pub struct ContainerSpec {
    /// Space-separated class list.
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl PageSpec {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read page: {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("invalid page: {}", path.display()))
    }

    /// Builds a document that has already finished loading.
    ///
    /// Fails if any attribute name could not appear in HTML markup.
    pub fn build(&self) -> Result<MemoryDocument> {
        let doc = MemoryDocument::ready();

        for spec in &self.containers {
            for name in spec.attributes.keys() {
                ensure!(is_attribute_name(name), "invalid attribute name: {name:?}");
            }
            let classes: Vec<&str> = spec.class.split_whitespace().collect();
            let container = spec
                .attributes
                .iter()
                .fold(MemoryContainer::new(&classes), |c, (name, value)| {
                    c.with_attribute(name, value)
                });
            doc.append(container);
        }
        Ok(doc)
    }
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_attribute_name_char)
}

fn is_attribute_name_char(c: char) -> bool {
    !c.is_whitespace() && !c.is_control() && !matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
}
