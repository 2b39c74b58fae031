use serde::{Deserialize, Serialize};

/// Key into the remote catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogId(pub u32);

impl CatalogId {
    /// Used for every identifier the alias table does not know.
    pub const DEFAULT: CatalogId = CatalogId(1);
}

impl std::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-facing product identifiers and the catalog entry each maps to.
const PRODUCT_ALIASES: &[(&str, CatalogId)] = &[
    ("product-1", CatalogId(1)),
    ("product-2", CatalogId(2)),
    ("product-3", CatalogId(3)),
    ("semaglutide-001", CatalogId(1)),
    ("tirzepatide-002", CatalogId(2)),
    ("peptide-mix-003", CatalogId(3)),
];

/// Maps a product identifier onto its catalog identifier.
///
/// Total: unknown and absent identifiers resolve to [`CatalogId::DEFAULT`].
pub fn resolve(product_id: Option<&str>) -> CatalogId {
    product_id
        .and_then(|id| {
            PRODUCT_ALIASES
                .iter()
                .find(|(alias, _)| *alias == id)
                .map(|(_, catalog_id)| *catalog_id)
        })
        .unwrap_or(CatalogId::DEFAULT)
}

/// The alias table, in declaration order.
pub fn known_products() -> &'static [(&'static str, CatalogId)] {
    PRODUCT_ALIASES
}
