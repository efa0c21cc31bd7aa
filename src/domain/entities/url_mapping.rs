//! URL mapping entity: the persisted alias → target URL association.

/// A stored mapping between a short alias and its target URL.
///
/// Mappings are immutable once created: there is no operation that changes
/// the alias or the target of an existing row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlMapping {
    pub id: i64,
    pub alias: String,
    pub url: String,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(id: i64, alias: String, url: String) -> Self {
        Self { id, alias, url }
    }
}
