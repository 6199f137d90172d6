//! Pet type lookup entity.

/// A kind of animal ("cat", "dog", ...).
///
/// Reference data shared by many pets; the owner aggregate never changes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PetType {
    pub id: i64,
    pub name: String,
}

impl PetType {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
