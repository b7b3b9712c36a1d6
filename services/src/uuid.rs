use uuid::Uuid;

/// Deterministic UUIDv5 from an arbitrary string id.
///
/// Used for vector-store point ids so that re-ingesting the same player
/// overwrites the previous point instead of duplicating it.
pub fn stable_uuid(id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, id.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_input_same_uuid() {
        assert_eq!(stable_uuid("Nuwan Perera"), stable_uuid("Nuwan Perera"));
    }

    #[test]
    fn different_inputs_differ() {
        assert_ne!(stable_uuid("Nuwan Perera"), stable_uuid("Kusal Silva"));
    }
}
