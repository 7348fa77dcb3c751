use kernel::id::Id;

pub struct PrincipalMarker;
pub type PrincipalId = Id<PrincipalMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_id_new() {
        let principal_id = PrincipalId::new();
        let uuid = principal_id.as_uuid();
        assert_eq!(uuid.get_version_num(), 4); // UUIDv4
    }

    #[test]
    fn test_from_uuid() {
        let uuid = uuid::Uuid::new_v4();
        let principal_id = PrincipalId::from_uuid(uuid);
        assert_eq!(principal_id.as_uuid(), &uuid);
    }

    #[test]
    fn test_principal_id_is_copyable() {
        // The entity derives Clone, so the id must clone even though
        // the marker itself implements nothing.
        let principal_id = PrincipalId::new();
        let copied = principal_id;
        assert_eq!(principal_id, copied);
    }
}
