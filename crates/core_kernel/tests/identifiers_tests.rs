//! Comprehensive unit tests for the Identifiers module
//!
//! Tests cover identifier creation, parsing, conversion, and display
//! formatting.

use core_kernel::{
    AccountId, EntryId, GenerationId, JournalId, LineId, TemplateId, TenantId, TicketId,
};
use uuid::Uuid;

mod creation {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = EntryId::new();
        let id2 = EntryId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = EntryId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = EntryId::new_v7();
        assert!(id1.as_uuid() < id2.as_uuid());
    }

    #[test]
    fn test_from_uuid_round_trips() {
        let uuid = Uuid::new_v4();
        let id = AccountId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }
}

mod display {
    use super::*;

    #[test]
    fn test_display_uses_type_prefix() {
        assert!(TenantId::new().to_string().starts_with("TNT-"));
        assert!(AccountId::new().to_string().starts_with("ACC-"));
        assert!(JournalId::new().to_string().starts_with("JRN-"));
        assert!(EntryId::new().to_string().starts_with("ENT-"));
        assert!(LineId::new().to_string().starts_with("LIN-"));
        assert!(TicketId::new().to_string().starts_with("TKT-"));
        assert!(TemplateId::new().to_string().starts_with("TPL-"));
        assert!(GenerationId::new().to_string().starts_with("GEN-"));
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_prefixed_form() {
        let original = TemplateId::new();
        let parsed: TemplateId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_parse_bare_uuid() {
        let uuid = Uuid::new_v4();
        let parsed: TenantId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<EntryId>().is_err());
    }
}

mod conversion {
    use super::*;

    #[test]
    fn test_ids_convert_through_uuid_explicitly() {
        // Different id types never compare directly; converting through the
        // underlying UUID is the only bridge
        let uuid = Uuid::new_v4();
        let tenant: TenantId = uuid.into();
        let account: AccountId = uuid.into();
        assert_eq!(Uuid::from(tenant), Uuid::from(account));
    }
}
