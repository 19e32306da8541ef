use proptest::prelude::*;
use stockledger_api::entities::shipment_batch::BatchStatus;
use stockledger_api::services::batches::{derive_status, ReviewerSlot};
use stockledger_api::services::labels::label_checksum;

fn slot_strategy() -> impl Strategy<Value = ReviewerSlot> {
    (any::<bool>(), any::<bool>()).prop_map(|(assigned, approved)| ReviewerSlot {
        assigned,
        // An unassigned seat carries no decision.
        approved: assigned && approved,
    })
}

proptest! {
    #[test]
    fn checksum_is_deterministic(fnsku in ".{0,40}", upc in ".{0,40}") {
        prop_assert_eq!(label_checksum(&fnsku, &upc), label_checksum(&fnsku, &upc));
    }

    #[test]
    fn checksum_is_sensitive_to_fnsku(fnsku in "[a-zA-Z0-9]{1,20}", upc in "[a-zA-Z0-9]{0,20}", suffix in "[a-zA-Z0-9]{1,5}") {
        let changed = format!("{}{}", fnsku, suffix);
        prop_assert_ne!(label_checksum(&fnsku, &upc), label_checksum(&changed, &upc));
    }

    #[test]
    fn checksum_is_fixed_width_hex(fnsku in ".{0,40}", upc in ".{0,40}") {
        let checksum = label_checksum(&fnsku, &upc);
        prop_assert_eq!(checksum.len(), 64);
        prop_assert!(checksum.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn status_approved_iff_both_seats_approved(slot1 in slot_strategy(), slot2 in slot_strategy()) {
        let status = derive_status(slot1, slot2);
        let both_approved = slot1.assigned && slot1.approved && slot2.assigned && slot2.approved;
        prop_assert_eq!(status == BatchStatus::Approved, both_approved);
    }

    #[test]
    fn status_rejected_iff_any_seat_rejected(slot1 in slot_strategy(), slot2 in slot_strategy()) {
        let status = derive_status(slot1, slot2);
        let any_rejection = (slot1.assigned && !slot1.approved) || (slot2.assigned && !slot2.approved);
        prop_assert_eq!(status == BatchStatus::Rejected, any_rejection);
    }

    #[test]
    fn status_is_symmetric_in_the_two_seats(slot1 in slot_strategy(), slot2 in slot_strategy()) {
        prop_assert_eq!(derive_status(slot1, slot2), derive_status(slot2, slot1));
    }
}

#[test]
fn empty_seats_mean_pending() {
    assert_eq!(
        derive_status(ReviewerSlot::empty(), ReviewerSlot::empty()),
        BatchStatus::Pending
    );
}
