use kintree_core::{Gender, GraphStore, MemberDraft, MemberId};
use uuid::Uuid;

/// Asserts the central store invariant: every in-store spouse link is
/// reciprocated by its target.
fn assert_symmetric(store: &GraphStore) {
    for member in store.members() {
        if let Some(partner_id) = member.spouse_id {
            if let Some(partner) = store.get(partner_id) {
                assert_eq!(
                    partner.spouse_id,
                    Some(member.id),
                    "{} points at {} but is not pointed back",
                    member.name,
                    partner.name
                );
            }
        }
    }
}

fn draft_with_spouse(name: &str, gender: Gender, spouse: MemberId) -> MemberDraft {
    let mut draft = MemberDraft::new(name, gender);
    draft.spouse_id = Some(spouse);
    draft
}

#[test]
fn create_with_spouse_links_both_directions() {
    let mut store = GraphStore::new();

    let a = store.create(MemberDraft::new("Arthur", Gender::Male));
    let b = store.create(draft_with_spouse("Margaret", Gender::Female, a.id));

    assert_eq!(store.get(a.id).unwrap().spouse_id, Some(b.id));
    assert_eq!(store.get(b.id).unwrap().spouse_id, Some(a.id));
    assert_symmetric(&store);
}

#[test]
fn create_against_paired_target_drops_the_link() {
    let mut store = GraphStore::new();

    let a = store.create(MemberDraft::new("Arthur", Gender::Male));
    let b = store.create(draft_with_spouse("Margaret", Gender::Female, a.id));

    // The original pairing must survive; the newcomer stays unlinked.
    let intruder = store.create(draft_with_spouse("Edith", Gender::Female, a.id));

    assert_eq!(intruder.spouse_id, None);
    assert_eq!(store.get(a.id).unwrap().spouse_id, Some(b.id));
    assert_eq!(store.get(b.id).unwrap().spouse_id, Some(a.id));
    assert_symmetric(&store);
}

#[test]
fn create_with_dangling_spouse_reference_is_kept_as_written() {
    let mut store = GraphStore::new();

    let ghost = Uuid::new_v4();
    let member = store.create(draft_with_spouse("Arthur", Gender::Male, ghost));

    assert_eq!(member.spouse_id, Some(ghost));
    assert_symmetric(&store);
}

#[test]
fn update_relink_clears_previous_partner() {
    let mut store = GraphStore::new();

    let a = store.create(MemberDraft::new("Arthur", Gender::Male));
    let b = store.create(draft_with_spouse("Margaret", Gender::Female, a.id));
    let c = store.create(MemberDraft::new("Edith", Gender::Female));

    store
        .update(a.id, draft_with_spouse("Arthur", Gender::Male, c.id))
        .unwrap();

    assert_eq!(store.get(a.id).unwrap().spouse_id, Some(c.id));
    assert_eq!(store.get(c.id).unwrap().spouse_id, Some(a.id));
    assert_eq!(store.get(b.id).unwrap().spouse_id, None);
    assert_symmetric(&store);
}

#[test]
fn update_unlink_clears_both_sides() {
    let mut store = GraphStore::new();

    let a = store.create(MemberDraft::new("Arthur", Gender::Male));
    let b = store.create(draft_with_spouse("Margaret", Gender::Female, a.id));

    store
        .update(a.id, MemberDraft::new("Arthur", Gender::Male))
        .unwrap();

    assert_eq!(store.get(a.id).unwrap().spouse_id, None);
    assert_eq!(store.get(b.id).unwrap().spouse_id, None);
    assert_symmetric(&store);
}

#[test]
fn update_keeping_same_partner_is_stable() {
    let mut store = GraphStore::new();

    let a = store.create(MemberDraft::new("Arthur", Gender::Male));
    let b = store.create(draft_with_spouse("Margaret", Gender::Female, a.id));

    store
        .update(b.id, draft_with_spouse("Margaret Hale", Gender::Female, a.id))
        .unwrap();

    assert_eq!(store.get(a.id).unwrap().spouse_id, Some(b.id));
    assert_eq!(store.get(b.id).unwrap().spouse_id, Some(a.id));
    assert_symmetric(&store);
}

#[test]
fn update_relink_to_paired_target_is_rejected() {
    let mut store = GraphStore::new();

    let a = store.create(MemberDraft::new("Arthur", Gender::Male));
    let b = store.create(draft_with_spouse("Margaret", Gender::Female, a.id));
    let c = store.create(MemberDraft::new("Henry", Gender::Male));

    // C tries to claim B, who is already paired with A.
    let updated = store
        .update(c.id, draft_with_spouse("Henry", Gender::Male, b.id))
        .unwrap();

    assert_eq!(updated.spouse_id, None);
    assert_eq!(store.get(a.id).unwrap().spouse_id, Some(b.id));
    assert_eq!(store.get(b.id).unwrap().spouse_id, Some(a.id));
    assert_symmetric(&store);
}

#[test]
fn self_spouse_reference_is_dropped() {
    let mut store = GraphStore::new();

    let a = store.create(MemberDraft::new("Arthur", Gender::Male));
    let updated = store
        .update(a.id, draft_with_spouse("Arthur", Gender::Male, a.id))
        .unwrap();

    assert_eq!(updated.spouse_id, None);
    assert_symmetric(&store);
}

#[test]
fn symmetry_holds_across_mixed_mutation_sequence() {
    let mut store = GraphStore::new();

    let a = store.create(MemberDraft::new("Arthur", Gender::Male));
    let b = store.create(draft_with_spouse("Margaret", Gender::Female, a.id));
    let c = store.create(MemberDraft::new("Edith", Gender::Female));
    let d = store.create(draft_with_spouse("Henry", Gender::Male, c.id));
    assert_symmetric(&store);

    // A walks away from B toward C; C is still paired with D, so the new
    // link is rejected and A ends up unpaired.
    store
        .update(a.id, draft_with_spouse("Arthur", Gender::Male, c.id))
        .unwrap();
    assert_symmetric(&store);
    assert_eq!(store.get(a.id).unwrap().spouse_id, None);
    assert_eq!(store.get(b.id).unwrap().spouse_id, None);
    assert_eq!(store.get(c.id).unwrap().spouse_id, Some(d.id));

    // Removing D frees C; the retry succeeds.
    store.delete(d.id).unwrap();
    assert_symmetric(&store);
    assert_eq!(store.get(c.id).unwrap().spouse_id, None);

    store
        .update(a.id, draft_with_spouse("Arthur", Gender::Male, c.id))
        .unwrap();
    assert_symmetric(&store);
    assert_eq!(store.get(c.id).unwrap().spouse_id, Some(a.id));
    assert_eq!(store.len(), 3);
}
