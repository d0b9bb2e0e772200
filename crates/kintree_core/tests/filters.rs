use kintree_core::{Gender, GraphStore, MemberDraft, MemberFilter, MemberId};
use std::collections::HashSet;

fn populate(store: &mut GraphStore) {
    let people = [
        ("Arthur Hale", Gender::Male, 1),
        ("Margaret Hale", Gender::Female, 1),
        ("Nathan Hale", Gender::Male, 2),
        ("Ruth Hale", Gender::Female, 2),
        ("Nathaniel Brooks", Gender::Male, 2),
        ("Edith Brooks", Gender::Female, 3),
    ];
    for (name, gender, generation) in people {
        let mut draft = MemberDraft::new(name, gender);
        draft.generation = Some(generation);
        store.create(draft);
    }
}

fn ids(members: Vec<kintree_core::Member>) -> HashSet<MemberId> {
    members.into_iter().map(|member| member.id).collect()
}

#[test]
fn combined_filter_equals_intersection_of_single_criteria() {
    let mut store = GraphStore::new();
    populate(&mut store);

    let combined = MemberFilter {
        search: Some("nath".to_string()),
        generation: Some(2),
        gender: Some(Gender::Male),
    };

    let by_search = ids(store.list(&MemberFilter {
        search: combined.search.clone(),
        ..MemberFilter::default()
    }));
    let by_generation = ids(store.list(&MemberFilter {
        generation: combined.generation,
        ..MemberFilter::default()
    }));
    let by_gender = ids(store.list(&MemberFilter {
        gender: combined.gender,
        ..MemberFilter::default()
    }));

    let expected: HashSet<_> = by_search
        .intersection(&by_generation)
        .copied()
        .collect::<HashSet<_>>()
        .intersection(&by_gender)
        .copied()
        .collect();

    assert_eq!(ids(store.list(&combined)), expected);
    assert_eq!(expected.len(), 2); // Nathan Hale, Nathaniel Brooks
}

#[test]
fn search_matches_substring_anywhere_in_name() {
    let mut store = GraphStore::new();
    populate(&mut store);

    let hits = store.list(&MemberFilter {
        search: Some("BROOKS".to_string()),
        ..MemberFilter::default()
    });
    assert_eq!(hits.len(), 2);
}

#[test]
fn generation_filter_is_exact() {
    let mut store = GraphStore::new();
    populate(&mut store);

    let hits = store.list(&MemberFilter {
        generation: Some(3),
        ..MemberFilter::default()
    });
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Edith Brooks");
}

#[test]
fn filtering_does_not_mutate_the_store() {
    let mut store = GraphStore::new();
    populate(&mut store);
    let before = store.members().to_vec();

    store.list(&MemberFilter {
        search: Some("hale".to_string()),
        generation: Some(1),
        gender: Some(Gender::Female),
    });

    assert_eq!(store.members(), before.as_slice());
}
