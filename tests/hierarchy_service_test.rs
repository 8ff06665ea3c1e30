//! Tests for HierarchyService against both storage engines

use std::collections::HashSet;
use std::sync::Arc;

use rstest::rstest;

use partytree::application::services::HierarchyService;
use partytree::application::ApplicationError;
use partytree::config::DanglingOwnerPolicy;
use partytree::domain::{NewParty, Party};
use partytree::infrastructure::{MemoryPartyStore, PartyStore, SqlitePartyStore};
use partytree::util::testing::init_test_setup;

#[derive(Debug, Clone, Copy)]
enum Backend {
    Memory,
    Sqlite,
}

fn service(backend: Backend, policy: DanglingOwnerPolicy) -> HierarchyService {
    init_test_setup();
    let store: Arc<dyn PartyStore> = match backend {
        Backend::Memory => Arc::new(MemoryPartyStore::new()),
        Backend::Sqlite => Arc::new(SqlitePartyStore::open_in_memory().expect("open sqlite")),
    };
    HierarchyService::new(store, policy)
}

/// Acme -> Beta -> Gamma
fn chain(service: &HierarchyService) -> (Party, Party, Party) {
    let a = service.create(NewParty::root("Acme")).unwrap();
    let b = service.create(NewParty::owned_by("Beta", &a.id)).unwrap();
    let c = service.create(NewParty::owned_by("Gamma", &b.id)).unwrap();
    (a, b, c)
}

fn ids(parties: &[Party]) -> Vec<&str> {
    parties.iter().map(|p| p.id.as_str()).collect()
}

fn id_set(parties: &[Party]) -> HashSet<&str> {
    parties.iter().map(|p| p.id.as_str()).collect()
}

#[rstest]
fn given_chain_when_created_then_paths_extend_owner_path(
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let service = service(backend, DanglingOwnerPolicy::Reject);
    let (a, b, c) = chain(&service);

    assert_eq!(a.path.as_str(), "");
    assert_eq!(a.owner_id, None);
    assert_eq!(b.path.as_str(), format!("/{}", a.id));
    assert_eq!(b.owner_id.as_deref(), Some(a.id.as_str()));
    assert_eq!(c.path.as_str(), format!("/{}/{}", a.id, b.id));
    assert_eq!(c.owner_id.as_deref(), Some(b.id.as_str()));
}

#[rstest]
fn given_chain_when_ancestors_then_root_first(
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let service = service(backend, DanglingOwnerPolicy::Reject);
    let (a, b, c) = chain(&service);

    let parents = service.ancestors(&c.id).unwrap();
    assert_eq!(ids(&parents), vec![a.id.as_str(), b.id.as_str()]);

    assert!(service.ancestors(&a.id).unwrap().is_empty());
}

#[rstest]
fn given_chain_when_descendants_then_all_levels_returned(
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let service = service(backend, DanglingOwnerPolicy::Reject);
    let (a, b, c) = chain(&service);
    let unrelated = service.create(NewParty::root("Other")).unwrap();

    let subs = service.descendants(&a.id).unwrap();
    assert_eq!(id_set(&subs), HashSet::from([b.id.as_str(), c.id.as_str()]));

    assert_eq!(ids(&service.descendants(&b.id).unwrap()), vec![c.id.as_str()]);
    assert!(service.descendants(&c.id).unwrap().is_empty());
    assert!(service.descendants(&unrelated.id).unwrap().is_empty());
}

#[rstest]
fn given_siblings_when_descendants_then_each_subtree_included(
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let service = service(backend, DanglingOwnerPolicy::Reject);
    let root = service.create(NewParty::root("Root")).unwrap();
    let left = service.create(NewParty::owned_by("Left", &root.id)).unwrap();
    let right = service.create(NewParty::owned_by("Right", &root.id)).unwrap();
    let leaf = service.create(NewParty::owned_by("Leaf", &right.id)).unwrap();

    let subs = service.descendants(&root.id).unwrap();
    assert_eq!(subs.len(), 3);
    assert_eq!(
        id_set(&subs),
        HashSet::from([left.id.as_str(), right.id.as_str(), leaf.id.as_str()])
    );
}

#[rstest]
fn given_middle_deleted_when_traversing_then_no_cascade(
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let service = service(backend, DanglingOwnerPolicy::Reject);
    let (a, b, c) = chain(&service);

    service.delete(&b.id).unwrap();

    // Gamma survives with its path unchanged
    let gamma = service.get(&c.id).unwrap();
    assert_eq!(gamma.path.as_str(), format!("/{}/{}", a.id, b.id));

    // The deleted ancestor is skipped
    assert_eq!(ids(&service.ancestors(&c.id).unwrap()), vec![a.id.as_str()]);

    // Subsidiaries of the deleted party are still found through its path segment
    assert_eq!(ids(&service.descendants(&b.id).unwrap()), vec![c.id.as_str()]);
    assert!(matches!(
        service.get(&b.id),
        Err(ApplicationError::NotFound(_))
    ));
}

#[rstest]
fn given_unknown_owner_and_reject_policy_when_create_then_dangling_owner(
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let service = service(backend, DanglingOwnerPolicy::Reject);

    let err = service
        .create(NewParty::owned_by("Orphan", "no-such-owner"))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::DanglingOwner(ref id) if id == "no-such-owner"));
    assert_eq!(service.count().unwrap(), 0, "nothing written on rejection");
}

#[rstest]
fn given_unknown_owner_and_allow_policy_when_create_then_empty_path(
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let service = service(backend, DanglingOwnerPolicy::Allow);

    let orphan = service
        .create(NewParty::owned_by("Orphan", "no-such-owner"))
        .unwrap();

    assert_eq!(orphan.owner_id.as_deref(), Some("no-such-owner"));
    assert_eq!(orphan.path.as_str(), "");
    assert!(service.ancestors(&orphan.id).unwrap().is_empty());
}

#[rstest]
fn given_empty_owner_id_when_create_then_treated_as_root(
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let service = service(backend, DanglingOwnerPolicy::Reject);

    let party = service.create(NewParty::owned_by("Blank", "")).unwrap();

    assert!(party.is_root());
    assert_eq!(party.path.as_str(), "");
}

#[rstest]
fn given_unknown_id_when_get_or_ancestors_then_not_found(
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let service = service(backend, DanglingOwnerPolicy::Reject);

    assert!(matches!(
        service.get("missing"),
        Err(ApplicationError::NotFound(_))
    ));
    assert!(matches!(
        service.ancestors("missing"),
        Err(ApplicationError::NotFound(_))
    ));
    assert!(service.descendants("missing").unwrap().is_empty());
}

#[rstest]
fn given_ids_sharing_prefix_when_descendants_then_segment_match_only(
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let service = service(backend, DanglingOwnerPolicy::Reject);
    let (a, _, _) = chain(&service);

    // A prefix of a real id is not itself an ancestor of anything
    let prefix = &a.id[..8];
    assert!(service.descendants(prefix).unwrap().is_empty());
}

#[rstest]
fn given_forest_when_built_then_matches_owner_links(
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let service = service(backend, DanglingOwnerPolicy::Reject);
    let (a, b, c) = chain(&service);
    let other = service.create(NewParty::root("Other")).unwrap();

    let forest = service.forest().unwrap();

    assert_eq!(forest.len(), 2);
    let acme = forest.iter().find(|t| t.party.id == a.id).unwrap();
    assert_eq!(acme.size(), 3);
    assert_eq!(acme.depth(), 3);
    assert_eq!(acme.children[0].party.id, b.id);
    assert_eq!(acme.children[0].children[0].party.id, c.id);
    assert!(forest.iter().any(|t| t.party.id == other.id && t.children.is_empty()));
}

#[rstest]
fn given_parties_when_listed_then_every_path_matches_owner(
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let service = service(backend, DanglingOwnerPolicy::Reject);
    chain(&service);
    let root = service.create(NewParty::root("Second")).unwrap();
    service.create(NewParty::owned_by("Child", &root.id)).unwrap();

    let all = service.list().unwrap();
    assert_eq!(all.len(), 5);
    for party in &all {
        match &party.owner_id {
            None => assert!(party.path.is_root(), "{party:?}"),
            Some(owner_id) => {
                let owner = service.get(owner_id).unwrap();
                assert_eq!(party.path, owner.child_path(), "{party:?}");
            }
        }
    }
}
