//! Forest builder: assembles stored parties into owner/subsidiary trees.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::domain::entities::{Party, PartyTree};

/// Constructs in-memory trees from a flat list of parties.
///
/// Roots are parties without owner and parties whose owner no longer
/// resolves, so subtrees under a deleted party stay visible.
pub struct ForestBuilder {
    parties: BTreeMap<String, Party>,
    children: HashMap<String, Vec<String>>,
}

impl ForestBuilder {
    pub fn new(parties: impl IntoIterator<Item = Party>) -> Self {
        let parties: BTreeMap<String, Party> =
            parties.into_iter().map(|p| (p.id.clone(), p)).collect();

        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        for party in parties.values() {
            if let Some(owner) = party.owner_id.as_deref() {
                if owner != party.id && parties.contains_key(owner) {
                    children
                        .entry(owner.to_string())
                        .or_default()
                        .push(party.id.clone());
                }
            }
        }

        let mut builder = Self { parties, children };
        builder.sort_children();
        builder
    }

    /// Build all trees, ordered by root name.
    pub fn build(&self) -> Vec<PartyTree> {
        let mut visited = HashSet::new();
        let mut trees = Vec::new();

        for root in self.sorted(self.find_roots()) {
            if let Some(tree) = self.build_tree(&root, &mut visited) {
                trees.push(tree);
            }
        }

        // Owner chains that never reach a root (only possible with hand-edited data)
        let stranded: Vec<String> = self
            .parties
            .keys()
            .filter(|id| !visited.contains(*id))
            .cloned()
            .collect();
        for id in self.sorted(stranded) {
            if let Some(tree) = self.build_tree(&id, &mut visited) {
                trees.push(tree);
            }
        }

        trees
    }

    fn find_roots(&self) -> Vec<String> {
        self.parties
            .values()
            .filter(|p| match p.owner_id.as_deref() {
                None => true,
                Some(owner) => !self.parties.contains_key(owner),
            })
            .map(|p| p.id.clone())
            .collect()
    }

    fn build_tree(&self, id: &str, visited: &mut HashSet<String>) -> Option<PartyTree> {
        if !visited.insert(id.to_string()) {
            return None;
        }
        let party = self.parties.get(id)?.clone();
        let children = self
            .children
            .get(id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|child| self.build_tree(child, visited))
                    .collect()
            })
            .unwrap_or_default();
        Some(PartyTree { party, children })
    }

    fn sort_children(&mut self) {
        let parties = &self.parties;
        for ids in self.children.values_mut() {
            ids.sort_by(|a, b| sort_key(parties, a).cmp(&sort_key(parties, b)));
        }
    }

    fn sorted(&self, mut ids: Vec<String>) -> Vec<String> {
        ids.sort_by(|a, b| sort_key(&self.parties, a).cmp(&sort_key(&self.parties, b)));
        ids
    }
}

fn sort_key<'a>(parties: &'a BTreeMap<String, Party>, id: &'a str) -> (&'a str, &'a str) {
    let name = parties.get(id).map(|p| p.name.as_str()).unwrap_or_default();
    (name, id)
}
