//! Domain entities: core data structures

use serde::{Deserialize, Serialize};

use crate::domain::path::MaterializedPath;

/// A node in the owner/subsidiary tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    /// Generated at creation, immutable
    pub id: String,
    /// Display name
    pub name: String,
    /// Owning party; `None` for roots
    pub owner_id: Option<String>,
    /// Ancestor chain, snapshotted from the owner at creation
    pub path: MaterializedPath,
}

impl Party {
    /// A party without owner.
    pub fn is_root(&self) -> bool {
        self.owner_id.is_none()
    }

    /// The path any subsidiary of this party receives.
    pub fn child_path(&self) -> MaterializedPath {
        MaterializedPath::child_of(&self.path, &self.id)
    }

    /// Ancestor ids parsed from the path, root first.
    pub fn ancestor_ids(&self) -> Vec<&str> {
        self.path.segments().collect()
    }

    /// Whether `ancestor_id` is somewhere in this party's lineage.
    pub fn descends_from(&self, ancestor_id: &str) -> bool {
        self.path.contains_segment(ancestor_id)
    }
}

/// Input for creating a party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParty {
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl NewParty {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_id: None,
        }
    }

    pub fn owned_by(name: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_id: Some(owner_id.into()),
        }
    }

    /// Requested owner; an empty id counts as no owner.
    pub fn owner(&self) -> Option<&str> {
        self.owner_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// A party with its subsidiaries, assembled in memory for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyTree {
    pub party: Party,
    pub children: Vec<PartyTree>,
}

impl PartyTree {
    pub fn leaf(party: Party) -> Self {
        Self {
            party,
            children: Vec::new(),
        }
    }

    /// Number of parties in this tree, including the root.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(PartyTree::size).sum::<usize>()
    }

    /// Number of levels, a lone party has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(PartyTree::depth)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(id: &str, owner: Option<&str>, path: &str) -> Party {
        Party {
            id: id.to_string(),
            name: format!("party {id}"),
            owner_id: owner.map(str::to_string),
            path: MaterializedPath::parse(path).unwrap(),
        }
    }

    #[test]
    fn given_party_when_serialized_then_uses_camel_case_and_null_owner() {
        let root = party("a", None, "");
        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "a", "name": "party a", "ownerId": null, "path": ""})
        );
    }

    #[test]
    fn given_owned_party_then_child_path_extends_lineage() {
        let b = party("b", Some("a"), "/a");
        assert_eq!(b.child_path().as_str(), "/a/b");
        assert_eq!(b.ancestor_ids(), vec!["a"]);
        assert!(b.descends_from("a"));
        assert!(!b.descends_from("b"));
    }

    #[test]
    fn given_new_party_json_without_owner_then_owner_is_none() {
        let input: NewParty = serde_json::from_str(r#"{"name": "Acme"}"#).unwrap();
        assert_eq!(input, NewParty::root("Acme"));
    }

    #[test]
    fn given_empty_owner_id_then_treated_as_absent() {
        let input = NewParty::owned_by("Acme", "");
        assert_eq!(input.owner(), None);
    }

    #[test]
    fn given_nested_tree_then_size_and_depth() {
        let tree = PartyTree {
            party: party("a", None, ""),
            children: vec![
                PartyTree {
                    party: party("b", Some("a"), "/a"),
                    children: vec![PartyTree::leaf(party("c", Some("b"), "/a/b"))],
                },
                PartyTree::leaf(party("d", Some("a"), "/a")),
            ],
        };
        assert_eq!(tree.size(), 4);
        assert_eq!(tree.depth(), 3);
    }
}
