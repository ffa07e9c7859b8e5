//! Category hierarchy kept as an arena keyed by id.
//!
//! Parent and child links are ids, never owning pointers, so the tree can be
//! built from flat rows in any order and walked without borrow gymnastics.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;
use uuid::Uuid;

/// One row of the display list: name prefixed with `--` per depth level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FlatCategory {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    children: Vec<Uuid>,
}

#[derive(Debug, Default, Clone)]
pub struct CategoryTree {
    nodes: HashMap<Uuid, Node>,
    roots: Vec<Uuid>,
}

impl CategoryTree {
    /// Builds the forest from `(id, name, parent_id)` rows.
    ///
    /// Row order is sibling order. A row whose parent is not among the rows is
    /// treated as a root, and so is the first row of any parent cycle.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (Uuid, String, Option<Uuid>)>,
    {
        let rows: Vec<_> = rows.into_iter().collect();
        let mut nodes: HashMap<Uuid, Node> = rows
            .iter()
            .map(|(id, name, _)| {
                (
                    *id,
                    Node {
                        name: name.clone(),
                        children: Vec::new(),
                    },
                )
            })
            .collect();

        let mut roots = Vec::new();
        for (id, _, parent_id) in &rows {
            match parent_id {
                Some(parent) if *parent != *id && nodes.contains_key(parent) => {
                    if let Some(node) = nodes.get_mut(parent) {
                        node.children.push(*id);
                    }
                }
                _ => roots.push(*id),
            }
        }

        // rows caught in a parent cycle are unreachable from any root; the
        // first such row in a cycle becomes a root and its parent link is cut
        let mut reached = HashSet::with_capacity(nodes.len());
        for root in &roots {
            mark_reachable(&nodes, *root, &mut reached);
        }
        for (id, _, parent_id) in &rows {
            if reached.contains(id) {
                continue;
            }
            if let Some(parent) = parent_id.as_ref().and_then(|p| nodes.get_mut(p)) {
                parent.children.retain(|child| child != id);
            }
            roots.push(*id);
            mark_reachable(&nodes, *id, &mut reached);
        }

        Self { nodes, roots }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[Uuid] {
        &self.roots
    }

    pub fn children(&self, id: &Uuid) -> &[Uuid] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Depth-first pre-order listing of the whole forest.
    pub fn flatten(&self) -> Vec<FlatCategory> {
        let mut out = Vec::with_capacity(self.nodes.len());
        // explicit stack; children pushed reversed to keep sibling order
        let mut stack: Vec<(Uuid, usize)> = self.roots.iter().rev().map(|id| (*id, 0)).collect();

        while let Some((id, level)) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            out.push(FlatCategory {
                id,
                name: format!("{}{}", "--".repeat(level), node.name),
            });
            stack.extend(node.children.iter().rev().map(|child| (*child, level + 1)));
        }

        out
    }
}

fn mark_reachable(nodes: &HashMap<Uuid, Node>, start: Uuid, reached: &mut HashSet<Uuid>) {
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        if !reached.insert(id) {
            continue;
        }
        if let Some(node) = nodes.get(&id) {
            stack.extend(node.children.iter().copied());
        }
    }
}

/// Convenience over [`CategoryTree::from_rows`] followed by [`CategoryTree::flatten`].
pub fn flatten<I>(rows: I) -> Vec<FlatCategory>
where
    I: IntoIterator<Item = (Uuid, String, Option<Uuid>)>,
{
    CategoryTree::from_rows(rows).flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn empty_forest_flattens_to_nothing() {
        assert!(flatten(Vec::new()).is_empty());
    }

    #[test]
    fn root_with_two_children() {
        let rows = vec![
            (id(1), "Electronics".to_string(), None),
            (id(2), "Phones".to_string(), Some(id(1))),
            (id(3), "Laptops".to_string(), Some(id(1))),
        ];

        let flat = flatten(rows);
        let names: Vec<_> = flat.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Electronics", "--Phones", "--Laptops"]);
        assert_eq!(flat[0].id, id(1));
    }

    #[test]
    fn deep_tree_is_pre_order_with_sibling_order_kept() {
        // child rows appear before their parent to check order independence
        let rows = vec![
            (id(4), "Android".to_string(), Some(id(2))),
            (id(1), "Electronics".to_string(), None),
            (id(2), "Phones".to_string(), Some(id(1))),
            (id(5), "Books".to_string(), None),
            (id(3), "Laptops".to_string(), Some(id(1))),
        ];

        let names: Vec<_> = flatten(rows).into_iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec!["Electronics", "--Phones", "----Android", "--Laptops", "Books"]
        );
    }

    #[test]
    fn orphan_is_promoted_to_root() {
        let tree = CategoryTree::from_rows(vec![
            (id(1), "Lost".to_string(), Some(id(99))),
            (id(2), "Kept".to_string(), None),
        ]);
        assert_eq!(tree.roots(), &[id(1), id(2)]);
        assert!(tree.children(&id(1)).is_empty());
        assert_eq!(tree.flatten().len(), 2);
    }

    #[test]
    fn parent_cycle_is_broken_at_first_row() {
        let rows = vec![
            (id(1), "Root".to_string(), None),
            (id(2), "A".to_string(), Some(id(3))),
            (id(3), "B".to_string(), Some(id(2))),
            (id(4), "C".to_string(), Some(id(3))),
        ];

        let tree = CategoryTree::from_rows(rows);
        assert_eq!(tree.roots(), &[id(1), id(2)]);
        assert!(tree.children(&id(3)).iter().all(|child| *child != id(2)));

        let names: Vec<_> = tree.flatten().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Root", "A", "--B", "----C"]);
    }

    #[test]
    fn self_parent_does_not_loop() {
        let flat = flatten(vec![(id(1), "Loop".to_string(), Some(id(1)))]);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].name, "Loop");
    }
}
