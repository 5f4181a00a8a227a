//! Hierarchical sitemap construction from flat page lists.
//!
//! Sub-example pages arrive as flat slash-separated ids. The builder turns
//! them into a [`PageNode`] tree, creating intermediate folder nodes on
//! demand and preserving first-insertion order among siblings.

use pageforge_types::PageNode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Duplicate page path '{0}'")]
    DuplicatePath(String),
}

/// A page to be placed into the tree, addressed by its slash-separated id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatPage {
    /// Slash-separated location, e.g. `src/card/examples`.
    pub id: String,
    pub page_path: String,
    pub isolated_path: Option<String>,
}

struct ArenaNode {
    id: String,
    children: Vec<usize>,
    leaf: Option<(String, Option<String>)>,
}

/// Build a [`PageNode`] forest from flat pages.
///
/// In strict mode a second page landing on an occupied path, or a leaf
/// colliding with an existing folder, is a [`TreeError::DuplicatePath`]. In
/// lenient mode a page landing on an occupied path replaces it, dropping any
/// children under it; a page whose id nests beneath an existing leaf is
/// dropped from the tree and the earlier leaf stays.
pub fn build_tree(pages: &[FlatPage], strict: bool) -> Result<Vec<PageNode>, TreeError> {
    let mut arena: Vec<ArenaNode> = Vec::new();
    let mut index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    let mut roots: Vec<usize> = Vec::new();

    for page in pages {
        let segments: Vec<&str> = page.id.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            continue;
        }

        let mut full_path = String::new();
        let mut parent: Option<usize> = None;

        for (depth, segment) in segments.iter().enumerate() {
            if !full_path.is_empty() {
                full_path.push('/');
            }
            full_path.push_str(segment);
            let is_leaf = depth == segments.len() - 1;

            let node = match index.get(&full_path) {
                Some(&existing) => existing,
                None => {
                    let node = arena.len();
                    arena.push(ArenaNode {
                        id: (*segment).to_string(),
                        children: Vec::new(),
                        leaf: None,
                    });
                    index.insert(full_path.clone(), node);
                    match parent {
                        Some(parent) => arena[parent].children.push(node),
                        None => roots.push(node),
                    }
                    node
                }
            };

            if is_leaf {
                let occupied = arena[node].leaf.is_some() || !arena[node].children.is_empty();
                if occupied && strict {
                    return Err(TreeError::DuplicatePath(full_path));
                }
                arena[node].children.clear();
                arena[node].leaf = Some((page.page_path.clone(), page.isolated_path.clone()));
            } else if strict && arena[node].leaf.is_some() {
                // A folder segment cannot pass through an existing leaf.
                return Err(TreeError::DuplicatePath(full_path));
            }

            parent = Some(node);
        }
    }

    Ok(roots.iter().map(|&root| materialize(&arena, root)).collect())
}

fn materialize(arena: &[ArenaNode], node: usize) -> PageNode {
    let entry = &arena[node];

    match &entry.leaf {
        Some((page_path, isolated_path)) => {
            let mut page = PageNode::leaf(&entry.id, page_path);
            if let Some(isolated) = isolated_path {
                page = page.with_isolated_path(isolated);
            }
            page
        }
        None => PageNode::folder(&entry.id).with_children(
            entry
                .children
                .iter()
                .map(|&child| materialize(arena, child))
                .collect(),
        ),
    }
}
