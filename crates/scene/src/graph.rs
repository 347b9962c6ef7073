use glam::Mat4;
use skyway_common::Transform;
use thiserror::Error;

/// A scene node: a name, an optional parent, and a transform relative to
/// that parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub parent: Option<usize>,
    pub local: Transform,
}

/// Errors raised by scene graph mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// The requested parent index does not name an existing node.
    #[error("parent index {parent} out of range ({len} nodes)")]
    ParentOutOfRange { parent: usize, len: usize },
}

/// Insertion-ordered scene graph.
///
/// Parents must exist before their children are added, which keeps the
/// graph acyclic and lets [`SceneGraph::world_transforms`] resolve every
/// node in one forward pass.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node without a parent and returns its index.
    pub fn add_root(&mut self, name: impl Into<String>, local: Transform) -> usize {
        self.insert(name.into(), None, local)
    }

    /// Adds a child of `parent` and returns its index.
    pub fn add_child(
        &mut self,
        name: impl Into<String>,
        parent: usize,
        local: Transform,
    ) -> Result<usize, SceneError> {
        if parent >= self.nodes.len() {
            return Err(SceneError::ParentOutOfRange {
                parent,
                len: self.nodes.len(),
            });
        }
        Ok(self.insert(name.into(), Some(parent), local))
    }

    fn insert(&mut self, name: String, parent: Option<usize>, local: Transform) -> usize {
        let index = self.nodes.len();
        tracing::trace!(index, ?parent, name = %name, "node added");
        self.nodes.push(Node {
            name,
            parent,
            local,
        });
        index
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Replaces a node's local transform. Returns false if the index is out
    /// of range.
    pub fn set_local(&mut self, index: usize, local: Transform) -> bool {
        match self.nodes.get_mut(index) {
            Some(node) => {
                node.local = local;
                true
            }
            None => false,
        }
    }

    /// World matrix of one node, composed up the parent chain.
    pub fn world_transform(&self, index: usize) -> Option<Mat4> {
        let mut node = self.nodes.get(index)?;
        let mut world = node.local.to_matrix();
        while let Some(parent) = node.parent {
            node = &self.nodes[parent];
            world = node.local.to_matrix() * world;
        }
        Some(world)
    }

    /// World matrices for every node, resolved in one forward pass.
    ///
    /// Parents precede children in the node list, so each parent's world
    /// matrix is already computed when its children are reached.
    pub fn world_transforms(&self) -> Vec<Mat4> {
        let mut out: Vec<Mat4> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let local = node.local.to_matrix();
            let world = match node.parent {
                Some(parent) => out[parent] * local,
                None => local,
            };
            out.push(world);
        }
        out
    }
}
