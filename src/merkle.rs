use std::fmt;

use log::{debug, trace};

use crate::content::Content;
use crate::error::{Error, Result};
use crate::hash::{Algorithm, Digest, Md5};
use crate::proof::{Direction, Proof};

/// Index of a node inside its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the tree's node array.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Node, root, or leaf of a [`MerkleTree`].
///
/// Links are [`NodeId`]s into the owning tree. Every node is stored
/// exactly once, so an interior node owns its two children and the
/// `parent` link is only a way back up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    hash: Digest,
    parent: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
    leaf: bool,
    dup: bool,
    content: Option<usize>,
}

impl Node {
    fn leaf(id: NodeId, hash: Digest, content: usize) -> Node {
        Node {
            id,
            hash,
            parent: None,
            children: None,
            leaf: true,
            dup: false,
            content: Some(content),
        }
    }

    fn interior(id: NodeId, hash: Digest, left: NodeId, right: NodeId) -> Node {
        Node {
            id,
            hash,
            parent: None,
            children: Some((left, right)),
            leaf: false,
            dup: false,
            content: None,
        }
    }

    /// A fresh copy of `self` used to pad an odd level. Children are not
    /// copied, the original node keeps them.
    fn duplicate(&self, id: NodeId) -> Node {
        Node {
            id,
            hash: self.hash.clone(),
            parent: None,
            children: None,
            leaf: self.leaf,
            dup: true,
            content: self.content,
        }
    }

    /// This node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Digest of the node.
    pub fn hash(&self) -> &Digest {
        &self.hash
    }

    /// Parent id, `None` for the root.
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent
    }

    /// Left child id, `None` for leaves and pads.
    ///
    /// Interior pads are not leaves yet have no children: the node they
    /// copy keeps its own.
    pub fn left_id(&self) -> Option<NodeId> {
        self.children.map(|(l, _)| l)
    }

    /// Right child id, `None` for leaves and pads, interior pads included.
    pub fn right_id(&self) -> Option<NodeId> {
        self.children.map(|(_, r)| r)
    }

    /// `true` for nodes created from content, including leaf pads.
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// `true` for nodes synthesized to make a level even.
    pub fn is_duplicate(&self) -> bool {
        self.dup
    }

    /// `true` for the single node without a parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Merkle Tree.
///
/// A merkle tree is a tree in which every non-leaf node is the hash of its
/// children nodes. A diagram depicting how it works:
///
/// ```text
///         root = h1234 = h(h12 + h34)
///        /                           \
///  h12 = h(h1 + h2)            h34 = h(h3 + h4)
///   /            \              /            \
/// h1 = d(c1)   h2 = d(c2)     h3 = d(c3)   h4 = d(c4)
/// ```
///
/// Leaf digests `d(c)` come from [`Content::digest`], interior digests from
/// the tree's [`Algorithm`].
///
/// The number of inputs is not always a power of two. Whenever a level has
/// an odd number of nodes its last node is duplicated, so the last interior
/// node of that level is the hash of a node concatenated with itself.
/// Duplicates are distinct nodes flagged with [`Node::is_duplicate`].
///
/// In memory layout, levels follow one another bottom-up:
///
/// ```text
///     [c1 c2 c3 c3' | h12 h33' | root]
/// ```
///
/// The tree is immutable once built.
#[derive(Debug, Clone)]
pub struct MerkleTree<C, A = Md5> {
    nodes: Vec<Node>,
    leaves: Vec<NodeId>,
    root: NodeId,
    root_digest: Digest,
    height: usize,
    contents: Vec<C>,
    algorithm: A,
}

impl<C: Content, A: Algorithm> MerkleTree<C, A> {
    /// Creates new merkle tree from a list of content using `A::default()`.
    pub fn new<I: IntoIterator<Item = C>>(contents: I) -> Result<MerkleTree<C, A>> {
        Self::with_algorithm(contents, A::default())
    }

    /// Creates new merkle tree from a list of content, composing interior
    /// nodes with `algorithm`.
    ///
    /// Fails with [`Error::EmptyInput`] for an empty list and with
    /// [`Error::Digest`] as soon as any digest can't be computed. No
    /// partial tree is returned.
    pub fn with_algorithm<I: IntoIterator<Item = C>>(
        contents: I,
        mut algorithm: A,
    ) -> Result<MerkleTree<C, A>> {
        let contents: Vec<C> = contents.into_iter().collect();
        if contents.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut nodes: Vec<Node> = Vec::with_capacity(2 * contents.len() + 2);
        let mut level: Vec<NodeId> = Vec::with_capacity(contents.len() + 1);

        for (i, c) in contents.iter().enumerate() {
            let hash = c.digest().map_err(Error::digest)?;
            let id = NodeId(nodes.len());
            nodes.push(Node::leaf(id, hash, i));
            level.push(id);
        }
        pad_level(&mut nodes, &mut level);
        let leaves = level.clone();

        let mut height = 1;
        while level.len() > 1 {
            pad_level(&mut nodes, &mut level);
            trace!("reducing level {} of {} nodes", height - 1, level.len());

            let mut next = Vec::with_capacity(level.len() / 2);
            for pair in level.chunks(2) {
                let (left, right) = (pair[0], pair[1]);
                let hash = algorithm.node(&nodes[left.0].hash, &nodes[right.0].hash)?;

                let id = NodeId(nodes.len());
                nodes.push(Node::interior(id, hash, left, right));
                nodes[left.0].parent = Some(id);
                nodes[right.0].parent = Some(id);
                next.push(id);
            }

            level = next;
            height += 1;
        }

        let root = level[0];
        let root_digest = nodes[root.0].hash.clone();
        debug!(
            "built merkle tree: {} contents, {} leaves, {} nodes, height {}, root {}",
            contents.len(),
            leaves.len(),
            nodes.len(),
            height,
            root_digest
        );

        Ok(MerkleTree {
            nodes,
            leaves,
            root,
            root_digest,
            height,
            contents,
            algorithm,
        })
    }

    /// Returns the merkle path for `target`: sibling digests and directions
    /// from its leaf up to the root.
    ///
    /// Leaves are scanned in order and the first one whose content
    /// [`equals`] the target is used. `Ok(None)` means no leaf matched,
    /// which is not an error. A failing equality check aborts the scan
    /// with [`Error::Equality`].
    ///
    /// [`equals`]: Content::equals
    pub fn merkle_path(&self, target: &C) -> Result<Option<Proof>> {
        for &id in &self.leaves {
            let leaf = &self.nodes[id.0];
            let content = match self.content(leaf) {
                Some(c) => c,
                None => continue,
            };
            if !content.equals(target).map_err(Error::equality)? {
                continue;
            }

            let steps = self.height - 1;
            let mut siblings = Vec::with_capacity(steps);
            let mut directions = Vec::with_capacity(steps);

            let mut current = leaf;
            while let Some(parent) = self.parent(current) {
                let (left, right) = match parent.children {
                    Some(children) => children,
                    None => break,
                };
                if self.nodes[left.0].hash == current.hash {
                    siblings.push(self.nodes[right.0].hash.clone());
                    directions.push(Direction::Right);
                } else {
                    siblings.push(self.nodes[left.0].hash.clone());
                    directions.push(Direction::Left);
                }
                current = parent;
            }

            trace!("merkle path for leaf {}: {} steps", id.0, siblings.len());
            return Ok(Some(Proof::new(siblings, directions)));
        }

        trace!("merkle path: content not found in {} leaves", self.leaves.len());
        Ok(None)
    }
}

impl<C, A> MerkleTree<C, A> {
    /// Returns merkle root
    pub fn root_digest(&self) -> &Digest {
        &self.root_digest
    }

    /// Returns the root node.
    pub fn root(&self) -> &Node {
        &self.nodes[self.root.0]
    }

    /// Iterates leaf nodes in insertion order, duplicate pad included.
    pub fn leaves(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.leaves.iter().map(move |id| &self.nodes[id.0])
    }

    /// Returns the leaf at position `i`.
    pub fn leaf(&self, i: usize) -> Option<&Node> {
        self.leaves.get(i).map(|id| &self.nodes[id.0])
    }

    /// Returns number of leaves, always even.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Returns number of nodes in the tree, pads included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns height of the tree, counting the leaf and root levels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Returns all nodes, level by level from the leaves up.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Parent of `node`, `None` for the root.
    pub fn parent(&self, node: &Node) -> Option<&Node> {
        node.parent.map(|id| &self.nodes[id.0])
    }

    /// Left child of `node`, `None` for leaves and pads.
    pub fn left(&self, node: &Node) -> Option<&Node> {
        node.left_id().map(|id| &self.nodes[id.0])
    }

    /// Right child of `node`, `None` for leaves and pads.
    pub fn right(&self, node: &Node) -> Option<&Node> {
        node.right_id().map(|id| &self.nodes[id.0])
    }

    /// Content a leaf was built from. Pads share the content of the leaf
    /// they copy.
    pub fn content(&self, node: &Node) -> Option<&C> {
        node.content.and_then(|i| self.contents.get(i))
    }

    /// Content items in input order, without pads.
    pub fn contents(&self) -> &[C] {
        &self.contents
    }

    /// Algorithm used for interior nodes.
    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }
}

/// Leaf dump, one line per leaf: `leaf dup hash content`.
impl<C: fmt::Display, A> fmt::Display for MerkleTree<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for leaf in self.leaves() {
            write!(f, "{} {} {}", leaf.leaf, leaf.dup, leaf.hash)?;
            if let Some(c) = self.content(leaf) {
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Duplicates the last node of an odd level into a fresh pad node.
fn pad_level(nodes: &mut Vec<Node>, level: &mut Vec<NodeId>) {
    if level.len() & 1 == 0 {
        return;
    }
    if let Some(&last) = level.last() {
        let id = NodeId(nodes.len());
        let pad = nodes[last.0].duplicate(id);
        nodes.push(pad);
        level.push(id);
    }
}
