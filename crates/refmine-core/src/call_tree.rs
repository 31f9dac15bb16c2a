//! Invocation-chain trees for extract and inline detection.
//!
//! When a newly added operation is called from an existing one, the detector
//! follows the calls the added operation makes in turn, building a tree of
//! invocations rooted at the first call. Before a callee is attached it is
//! checked against its would-be siblings and against every ancestor: a callee
//! already present there is already accounted for and is not expanded again.
//! This is what keeps generation finite on recursive call graphs.
//!
//! # Representation
//!
//! Nodes live in an arena owned by [`CallTree`]; [`NodeId`] indexes into it.
//! The parent link is an index, so there are no reference cycles. The root is
//! supplied at construction and is always the first node, which makes a
//! rootless tree unrepresentable.
//!
//! A [`NodeId`] is only meaningful for the tree that issued it (and clones of
//! that tree). Each id carries its tree's identity, so an id from another tree
//! is reported as foreign even when its index happens to be in range.
//!
//! Trees are built through `&mut self` and queried through `&self`, so a tree
//! cannot be read while it is still being extended.

use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{MinerError, MinerResult};
use crate::model::{OperationInvocation, UmlOperation};

// ============================================================================
// Node Types
// ============================================================================

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

/// Index of a node within the [`CallTree`] that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    tree: u64,
    index: usize,
}

impl NodeId {
    /// Position of the node in attachment order; the root is 0.
    pub fn index(self) -> usize {
        self.index
    }
}

/// One call in the invocation chain.
///
/// Equality and hashing cover the calling operation, the invoked operation
/// and the invocation. Tree links are ignored, so a detached root can be used
/// to look up a previously generated tree.
#[derive(Debug, Clone)]
pub struct CallTreeNode {
    original_operation: Arc<UmlOperation>,
    invoked_operation: Arc<UmlOperation>,
    invocation: OperationInvocation,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl CallTreeNode {
    /// Create a detached node for `invocation` of `invoked_operation` made by
    /// `original_operation`.
    pub fn new(
        original_operation: Arc<UmlOperation>,
        invoked_operation: Arc<UmlOperation>,
        invocation: OperationInvocation,
    ) -> Self {
        CallTreeNode {
            original_operation,
            invoked_operation,
            invocation,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Operation containing the call.
    pub fn original_operation(&self) -> &UmlOperation {
        &self.original_operation
    }

    /// Operation being called.
    pub fn invoked_operation(&self) -> &UmlOperation {
        &self.invoked_operation
    }

    pub fn invocation(&self) -> &OperationInvocation {
        &self.invocation
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl PartialEq for CallTreeNode {
    fn eq(&self, other: &Self) -> bool {
        self.original_operation == other.original_operation
            && self.invoked_operation == other.invoked_operation
            && self.invocation == other.invocation
    }
}

impl Eq for CallTreeNode {}

impl Hash for CallTreeNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.original_operation.hash(state);
        self.invoked_operation.hash(state);
        self.invocation.hash(state);
    }
}

// ============================================================================
// Callee Discovery
// ============================================================================

/// Supplies the calls an operation makes to operations of interest.
///
/// For extract detection these are the operations added in the after
/// snapshot; for inline detection, the removed ones. Matching an invocation to
/// an operation is the resolver's concern.
pub trait InvocationResolver {
    /// Calls made by `caller`, each paired with the operation it resolves to,
    /// in the order they should be attached.
    fn resolve_calls(&self, caller: &UmlOperation) -> Vec<(OperationInvocation, Arc<UmlOperation>)>;
}

// ============================================================================
// CallTree
// ============================================================================

/// Single-rooted tree of calls.
///
/// Clones keep the identity of the original, so ids issued before the clone
/// stay valid on both copies.
#[derive(Debug, Clone)]
pub struct CallTree {
    id: u64,
    nodes: Vec<CallTreeNode>,
}

impl CallTree {
    /// Create a tree holding only `root`.
    pub fn new(mut root: CallTreeNode) -> Self {
        root.parent = None;
        root.children.clear();
        CallTree {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            nodes: vec![root],
        }
    }

    /// Id of the root node.
    pub fn root_id(&self) -> NodeId {
        self.node_id(0)
    }

    fn node_id(&self, index: usize) -> NodeId {
        NodeId {
            tree: self.id,
            index,
        }
    }

    /// Arena slot of `id`, or `None` when the id was issued by another tree.
    fn slot(&self, id: NodeId) -> Option<usize> {
        (id.tree == self.id && id.index < self.nodes.len()).then_some(id.index)
    }

    /// Build the tree reachable from `root` by following resolved calls.
    ///
    /// A callee is attached under a node only when it is not already invoked
    /// by one of that node's children or by the node or any of its ancestors;
    /// attached callees are expanded depth-first in resolver order.
    pub fn generate(root: CallTreeNode, resolver: &dyn InvocationResolver) -> Self {
        let mut tree = CallTree::new(root);
        let root = tree.root_id();
        tree.expand(root, resolver);
        tracing::debug!(
            root = %tree.root().invoked_operation,
            nodes = tree.len(),
            "call tree generated"
        );
        tree
    }

    fn expand(&mut self, parent: NodeId, resolver: &dyn InvocationResolver) {
        let caller = Arc::clone(&self.nodes[parent.index].invoked_operation);
        for (invocation, callee) in resolver.resolve_calls(&caller) {
            if self.contains_in_path_to_root_or_sibling(parent, &callee) {
                tracing::trace!(
                    caller = %caller,
                    callee = %callee,
                    "call already accounted for"
                );
                continue;
            }
            let node = CallTreeNode::new(Arc::clone(&caller), callee, invocation);
            let id = self.attach(parent, node);
            self.expand(id, resolver);
        }
    }

    fn attach(&mut self, parent: NodeId, mut node: CallTreeNode) -> NodeId {
        let id = self.node_id(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.index].children.push(id);
        id
    }

    /// Append `node` as the last child of `parent`.
    ///
    /// Fails with `InvalidNode` when `parent` was issued by another tree.
    pub fn add_child(&mut self, parent: NodeId, node: CallTreeNode) -> MinerResult<NodeId> {
        if self.slot(parent).is_none() {
            return Err(MinerError::InvalidNode {
                index: parent.index,
            });
        }
        Ok(self.attach(parent, node))
    }

    pub fn root(&self) -> &CallTreeNode {
        &self.nodes[0]
    }

    /// Node by id, or `None` for an id from another tree.
    pub fn node(&self, id: NodeId) -> Option<&CallTreeNode> {
        self.slot(id).map(|index| &self.nodes[index])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; the root is always present.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `id` followed by each ancestor up to and including the root.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.node(id).map(|_| id);
        while let Some(node_id) = current {
            path.push(node_id);
            current = self.parent(node_id);
        }
        path
    }

    /// All nodes, root first, in breadth-first order.
    ///
    /// Children are visited in attachment order. Nothing is cached, so
    /// repeated calls on an unchanged tree return identical sequences.
    pub fn breadth_first_order(&self) -> Vec<&CallTreeNode> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::new();
        order.push(self.root());
        queue.push_back(self.root_id());
        while let Some(id) = queue.pop_front() {
            for &child in self.children(id) {
                if let Some(node) = self.node(child) {
                    order.push(node);
                    queue.push_back(child);
                }
            }
        }
        order
    }

    /// Check whether `invoked` is already called by a child of `parent`, or by
    /// `parent` itself or any of its ancestors.
    ///
    /// Operations compare by declared signature.
    pub fn contains_in_path_to_root_or_sibling(&self, parent: NodeId, invoked: &UmlOperation) -> bool {
        let sibling = self
            .children(parent)
            .iter()
            .filter_map(|&child| self.node(child))
            .any(|node| *node.invoked_operation == *invoked);
        if sibling {
            return true;
        }
        self.path_to_root(parent)
            .into_iter()
            .filter_map(|id| self.node(id))
            .any(|node| *node.invoked_operation == *invoked)
    }
}

// ============================================================================
// Cache
// ============================================================================

/// Generated trees keyed by their root call.
///
/// The same added operation is often reached through the same call from
/// several candidate mappings; the tree for that call is generated once.
#[derive(Debug, Default)]
pub struct CallTreeCache {
    trees: HashMap<CallTreeNode, CallTree>,
}

impl CallTreeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree rooted at `root`, generating it on first request.
    pub fn get_or_generate(&mut self, root: CallTreeNode, resolver: &dyn InvocationResolver) -> &CallTree {
        self.trees
            .entry(root)
            .or_insert_with_key(|root| CallTree::generate(root.clone(), resolver))
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
