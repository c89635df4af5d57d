//! Arena tree for the structural tag parser
//!
//! Nodes are addressed by index and hold their parent's index. Nodes are
//! appended in document order, so once an element closes its subtree is
//! exactly the arena suffix that starts at the element.

pub type NodeId = usize;

const ROOT_TAG: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralNode {
    pub tag: String,
    pub attributes: String,
    /// Literal text (text leaves only)
    pub text: Option<String>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    /// Source line the node was opened on
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct StructuralTree {
    nodes: Vec<StructuralNode>,
}

impl StructuralTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![StructuralNode {
                tag: ROOT_TAG.to_string(),
                attributes: String::new(),
                text: None,
                children: Vec::new(),
                parent: None,
                line: 0,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn node(&self, id: NodeId) -> &StructuralNode {
        &self.nodes[id]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn add_element(
        &mut self,
        parent: NodeId,
        tag: impl Into<String>,
        attributes: impl Into<String>,
        line: u32,
    ) -> NodeId {
        self.push(StructuralNode {
            tag: tag.into(),
            attributes: attributes.into(),
            text: None,
            children: Vec::new(),
            parent: Some(parent),
            line,
        })
    }

    /// Text leaf carrying the tag of the element it sits in
    pub fn add_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        let tag = self.nodes[parent].tag.clone();
        let line = self.nodes[parent].line;
        self.add_leaf(parent, tag, text, line)
    }

    pub fn add_leaf(
        &mut self,
        parent: NodeId,
        tag: impl Into<String>,
        text: impl Into<String>,
        line: u32,
    ) -> NodeId {
        self.push(StructuralNode {
            tag: tag.into(),
            attributes: String::new(),
            text: Some(text.into()),
            children: Vec::new(),
            parent: Some(parent),
            line,
        })
    }

    /// Unlink `id` from its parent and drop its subtree
    pub fn detach(&mut self, id: NodeId) {
        if id == self.root() {
            return;
        }
        if let Some(parent) = self.nodes[id].parent {
            self.nodes[parent].children.retain(|&child| child != id);
        }
        self.nodes.truncate(id);
    }

    /// Drop everything but an empty root
    pub fn reset(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0].children.clear();
    }

    /// Pre-order ids of the subtree rooted at `id`
    pub fn preorder(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            order.push(next);
            stack.extend(self.nodes[next].children.iter().rev());
        }
        order
    }

    /// Tag of the closest ancestor of `id` whose tag is not `skip`
    pub fn nearest_ancestor_tag_except(&self, id: NodeId, skip: &str) -> Option<&str> {
        let mut cursor = self.nodes[id].parent;
        while let Some(ancestor) = cursor {
            let node = &self.nodes[ancestor];
            if node.tag != skip {
                return Some(node.tag.as_str());
            }
            cursor = node.parent;
        }
        None
    }

    fn push(&mut self, node: StructuralNode) -> NodeId {
        let id = self.nodes.len();
        if let Some(parent) = node.parent {
            self.nodes[parent].children.push(id);
        }
        self.nodes.push(node);
        id
    }
}

impl Default for StructuralTree {
    fn default() -> Self {
        Self::new()
    }
}
