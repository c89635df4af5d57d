//! Canonicalization of a closed function subtree (tag-tree path)

use super::tag_tree::{NodeId, StructuralTree};
use crate::features::fingerprint::domain::{Abstraction, FUNC_CALL, FUNC_NAME, VAR};

const NAME_TAG: &str = "name";
const TYPE_TAG: &str = "type";
const CALL_TAG: &str = "call";
const FUNCTION_TAG: &str = "function";

/// Pre-order walk over `function`'s subtree.
///
/// `name` leaves are abstracted by their nearest non-`name` ancestor:
/// `type` keeps the text, `call` becomes `funccall`, `function` becomes
/// `funcname` and records the name, anything else becomes `var`. All other
/// leaves are kept verbatim.
pub fn canonicalize_subtree(tree: &StructuralTree, function: NodeId) -> Abstraction {
    let mut abstraction = Abstraction::new();

    for id in tree.preorder(function) {
        let node = tree.node(id);
        let Some(text) = node.text.as_deref().filter(|t| !t.is_empty()) else {
            continue;
        };

        if node.tag != NAME_TAG {
            abstraction.push(text);
            continue;
        }

        match tree.nearest_ancestor_tag_except(id, NAME_TAG) {
            Some(TYPE_TAG) => abstraction.push(text),
            Some(CALL_TAG) => abstraction.push(FUNC_CALL),
            Some(FUNCTION_TAG) => {
                abstraction.set_function_name(text);
                abstraction.push(FUNC_NAME);
            }
            _ => abstraction.push(VAR),
        }
    }

    abstraction
}
