//! Newick string writing for [Topology].

use crate::model::topology::Topology;
use crate::model::tree::VertexIndex;
use crate::model::vertex::BranchLength;

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Pending work while writing a subtree.
enum Step {
    /// Write the subtree rooted at the vertex
    Enter(VertexIndex),
    /// Write the separator between two children
    Comma,
    /// Close the parenthesis of the vertex and write its id and branch length
    Close(VertexIndex),
}

/// Returns the Newick representation of a topology with closing semicolon.
///
/// Leaves are written as their index, internal vertices (including the root)
/// carry their index as label after the closing parenthesis. Non-root
/// vertices with a branch length get a `:length` suffix.
///
/// # Example
/// ```
/// use phylo2vec::model::topology::Topology;
/// use phylo2vec::newick::write_newick;
///
/// let topology = Topology::from_ancestry(&[[1, 3, 4], [0, 2, 5], [5, 4, 6]]);
/// assert_eq!(write_newick(&topology), "((0,2)5,(1,3)4)6;");
/// ```
pub fn write_newick(topology: &Topology) -> String {
    // Helper for adding branch lengths
    fn push_branch_length(newick: &mut String, branch_length: Option<BranchLength>) {
        if let Some(branch_length) = branch_length {
            newick.push(':');
            newick.push_str(&branch_length.to_string());
        }
    }

    let mut newick = String::with_capacity(estimate_newick_len(topology));
    let mut stack = vec![Step::Enter(topology.root_index())];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(index) => match topology.children(index) {
                None => {
                    newick.push_str(&index.to_string());
                    push_branch_length(&mut newick, topology[index].branch_length());
                }
                Some((left, right)) => {
                    newick.push('(');
                    stack.push(Step::Close(index));
                    stack.push(Step::Enter(right));
                    stack.push(Step::Comma);
                    stack.push(Step::Enter(left));
                }
            },
            Step::Comma => newick.push(','),
            Step::Close(index) => {
                newick.push(')');
                newick.push_str(&index.to_string());
                push_branch_length(&mut newick, topology[index].branch_length());
            }
        }
    }

    newick.push(';');
    newick
}

/// Estimates the length of the Newick string of a topology.
///
/// Used to pre-allocate string capacity, accounting for structure,
/// vertex ids and branch lengths.
pub(crate) fn estimate_newick_len(topology: &Topology) -> usize {
    // Each internal node: "(,)" ~= 3 chars
    const INTERNAL_NODE_CHARS: usize = 3;
    // Branch lengths: ~20 chars each (e.g., ":0.009529961339106089")
    const BRANCH_LENGTH_CHARS: usize = 20;

    let num_vertices = topology.num_vertices();
    let num_internal = num_vertices - topology.num_leaves();

    let structure_capacity = num_internal * INTERNAL_NODE_CHARS;
    let label_capacity = calculate_index_digit_capacity(num_vertices);
    let branch_capacity = if topology.vertex(0).branch_length().is_some() {
        (num_vertices - 1) * BRANCH_LENGTH_CHARS
    } else {
        0
    };

    structure_capacity + label_capacity + branch_capacity + BUFFER_CHARS
}

/// Calculates the total number of characters needed to write all indices `0..count`.
///
/// # Examples
/// - 10 indices (0-9): 10 chars
/// - 14 indices (0-13): 10 + 2*4 = 18 chars
fn calculate_index_digit_capacity(count: usize) -> usize {
    let mut total = 0;
    let mut lower = 0;
    let mut upper = 10;
    let mut digits = 1;

    while lower < count {
        total += (count.min(upper) - lower) * digits;
        lower = upper;
        upper = upper.saturating_mul(10);
        digits += 1;
    }

    total
}


// ============================================================================
// Printing (pub)
// ============================================================================
impl Topology {
    /// Convenience method to convert this topology to a Newick string,
    /// see [write_newick].
    pub fn to_newick(&self) -> String {
        write_newick(self)
    }
}
