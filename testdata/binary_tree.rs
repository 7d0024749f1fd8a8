use std::collections::VecDeque;

/// A node of a binary search tree.
struct TreeNode {
    value: i32,
    left: Option<Box<TreeNode>>,
    right: Option<Box<TreeNode>>,
}

fn insert(root: &mut Option<Box<TreeNode>>, value: i32) {
    match root {
        None => *root = Some(Box::new(TreeNode { value, left: None, right: None })),
        Some(node) => {
            if value < node.value {
                insert(&mut node.left, value);
            } else {
                insert(&mut node.right, value);
            }
        }
    }
}

fn level_order(root: &Option<Box<TreeNode>>) -> Vec<i32> {
    let mut out = Vec::new();
    let mut pending = VecDeque::new();
    if let Some(node) = root {
        pending.push_back(node);
    }
    while let Some(node) = pending.pop_front() {
        out.push(node.value);
        if let Some(left) = &node.left {
            pending.push_back(left);
        }
        if let Some(right) = &node.right {
            pending.push_back(right);
        }
    }
    out
}

fn main() {
    let mut root = None;
    for v in [5, 3, 8] {
        insert(&mut root, v);
    }
    println!("{:?}", level_order(&root));
}
