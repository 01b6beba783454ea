#![allow(dead_code)]

use autofill_detection::{InputKind, Node};

pub const APP: &str = "com.example.app";
pub const KEYCHAIN: &str = "org.sufficientlysecure.keychain";
pub const CHROME: &str = "com.android.chrome";

/// root -> [login_user (text), login_pass (password)]
pub fn login_tree() -> Node {
    Node::container(
        "root",
        vec![
            Node::input("child0", InputKind::Text).with_id_name("login_user"),
            Node::input("child1", InputKind::Password).with_id_name("login_pass"),
        ],
    )
}

/// root -> [a (password), b (password)]
pub fn change_password_tree() -> Node {
    Node::container(
        "root",
        vec![
            Node::input("a", InputKind::Password),
            Node::input("b", InputKind::Password),
        ],
    )
}

/// Linear chain `n0 -> n1 -> ... -> n{depth}`.
pub fn chain(depth: usize) -> Node {
    let mut node = Node::container(format!("n{}", depth), vec![]);
    for i in (0..depth).rev() {
        node = Node::container(format!("n{}", i), vec![node]);
    }
    node
}

/// `root -> x -> root`: a child repeats its ancestor's address.
pub fn cyclic_tree() -> Node {
    Node::container(
        "root",
        vec![Node::container(
            "x",
            vec![
                Node::input("pw", InputKind::Password),
                Node::container("root", vec![]),
            ],
        )],
    )
}
