//! Node predicates used by the status probe

use crate::domain::document::DomNode;

pub const INPUT_TAG: &str = "input";
pub const PASSWORD_INPUT_TYPE: &str = "password";

/// Password field of a login form: `<input type="password" name="...">`.
///
/// `type` must be exactly `password`; `name` only has to be present, an empty
/// value still counts.
pub fn is_login_password_input<N: DomNode>(node: &N) -> bool {
    if !node.is_element() || node.tag_name() != Some(INPUT_TAG) {
        return false;
    }
    if node.attribute("type") != Some(PASSWORD_INPUT_TYPE) {
        return false;
    }
    node.has_attribute("name")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::DocumentTree;
    use rstest::rstest;

    #[rstest]
    #[case::named_password("input", &[("type", "password"), ("name", "pwd")], true)]
    #[case::empty_name("input", &[("type", "password"), ("name", "")], true)]
    #[case::name_before_type("input", &[("name", "pwd"), ("type", "password")], true)]
    #[case::missing_name("input", &[("type", "password")], false)]
    #[case::text_input("input", &[("type", "text"), ("name", "login")], false)]
    #[case::missing_type("input", &[("name", "pwd")], false)]
    #[case::type_not_exact("input", &[("type", "Password"), ("name", "pwd")], false)]
    #[case::type_with_spaces("input", &[("type", " password"), ("name", "pwd")], false)]
    #[case::other_tag("textarea", &[("type", "password"), ("name", "pwd")], false)]
    #[case::duplicate_type_first_wins("input", &[("type", "text"), ("type", "password"), ("name", "pwd")], false)]
    fn test_login_password_input(
        #[case] tag: &str,
        #[case] attributes: &[(&str, &str)],
        #[case] expected: bool,
    ) {
        let mut tree = DocumentTree::document();
        let root = tree.root_id();
        let id = tree.append_element(root, tag, attributes);
        assert_eq!(is_login_password_input(&tree.node(id)), expected);
    }

    #[test]
    fn test_non_element_nodes_never_match() {
        let mut tree = DocumentTree::document();
        let root = tree.root_id();
        let text = tree.append_text(root, "input");
        assert!(!is_login_password_input(&tree.root()));
        assert!(!is_login_password_input(&tree.node(text)));
    }
}
