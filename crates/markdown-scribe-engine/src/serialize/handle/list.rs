use crate::ast::{List, Node};
use crate::error::SerializeError;
use crate::serialize::{Construct, Info, State};

pub fn list(
    node: &Node,
    list: &List,
    parent: Option<&Node>,
    state: &mut State,
    info: &Info<'_>,
) -> Result<String, SerializeError> {
    let settings = &state.settings;
    let (mut bullet, other, other_configured) = if list.ordered {
        (
            settings.check_bullet_ordered()?,
            settings.check_bullet_ordered_other()?,
            settings.bullet_ordered_other.is_some(),
        )
    } else {
        (
            settings.check_bullet()?,
            settings.check_bullet_other()?,
            settings.bullet_other.is_some(),
        )
    };

    let mut state = state.enter(Construct::List);
    let bullet_current = state.bullet_current;

    // Sibling lists with the same marker would merge.
    let mut use_other =
        parent.is_some() && other_configured && state.bullet_last_used == Some(bullet);

    if !list.ordered {
        // `* * *` or `- - -` made of empty nested first items is a rule.
        let first_item_empty = list
            .children
            .first()
            .is_some_and(|item| item.children().is_empty());
        if matches!(bullet, '*' | '-') && first_item_empty && is_nested_first_item(&state) {
            use_other = true;
        }

        // So is an item holding only a rule drawn with the bullet character.
        let starts_with_rule = list.children.iter().any(|item| {
            matches!(item, Node::ListItem(_))
                && matches!(item.children().first(), Some(Node::ThematicBreak))
        });
        if starts_with_rule && state.settings.check_rule()? == bullet {
            use_other = true;
        }
    }

    if use_other {
        bullet = other;
    }

    state.bullet_current = Some(bullet);
    let value = state.container_flow(node, info.position)?;
    state.bullet_last_used = Some(bullet);
    state.bullet_current = bullet_current;
    Ok(value)
}

/// Whether the list just entered is the first child of a first item of a
/// list that is itself the first child of a first item.
fn is_nested_first_item(state: &State) -> bool {
    let stack = state.stack();
    let indexes = state.index_stack();
    stack.ends_with(&[
        Construct::ListItem,
        Construct::List,
        Construct::ListItem,
        Construct::List,
    ]) && indexes.len() >= 3
        && indexes[indexes.len() - 3..].iter().all(|&index| index == 0)
}

#[cfg(test)]
mod tests {
    use crate::ast::{List, ListItem, Node};
    use crate::options::Settings;
    use crate::serialize::{render, render_with};
    use pretty_assertions::assert_eq;

    fn list(ordered: bool, items: Vec<Node>) -> Node {
        Node::List(List {
            ordered,
            children: items,
            ..List::default()
        })
    }

    fn item(text: &str) -> Node {
        Node::list_item(vec![Node::paragraph(vec![Node::text(text)])])
    }

    #[test]
    fn tight_unordered_list() {
        let tree = list(false, vec![item("a"), item("b")]);
        assert_eq!(render(&tree), "*   a\n*   b\n");
    }

    #[test]
    fn spread_list_has_blank_lines() {
        let tree = Node::List(List {
            spread: true,
            children: vec![item("a"), item("b")],
            ..List::default()
        });
        assert_eq!(render(&tree), "*   a\n\n*   b\n");
    }

    #[test]
    fn bullet_from_settings() {
        let settings = Settings {
            bullet: Some('-'),
            ..Settings::default()
        };
        assert_eq!(render_with(&list(false, vec![item("a")]), settings), "-   a\n");
    }

    #[test]
    fn adjacent_lists_are_interrupted() {
        let tree = Node::root(vec![list(false, vec![item("a")]), list(false, vec![item("b")])]);
        assert_eq!(render(&tree), "*   a\n\n<!---->\n\n*   b\n");
    }

    #[test]
    fn adjacent_lists_alternate_a_configured_other_bullet() {
        let settings = Settings {
            bullet_other: Some('+'),
            ..Settings::default()
        };
        let tree = Node::root(vec![
            list(false, vec![item("a")]),
            list(false, vec![item("b")]),
            list(false, vec![item("c")]),
        ]);
        assert_eq!(render_with(&tree, settings), "*   a\n\n+   b\n\n*   c\n");
    }

    #[test]
    fn lists_apart_keep_the_primary_bullet() {
        let settings = Settings {
            bullet_other: Some('+'),
            ..Settings::default()
        };
        let tree = Node::root(vec![
            list(false, vec![item("a")]),
            Node::paragraph(vec![Node::text("b")]),
            list(false, vec![item("c")]),
        ]);
        assert_eq!(render_with(&tree, settings), "*   a\n\nb\n\n*   c\n");
    }

    #[test]
    fn empty_nested_first_items_switch_bullet() {
        let empty = Node::ListItem(ListItem::default());
        let tree = list(
            false,
            vec![Node::list_item(vec![list(
                false,
                vec![Node::list_item(vec![list(false, vec![empty])])],
            )])],
        );
        assert_eq!(render(&tree), "*   *   -\n");
    }

    #[test]
    fn rule_in_first_item_switches_bullet() {
        let tree = list(false, vec![Node::list_item(vec![Node::ThematicBreak])]);
        assert_eq!(render(&tree), "-   ***\n");
    }

    #[test]
    fn rule_with_another_character_keeps_bullet() {
        let settings = Settings {
            rule: Some('_'),
            ..Settings::default()
        };
        let tree = list(false, vec![Node::list_item(vec![Node::ThematicBreak])]);
        assert_eq!(render_with(&tree, settings), "*   ___\n");
    }

    #[test]
    fn ordered_lists_use_their_delimiter() {
        let settings = Settings {
            bullet_ordered: Some(')'),
            ..Settings::default()
        };
        assert_eq!(
            render_with(&list(true, vec![item("a"), item("b")]), settings),
            "1)  a\n2)  b\n"
        );
    }
}
