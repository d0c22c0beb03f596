//! Tests for the stack of open elements and the list of active formatting
//! elements.

use sapling_dom::{Namespace, NodeId, QualName};
use sapling_html::parser::formatting::{ActiveFormattingElements, FormattingEntry};
use sapling_html::parser::open_elements::OpenElements;
use sapling_html::parser::tags::Scope;
use sapling_html::{Attribute, Token};

/// A stack holding `names` in order, with ids 1, 2, ...
fn stack(names: &[QualName]) -> OpenElements {
    let mut stack = OpenElements::new();
    for (i, name) in names.iter().enumerate() {
        stack.push(NodeId(i + 1), name.clone());
    }
    stack
}

fn html(names: &[&str]) -> Vec<QualName> {
    names.iter().map(|name| QualName::html(*name)).collect()
}

#[test]
fn test_push_pop_and_current_node() {
    let mut open = stack(&html(&["html", "body", "p"]));
    assert_eq!(open.len(), 3);
    assert!(open.top_is_html("p"));
    assert_eq!(open.bottom(), Some(NodeId(1)));

    assert_eq!(open.pop(), NodeId(3));
    assert!(open.top_is_html("body"));
    assert_eq!(open.element_immediately_above(NodeId(2)), Some(NodeId(1)));
}

#[test]
#[should_panic(expected = "popped an empty stack of open elements")]
fn test_pop_empty_stack_panics() {
    let mut open = OpenElements::new();
    let _ = open.pop();
}

#[test]
#[should_panic(expected = "twice")]
fn test_push_same_element_twice_panics() {
    let mut open = OpenElements::new();
    open.push(NodeId(1), QualName::html("html"));
    open.push(NodeId(1), QualName::html("html"));
}

#[test]
fn test_pop_until_html_named() {
    let mut open = stack(&html(&["html", "body", "ul", "li", "b"]));
    open.pop_until_html_named("li");
    assert!(open.top_is_html("ul"));
    assert_eq!(open.len(), 3);
}

#[test]
fn test_default_scope_stops_at_table() {
    let open = stack(&html(&["html", "body", "p", "table", "tr", "td", "span"]));
    assert!(open.has_in_scope("td", Scope::Default));
    assert!(!open.has_in_scope("p", Scope::Default));
    assert!(open.has_in_scope("tr", Scope::Table));
    assert!(!open.has_in_scope("body", Scope::Table));
}

#[test]
fn test_button_and_list_item_scope() {
    let open = stack(&html(&["html", "body", "p", "button", "span"]));
    assert!(open.has_in_scope("p", Scope::Default));
    assert!(!open.has_in_scope("p", Scope::Button));

    let open = stack(&html(&["html", "body", "li", "ul", "span"]));
    assert!(open.has_in_scope("li", Scope::Default));
    assert!(!open.has_in_scope("li", Scope::ListItem));
}

#[test]
fn test_select_scope_only_passes_option_and_optgroup() {
    let open = stack(&html(&["html", "body", "select", "optgroup", "option"]));
    assert!(open.has_in_scope("select", Scope::Select));

    let open = stack(&html(&["html", "body", "select", "div"]));
    assert!(!open.has_in_scope("select", Scope::Select));
}

#[test]
fn test_foreign_integration_points_bound_scope() {
    let mut names = html(&["html", "body", "p"]);
    names.push(QualName::new(Namespace::Svg, "svg"));
    names.push(QualName::new(Namespace::Svg, "foreignObject"));
    names.push(QualName::html("span"));
    let open = stack(&names);
    assert!(!open.has_in_scope("p", Scope::Default));

    // An HTML-named element in another namespace does not match.
    let mut names = html(&["html", "body"]);
    names.push(QualName::new(Namespace::Svg, "title"));
    let open = stack(&names);
    assert!(!open.has_in_scope("title", Scope::Default));
}

#[test]
fn test_insert_below_and_replace() {
    let mut open = stack(&html(&["html", "body", "div"]));
    open.insert_below(NodeId(2), NodeId(9), QualName::html("b"));
    assert_eq!(open.position(NodeId(9)), Some(2));
    assert!(open.top_is_html("div"));

    open.replace(NodeId(9), NodeId(10), QualName::html("i"));
    assert!(!open.contains(NodeId(9)));
    assert_eq!(open.position(NodeId(10)), Some(2));
    assert!(open.name_of(NodeId(10)).is_some_and(|name| name.is_html("i")));
}

// ========== Active formatting elements ==========

fn anchor(href: &str) -> Token {
    Token::start_tag("a", vec![Attribute::new("href", href)])
}

#[test]
fn test_noahs_ark_removes_earliest_duplicate() {
    let mut list = ActiveFormattingElements::new();
    for id in 1..=3 {
        list.push(NodeId(id), anchor("x"));
    }
    assert_eq!(list.len(), 3);

    list.push(NodeId(4), anchor("x"));
    assert_eq!(list.len(), 3);
    assert!(!list.contains(NodeId(1)));
    assert!(list.contains(NodeId(4)));
}

#[test]
fn test_noahs_ark_compares_attributes() {
    let mut list = ActiveFormattingElements::new();
    for id in 1..=3 {
        list.push(NodeId(id), anchor("x"));
    }
    list.push(NodeId(4), anchor("y"));
    assert_eq!(list.len(), 4);

    // Attribute order does not matter.
    let mut list = ActiveFormattingElements::new();
    let attrs = vec![Attribute::new("a", "1"), Attribute::new("b", "2")];
    let reversed = vec![Attribute::new("b", "2"), Attribute::new("a", "1")];
    for id in 1..=3 {
        list.push(NodeId(id), Token::start_tag("span", attrs.clone()));
    }
    list.push(NodeId(4), Token::start_tag("span", reversed));
    assert_eq!(list.len(), 3);
}

#[test]
fn test_noahs_ark_only_counts_after_marker() {
    let mut list = ActiveFormattingElements::new();
    for id in 1..=3 {
        list.push(NodeId(id), anchor("x"));
    }
    list.push_marker();
    list.push(NodeId(4), anchor("x"));
    assert_eq!(list.len(), 5);
    assert!(list.contains(NodeId(1)));
}

#[test]
fn test_clear_up_to_last_marker() {
    let mut list = ActiveFormattingElements::new();
    list.push(NodeId(1), Token::start_tag("b", Vec::new()));
    list.push_marker();
    list.push(NodeId(2), Token::start_tag("i", Vec::new()));
    list.push(NodeId(3), Token::start_tag("u", Vec::new()));

    assert_eq!(list.last_element_after_last_marker_with_tag_name("i"), Some(NodeId(2)));
    assert_eq!(list.last_element_after_last_marker_with_tag_name("b"), None);

    list.clear_up_to_last_marker();
    assert_eq!(list.len(), 1);
    assert_eq!(list.last(), Some(&FormattingEntry::Element {
        node: NodeId(1),
        token: Token::start_tag("b", Vec::new()),
    }));
}

#[test]
fn test_replace_and_remove() {
    let mut list = ActiveFormattingElements::new();
    list.push(NodeId(1), Token::start_tag("b", Vec::new()));
    list.push(NodeId(2), Token::start_tag("i", Vec::new()));

    list.replace(NodeId(1), NodeId(5), Token::start_tag("b", Vec::new()));
    assert_eq!(list.index_of(NodeId(5)), Some(0));

    list.remove(NodeId(2));
    assert_eq!(list.len(), 1);
    list.remove(NodeId(42));
    assert_eq!(list.len(), 1);
}
