//! Tests for the element tree and its serialization

use mdsite_core::{Attributes, ConvertError, Element, ErrorKind, Leaf, Parent, StructureError};

// ============================================================================
// Attribute Tests
// ============================================================================

#[test]
fn test_attributes_to_html_in_insertion_order() {
    let attrs = Attributes::from([
        ("href", "https://www.google.com"),
        ("target", "_blank"),
    ]);
    assert_eq!(
        attrs.to_html(),
        r#" href="https://www.google.com" target="_blank""#
    );
}

#[test]
fn test_empty_attributes_render_nothing() {
    assert_eq!(Attributes::new().to_html(), "");
}

#[test]
fn test_attribute_reinsert_keeps_position() {
    let mut attrs = Attributes::new();
    attrs.insert("src", "a.png");
    attrs.insert("alt", "first");
    attrs.insert("src", "b.png");
    assert_eq!(attrs.len(), 2);
    assert_eq!(attrs.get("src"), Some("b.png"));
    assert_eq!(attrs.to_html(), r#" src="b.png" alt="first""#);
}

#[test]
fn test_attribute_values_are_not_escaped() {
    let attrs = Attributes::from([("title", r#"say "hi""#)]);
    assert_eq!(attrs.to_html(), r#" title="say "hi"""#);
}

// ============================================================================
// Leaf Tests
// ============================================================================

#[test]
fn test_untagged_leaf_is_raw_value() {
    assert_eq!(Element::text("hello").to_html().unwrap(), "hello");
}

#[test]
fn test_leaf_without_value_is_empty() {
    let leaf: Element = Leaf::new(None, None).into();
    assert_eq!(leaf.to_html().unwrap(), "");

    let tagged: Element = Leaf::new(Some("span"), None).into();
    assert_eq!(tagged.to_html().unwrap(), "<span></span>");
}

#[test]
fn test_leaf_with_attributes() {
    let leaf: Element = Leaf::new(Some("p"), Some("bungo"))
        .with_attribute("href", "https://www.google.com/")
        .into();
    assert_eq!(
        leaf.to_html().unwrap(),
        r#"<p href="https://www.google.com/">bungo</p>"#
    );
}

#[test]
fn test_image_leaf_renders_closing_tag() {
    let img: Element = Leaf::new(Some("img"), None)
        .with_attribute("src", "https://www.google.com/")
        .with_attribute("alt", "This is another text node")
        .into();
    assert_eq!(
        img.to_html().unwrap(),
        r#"<img src="https://www.google.com/" alt="This is another text node"></img>"#
    );
}

// ============================================================================
// Parent Tests
// ============================================================================

#[test]
fn test_parent_with_children() {
    let parent = Element::parent("div", vec![Element::leaf("span", "child")]);
    assert_eq!(parent.to_html().unwrap(), "<div><span>child</span></div>");
}

#[test]
fn test_parent_with_grandchildren() {
    let child = Element::parent("span", vec![Element::leaf("b", "grandchild")]);
    let parent = Element::parent("div", vec![child]);
    assert_eq!(
        parent.to_html().unwrap(),
        "<div><span><b>grandchild</b></span></div>"
    );
}

#[test]
fn test_parent_mixed_children() {
    let parent = Element::parent(
        "p",
        vec![
            Element::leaf("b", "Bold text"),
            Element::text("Normal text"),
            Element::leaf("i", "italic text"),
            Element::text("Normal text"),
        ],
    );
    assert_eq!(
        parent.to_html().unwrap(),
        "<p><b>Bold text</b>Normal text<i>italic text</i>Normal text</p>"
    );
}

#[test]
fn test_parent_attributes() {
    let parent: Element = Parent::new("div", vec![Element::text("x")])
        .with_attribute("class", "page")
        .into();
    assert_eq!(parent.to_html().unwrap(), r#"<div class="page">x</div>"#);
}

#[test]
fn test_parent_without_tag_fails() {
    let parent = Element::parent("", vec![Element::text("x")]);
    let err = parent.to_html().unwrap_err();
    assert_eq!(err, ConvertError::Structure(StructureError::MissingTag));
    assert_eq!(err.kind(), ErrorKind::Structure);
    assert_eq!(err.to_string(), "parent requires a tag");
}

#[test]
fn test_parent_without_children_fails() {
    let parent = Element::parent("div", Vec::new());
    let err = parent.to_html().unwrap_err();
    assert_eq!(err, ConvertError::Structure(StructureError::MissingChildren));
    assert_eq!(err.to_string(), "parent requires children");
}

#[test]
fn test_nested_structure_error_aborts_whole_tree() {
    let bad = Element::parent("ul", Vec::new());
    let root = Element::parent("div", vec![Element::leaf("p", "ok"), bad]);
    assert!(matches!(
        root.to_html(),
        Err(ConvertError::Structure(StructureError::MissingChildren))
    ));
}

#[test]
fn test_element_accessors() {
    let root = Element::parent("div", vec![Element::text("a"), Element::leaf("b", "c")]);
    assert_eq!(root.tag(), Some("div"));
    assert_eq!(root.children().len(), 2);
    assert_eq!(root.children()[0].tag(), None);
    assert_eq!(root.children()[1].tag(), Some("b"));
    assert!(root.children()[1].children().is_empty());
}

#[test]
fn test_parent_push_appends_in_order() {
    let mut list = Parent::new("ul", Vec::new());
    list.push(Element::parent("li", vec![Element::text("one")]));
    list.push(Element::parent("li", vec![Element::text("two")]));
    assert_eq!(list.children.len(), 2);
    assert_eq!(
        Element::Parent(list).to_html().unwrap(),
        "<ul><li>one</li><li>two</li></ul>"
    );
}

#[test]
fn test_attributes_iter_and_is_empty() {
    let mut attrs = Attributes::new();
    assert!(attrs.is_empty());
    assert_eq!(attrs.iter().count(), 0);

    attrs.insert("src", "/a.png");
    attrs.insert("alt", "a");
    assert!(!attrs.is_empty());
    assert_eq!(
        attrs.iter().collect::<Vec<_>>(),
        vec![("src", "/a.png"), ("alt", "a")]
    );
}
