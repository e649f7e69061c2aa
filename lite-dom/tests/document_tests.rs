use lite_dom::{h, text, Document, PropertyValue, Props};
use serde_json::json;

#[test]
fn build_materializes_tree_in_order() {
    let mut doc = Document::new();
    let root = doc.build(&h(
        "div",
        Props::new().set("class", "a").set("id", "x").prop("value", 1.0),
        vec![text("hello"), h("span", (), vec![text("world")])],
    ));

    assert_eq!(doc.tag(root), Some("div"));
    assert_eq!(doc.attribute_names(root), vec!["class", "id"]);
    assert_eq!(doc.get_property_raw(root, "value"), Some(&PropertyValue::Number(1.0)));

    let kids = doc.children(root).to_vec();
    assert_eq!(kids.len(), 2);
    assert!(doc.is_text(kids[0]));
    assert_eq!(doc.text(kids[0]), Some("hello"));
    assert_eq!(doc.tag(kids[1]), Some("span"));
}

#[test]
fn bool_attribute_sets_empty_or_removes() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    doc.set_bool_attribute(div, "hidden", true);
    assert_eq!(doc.get_attribute(div, "hidden"), Some(""));
    doc.set_bool_attribute(div, "hidden", false);
    assert_eq!(doc.get_attribute(div, "hidden"), None);
}

#[test]
fn reset_attribute_keeps_position() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    doc.set_attribute(div, "a", "1");
    doc.set_attribute(div, "b", "2");
    doc.set_attribute(div, "a", "3");
    assert_eq!(doc.attribute_names(div), vec!["a", "b"]);
    assert_eq!(doc.get_attribute(div, "a"), Some("3"));
    assert_eq!(doc.remove_attribute(div, "a"), Some("3".to_string()));
    assert_eq!(doc.attribute_names(div), vec!["b"]);
}

#[test]
fn properties_round_trip_json() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    doc.set_property(div, "items", json!([1, 2, 3]));
    assert_eq!(doc.property_names(div), vec!["items"]);
    assert_eq!(
        doc.remove_property(div, "items"),
        Some(PropertyValue::Json(json!([1, 2, 3])))
    );
    assert!(doc.property_names(div).is_empty());
}

#[test]
fn text_nodes_ignore_element_mutations() {
    let mut doc = Document::new();
    let t = doc.create_text("x");
    doc.set_attribute(t, "a", "b");
    doc.append_child(t, t);
    assert!(doc.attribute_names(t).is_empty());
    assert!(doc.children(t).is_empty());
    assert_eq!(doc.tag(t), None);
}

#[test]
fn contains_walks_descendants() {
    let mut doc = Document::new();
    let root = doc.build(&h("ul", (), vec![h("li", (), vec![text("a")])]));
    let li = doc.children(root)[0];
    let leaf = doc.children(li)[0];
    let other = doc.create_element("p");

    assert!(doc.contains(root, root));
    assert!(doc.contains(root, leaf));
    assert!(!doc.contains(li, root));
    assert!(!doc.contains(root, other));
}
