//! FILENAME: tests/test_payload.rs
//! Integration tests for saving and reopening drafts.

mod common;

use common::{combo_of, ApparelFixture, TestHarness};
use variant_editor::{DraftEditor, EditorConfig};
use variant_engine::LeafPatch;
use variant_format::{check_payload, payload_from_str, read_payload, write_payload};

#[test]
fn test_save_and_reopen_draft() {
    let mut harness = TestHarness::with_apparel();
    harness
        .editor
        .set_leaf(
            &combo_of(&["Blue", "S"]),
            &LeafPatch {
                image: Some("blue-s.jpg".to_string()),
                ..LeafPatch::price_stock(30.0, 8)
            },
        )
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hoodie.json");
    let payload = harness.editor.to_payload("Hoodie", "HD");
    check_payload(&payload).unwrap();
    write_payload(&path, &payload).unwrap();

    let reopened =
        DraftEditor::from_payload(&read_payload(&path).unwrap(), EditorConfig::default());
    assert_eq!(reopened.groups(), harness.editor.groups());
    assert_eq!(reopened.combinations(), ApparelFixture::combinations());

    let leaf = reopened.leaf(&combo_of(&["Blue", "S"])).unwrap();
    assert_eq!(leaf.price, 30.0);
    assert_eq!(leaf.stock, 8);
    assert_eq!(leaf.image, "blue-s.jpg");
    assert!(!reopened.can_undo());
}

#[test]
fn test_reopen_empty_product() {
    let editor = DraftEditor::new();
    let payload = editor.to_payload("Mug", "MG");
    assert!(!payload.has_variants());

    let reopened = DraftEditor::from_payload(&payload, EditorConfig::default());
    assert_eq!(reopened.groups().len(), 1);
    assert!(reopened.groups()[0].name.is_empty());
}

#[test]
fn test_reopen_tree_with_unnamed_level() {
    let payload = payload_from_str(
        r#"{
            "name": "Scarf",
            "variants": [
                { "id": "red", "name": "Color", "value": "Red", "children": [
                    { "id": "red-s", "name": "", "value": "S", "price": 5.0, "stock": 2 }
                ] }
            ]
        }"#,
    )
    .unwrap();
    assert!(check_payload(&payload).is_err());

    let mut editor = DraftEditor::from_payload(&payload, EditorConfig::default());
    assert_eq!(editor.group_names(), vec!["Color", "Option 2"]);
    assert_eq!(editor.leaf(&combo_of(&["Red", "S"])).unwrap().price, 5.0);
    assert_eq!(editor.matrix().missing_count, 0);

    editor
        .set_leaf(&combo_of(&["Red", "S"]), &LeafPatch::price_stock(7.0, 3))
        .unwrap();
    assert_eq!(editor.leaf(&combo_of(&["Red", "S"])).unwrap().price, 7.0);

    // A rebuild keeps the level and the edited leaf data.
    editor.add_value(0, "Blue").unwrap();
    let red_s = editor.leaf(&combo_of(&["Red", "S"])).unwrap();
    assert_eq!(red_s.price, 7.0);
    assert_eq!(red_s.stock, 3);
    assert_eq!(red_s.name, "Option 2");
    assert_eq!(editor.leaf(&combo_of(&["Blue", "S"])).unwrap().price, 0.0);
}
