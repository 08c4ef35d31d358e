#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn text_styles(elem: &Element) -> &TextStyles {
    elem.body.text().unwrap()
}

// =============================================================
// ElementId / ElementKind
// =============================================================

#[test]
fn id_from_counter_format() {
    assert_eq!(ElementId::from_counter(7).as_str(), "elem7");
    assert_eq!(ElementId::from_counter(7).to_string(), "elem7");
}

#[test]
fn kind_serde_all_variants() {
    let cases = [
        (ElementKind::Rectangle, "\"rectangle\""),
        (ElementKind::Circle, "\"circle\""),
        (ElementKind::Text, "\"text\""),
    ];
    for (kind, expected) in cases {
        assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
        assert_eq!(kind.as_str(), expected.trim_matches('"'));
    }
}

// =============================================================
// Element::new defaults
// =============================================================

#[test]
fn new_rectangle_defaults() {
    let e = Element::new(ElementKind::Rectangle, "elem1".into(), 1);
    assert_eq!((e.x, e.y, e.width, e.height), (100.0, 100.0, 100.0, 100.0));
    assert_eq!(e.rotation, 0.0);
    assert_eq!(e.z_index, 1);
    assert_eq!(e.body.background_color(), "#2c2c2c");
    assert_eq!(e.body.border_radius(), BorderRadius::uniform(0.0));
    assert!(e.body.text().is_none());
}

#[test]
fn new_circle_has_rounding_radii() {
    let e = Element::new(ElementKind::Circle, "elem1".into(), 1);
    assert_eq!(e.kind(), ElementKind::Circle);
    assert_eq!(e.body.border_radius(), BorderRadius::uniform(CIRCLE_RADIUS));
}

#[test]
fn new_text_defaults() {
    let e = Element::new(ElementKind::Text, "elem1".into(), 3);
    assert_eq!((e.width, e.height), (200.0, 50.0));
    assert_eq!(e.body.background_color(), "transparent");
    let t = text_styles(&e);
    assert_eq!(t.text_content, "New Text");
    assert_eq!(t.text_color, "#000000");
    assert_eq!(t.font_size, 16);
    assert_eq!(t.font_family, FontFamily::Arial);
    assert_eq!(t.justify_content, Justify::Center);
    assert_eq!(t.font_weight, FontWeight::Normal);
    assert_eq!(t.font_style, FontStyle::Normal);
    assert_eq!(t.text_decoration, TextDecoration::None);
}

#[test]
fn new_elements_are_in_bounds() {
    for kind in [ElementKind::Rectangle, ElementKind::Circle, ElementKind::Text] {
        assert!(Element::new(kind, "elem1".into(), 1).in_bounds());
    }
}

// =============================================================
// Serde shape
// =============================================================

#[test]
fn element_serializes_with_type_tag_and_camel_case() {
    let e = Element::new(ElementKind::Rectangle, "elem1".into(), 1);
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(v["id"], "elem1");
    assert_eq!(v["type"], "rectangle");
    assert_eq!(v["zIndex"], 1);
    assert_eq!(v["styles"]["backgroundColor"], "#2c2c2c");
    assert_eq!(v["styles"]["borderRadius"]["tl"], 0.0);
    assert!(v["styles"].get("textContent").is_none());
}

#[test]
fn text_element_serializes_style_enums_as_css_values() {
    let e = Element::new(ElementKind::Text, "elem2".into(), 1);
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(v["type"], "text");
    assert_eq!(v["styles"]["fontFamily"], "Arial");
    assert_eq!(v["styles"]["justifyContent"], "center");
    assert_eq!(v["styles"]["fontWeight"], "normal");
    assert_eq!(v["styles"]["textDecoration"], "none");
}

#[test]
fn element_deserializes_legacy_record_with_extra_fields() {
    let raw = json!({
        "id": "elem4",
        "type": "rectangle",
        "x": 100,
        "y": 120,
        "width": 100,
        "height": 100,
        "maxWidth": 1210,
        "maxHeight": 1010,
        "rotation": 12.5,
        "zIndex": 2,
        "styles": {
            "backgroundColor": "#ff0000",
            "textContent": "",
            "borderRadius": { "tl": 4, "tr": 0, "br": 0, "bl": 0 }
        }
    });
    let e: Element = serde_json::from_value(raw).unwrap();
    assert_eq!(e.id.as_str(), "elem4");
    assert_eq!(e.kind(), ElementKind::Rectangle);
    assert_eq!(e.y, 120.0);
    assert_eq!(e.rotation, 12.5);
    assert_eq!(e.body.border_radius().tl, 4.0);
    assert_eq!(e.body.background_color(), "#ff0000");
}

#[test]
fn courier_new_uses_css_name() {
    assert_eq!(serde_json::to_string(&FontFamily::CourierNew).unwrap(), "\"Courier New\"");
    assert_eq!(FontFamily::CourierNew.as_str(), "Courier New");
}

// =============================================================
// Toggles
// =============================================================

#[test]
fn toggles_are_involutions() {
    assert_eq!(FontWeight::Normal.toggled().toggled(), FontWeight::Normal);
    assert_eq!(FontStyle::Italic.toggled().toggled(), FontStyle::Italic);
    assert_eq!(TextDecoration::None.toggled(), TextDecoration::Underline);
    assert_eq!(TextDecoration::Underline.toggled(), TextDecoration::None);
}

// =============================================================
// apply_geometry
// =============================================================

#[test]
fn geometry_patch_sets_only_present_fields() {
    let mut e = Element::new(ElementKind::Rectangle, "elem1".into(), 1);
    e.apply_geometry(&GeometryPatch { width: Some(300.0), ..Default::default() });
    assert_eq!((e.x, e.y, e.width, e.height), (100.0, 100.0, 300.0, 100.0));
}

#[test]
fn geometry_patch_floors_size() {
    let mut e = Element::new(ElementKind::Rectangle, "elem1".into(), 1);
    e.apply_geometry(&GeometryPatch { width: Some(2.0), height: Some(-5.0), ..Default::default() });
    assert_eq!((e.width, e.height), (MIN_SIZE, MIN_SIZE));
}

#[test]
fn geometry_patch_pulls_position_back_when_growing() {
    let mut e = Element::new(ElementKind::Rectangle, "elem1".into(), 1);
    e.apply_geometry(&GeometryPatch { x: Some(1100.0), ..Default::default() });
    assert_eq!(e.x, 1100.0);
    e.apply_geometry(&GeometryPatch { width: Some(500.0), ..Default::default() });
    assert_eq!(e.width, 500.0);
    assert_eq!(e.x, CANVAS_WIDTH - 500.0);
    assert!(e.in_bounds());
}

#[test]
fn geometry_patch_caps_size_at_canvas() {
    let mut e = Element::new(ElementKind::Rectangle, "elem1".into(), 1);
    e.apply_geometry(&GeometryPatch { width: Some(5000.0), height: Some(5000.0), ..Default::default() });
    assert_eq!((e.x, e.y, e.width, e.height), (0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT));
}

#[test]
fn geometry_patch_rotation_is_stored_verbatim() {
    let mut e = Element::new(ElementKind::Rectangle, "elem1".into(), 1);
    e.apply_geometry(&GeometryPatch { rotation: Some(-725.0), ..Default::default() });
    assert_eq!(e.rotation, -725.0);
}

// =============================================================
// apply_style
// =============================================================

#[test]
fn style_background_applies_to_every_kind() {
    for kind in [ElementKind::Rectangle, ElementKind::Circle, ElementKind::Text] {
        let mut e = Element::new(kind, "elem1".into(), 1);
        e.apply_style(&StylePatch { background_color: Some("#123456".into()), ..Default::default() });
        assert_eq!(e.body.background_color(), "#123456");
    }
}

#[test]
fn style_border_radius_floors_at_zero() {
    let mut e = Element::new(ElementKind::Rectangle, "elem1".into(), 1);
    e.apply_style(&StylePatch { border_radius: Some((Corner::Br, -8.0)), ..Default::default() });
    assert_eq!(e.body.border_radius().br, 0.0);
    e.apply_style(&StylePatch { border_radius: Some((Corner::Tr, 12.0)), ..Default::default() });
    assert_eq!(e.body.border_radius().tr, 12.0);
}

#[test]
fn style_text_fields_ignored_on_shapes() {
    let mut e = Element::new(ElementKind::Rectangle, "elem1".into(), 1);
    let before = e.clone();
    e.apply_style(&StylePatch {
        text_content: Some("hello".into()),
        font_size: Some(40),
        toggle_bold: true,
        ..Default::default()
    });
    assert_eq!(e, before);
}

#[test]
fn style_text_fields_apply_on_text() {
    let mut e = Element::new(ElementKind::Text, "elem1".into(), 1);
    e.apply_style(&StylePatch {
        text_content: Some("hello".into()),
        text_color: Some("#ff0000".into()),
        font_size: Some(40),
        font_family: Some(FontFamily::Roboto),
        justify_content: Some(Justify::FlexEnd),
        toggle_italic: true,
        toggle_underline: true,
        ..Default::default()
    });
    let t = text_styles(&e);
    assert_eq!(t.text_content, "hello");
    assert_eq!(t.text_color, "#ff0000");
    assert_eq!(t.font_size, 40);
    assert_eq!(t.font_family, FontFamily::Roboto);
    assert_eq!(t.justify_content, Justify::FlexEnd);
    assert_eq!(t.font_style, FontStyle::Italic);
    assert_eq!(t.text_decoration, TextDecoration::Underline);
}

#[test]
fn style_zero_font_size_is_ignored() {
    let mut e = Element::new(ElementKind::Text, "elem1".into(), 1);
    e.apply_style(&StylePatch { font_size: Some(0), ..Default::default() });
    assert_eq!(text_styles(&e).font_size, 16);
}

#[test]
fn bold_toggled_twice_returns_to_original() {
    let mut e = Element::new(ElementKind::Text, "elem1".into(), 1);
    let bold = StylePatch { toggle_bold: true, ..Default::default() };
    e.apply_style(&bold);
    assert_eq!(text_styles(&e).font_weight, FontWeight::Bold);
    e.apply_style(&bold);
    assert_eq!(text_styles(&e).font_weight, FontWeight::Normal);
}

#[test]
fn style_patch_is_empty() {
    assert!(StylePatch::default().is_empty());
    assert!(!StylePatch { toggle_bold: true, ..Default::default() }.is_empty());
}

// =============================================================
// DocStore
// =============================================================

#[test]
fn store_new_is_empty() {
    let store = DocStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.counter(), 0);
}

#[test]
fn store_create_assigns_monotonic_ids_and_top_z() {
    let mut store = DocStore::new();
    let a = store.create(ElementKind::Rectangle).clone();
    let b = store.create(ElementKind::Text).clone();
    assert_eq!(a.id.as_str(), "elem1");
    assert_eq!(b.id.as_str(), "elem2");
    assert_eq!(a.z_index, 1);
    assert_eq!(b.z_index, 2);
    assert_eq!(store.counter(), 2);
}

#[test]
fn store_ids_never_reused_after_remove() {
    let mut store = DocStore::new();
    store.create(ElementKind::Rectangle);
    store.remove(&"elem1".into());
    let next = store.create(ElementKind::Circle).id.clone();
    assert_eq!(next.as_str(), "elem2");
}

#[test]
fn store_remove_compacts_z() {
    let mut store = DocStore::new();
    for _ in 0..3 {
        store.create(ElementKind::Rectangle);
    }
    assert!(store.remove(&"elem1".into()).is_some());
    assert_eq!(store.get(&"elem2".into()).unwrap().z_index, 1);
    assert_eq!(store.get(&"elem3".into()).unwrap().z_index, 2);
    let d = store.create(ElementKind::Rectangle).z_index;
    assert_eq!(d, 3);
    assert!(zorder::is_dense(store.elements()));
}

#[test]
fn store_remove_missing_returns_none() {
    let mut store = DocStore::new();
    assert!(store.remove(&"elem1".into()).is_none());
}

#[test]
fn store_apply_to_missing_returns_false() {
    let mut store = DocStore::new();
    assert!(!store.apply_geometry(&"nope".into(), &GeometryPatch::default()));
    assert!(!store.apply_style(&"nope".into(), &StylePatch::default()));
}

#[test]
fn store_sorted_by_z() {
    let mut store = DocStore::new();
    for _ in 0..3 {
        store.create(ElementKind::Rectangle);
    }
    store.move_layer(&"elem1".into(), Direction::Up);
    let order: Vec<&str> = store.sorted_by_z().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order, vec!["elem2", "elem1", "elem3"]);
}

#[test]
fn store_clear_resets_counter() {
    let mut store = DocStore::new();
    store.create(ElementKind::Rectangle);
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.create(ElementKind::Rectangle).id.as_str(), "elem1");
}

#[test]
fn store_load_keeps_valid_record_unchanged() {
    let mut store = DocStore::new();
    let mut e = Element::new(ElementKind::Circle, "elem9".into(), 1);
    e.x = 12.0;
    e.rotation = 725.0;
    store.load(vec![e.clone()], 9);
    assert_eq!(store.elements(), &[e]);
    assert_eq!(store.counter(), 9);
    assert_eq!(store.create(ElementKind::Text).id.as_str(), "elem10");
}

#[test]
fn store_load_compacts_z_gaps() {
    let mut store = DocStore::new();
    store.load(vec![Element::new(ElementKind::Rectangle, "elem2".into(), 2)], 2);
    assert_eq!(store.get(&"elem2".into()).unwrap().z_index, 1);

    store.create(ElementKind::Rectangle);
    assert!(zorder::is_dense(store.elements()));
    assert!(store.move_layer(&"elem3".into(), Direction::Down));
    assert_eq!(store.get(&"elem3".into()).unwrap().z_index, 1);
}

#[test]
fn store_load_breaks_z_ties_so_layers_can_move() {
    let mut store = DocStore::new();
    store.load(
        vec![
            Element::new(ElementKind::Rectangle, "elem1".into(), 5),
            Element::new(ElementKind::Circle, "elem2".into(), 5),
            Element::new(ElementKind::Text, "elem3".into(), 9),
        ],
        3,
    );
    assert!(zorder::is_dense(store.elements()));
    assert!(store.move_layer(&"elem2".into(), Direction::Down));
    assert!(zorder::is_dense(store.elements()));
}

#[test]
fn store_load_raises_counter_past_existing_ids() {
    let mut store = DocStore::new();
    store.load(
        vec![
            Element::new(ElementKind::Rectangle, "elem1".into(), 1),
            Element::new(ElementKind::Rectangle, "elem7".into(), 2),
            Element::new(ElementKind::Rectangle, "custom".into(), 3),
        ],
        0,
    );
    assert_eq!(store.counter(), 7);
    assert_eq!(store.create(ElementKind::Circle).id.as_str(), "elem8");
}

#[test]
fn store_load_clamps_geometry_onto_canvas() {
    let mut e = Element::new(ElementKind::Rectangle, "elem1".into(), 1);
    e.x = -50.0;
    e.y = 2000.0;
    e.width = 3.0;
    e.height = 5000.0;
    let mut store = DocStore::new();
    store.load(vec![e], 1);
    let loaded = store.get(&"elem1".into()).unwrap();
    assert!(loaded.in_bounds());
    assert_eq!((loaded.x, loaded.y, loaded.width, loaded.height), (0.0, 0.0, MIN_SIZE, CANVAS_HEIGHT));
}

#[test]
fn counter_suffix_parses_generated_ids_only() {
    assert_eq!(ElementId::from("elem12").counter_suffix(), Some(12));
    assert_eq!(ElementId::from("elem").counter_suffix(), None);
    assert_eq!(ElementId::from("elemX").counter_suffix(), None);
    assert_eq!(ElementId::from("box3").counter_suffix(), None);
}
