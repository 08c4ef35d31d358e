use super::*;
use crate::doc::ElementKind;

fn make_elements(n: usize) -> Vec<Element> {
    (1..=n)
        .map(|i| {
            let z = i64::try_from(i).unwrap();
            Element::new(ElementKind::Rectangle, ElementId::from_counter(i as u64), z)
        })
        .collect()
}

fn ids(elements: &[Element]) -> Vec<&str> {
    elements.iter().map(|e| e.id.as_str()).collect()
}

fn z_of(elements: &[Element], id: &str) -> i64 {
    elements.iter().find(|e| e.id.as_str() == id).unwrap().z_index
}

// =============================================================
// move_layer
// =============================================================

#[test]
fn move_up_swaps_with_next_greater() {
    let mut elems = make_elements(3);
    assert!(move_layer(&mut elems, &"elem1".into(), Direction::Up));
    assert_eq!(z_of(&elems, "elem1"), 2);
    assert_eq!(z_of(&elems, "elem2"), 1);
    assert_eq!(ids(&elems), vec!["elem2", "elem1", "elem3"]);
}

#[test]
fn move_down_swaps_with_next_smaller() {
    let mut elems = make_elements(3);
    assert!(move_layer(&mut elems, &"elem3".into(), Direction::Down));
    assert_eq!(z_of(&elems, "elem3"), 2);
    assert_eq!(z_of(&elems, "elem2"), 3);
    assert_eq!(ids(&elems), vec!["elem1", "elem3", "elem2"]);
}

#[test]
fn move_up_at_top_is_noop() {
    let mut elems = make_elements(3);
    let before = elems.clone();
    assert!(!move_layer(&mut elems, &"elem3".into(), Direction::Up));
    assert_eq!(elems, before);
}

#[test]
fn move_down_at_bottom_is_noop() {
    let mut elems = make_elements(3);
    let before = elems.clone();
    assert!(!move_layer(&mut elems, &"elem1".into(), Direction::Down));
    assert_eq!(elems, before);
}

#[test]
fn move_unknown_id_is_noop() {
    let mut elems = make_elements(2);
    let before = elems.clone();
    assert!(!move_layer(&mut elems, &"elem99".into(), Direction::Up));
    assert_eq!(elems, before);
}

#[test]
fn move_single_element_is_noop() {
    let mut elems = make_elements(1);
    assert!(!move_layer(&mut elems, &"elem1".into(), Direction::Up));
    assert!(!move_layer(&mut elems, &"elem1".into(), Direction::Down));
}

#[test]
fn move_up_then_down_restores_everything() {
    let mut elems = make_elements(4);
    let before = elems.clone();
    move_layer(&mut elems, &"elem2".into(), Direction::Up);
    move_layer(&mut elems, &"elem2".into(), Direction::Down);
    assert_eq!(elems, before);
}

#[test]
fn move_uses_z_neighbour_not_collection_neighbour() {
    // Collection order disagrees with paint order.
    let mut elems = make_elements(3);
    elems[0].z_index = 3;
    elems[2].z_index = 1;
    assert!(move_layer(&mut elems, &"elem3".into(), Direction::Up));
    assert_eq!(z_of(&elems, "elem3"), 2);
    assert_eq!(z_of(&elems, "elem2"), 1);
    assert!(is_dense(&elems));
}

#[test]
fn move_skips_gaps() {
    let mut elems = make_elements(2);
    elems[1].z_index = 7;
    assert!(move_layer(&mut elems, &"elem1".into(), Direction::Up));
    assert_eq!(z_of(&elems, "elem1"), 7);
    assert_eq!(z_of(&elems, "elem2"), 1);
}

#[test]
fn repeated_moves_keep_dense_permutation() {
    let mut elems = make_elements(5);
    let script = [
        ("elem1", Direction::Up),
        ("elem1", Direction::Up),
        ("elem5", Direction::Down),
        ("elem3", Direction::Up),
        ("elem1", Direction::Up),
        ("elem4", Direction::Down),
    ];
    for (id, dir) in script {
        move_layer(&mut elems, &id.into(), dir);
        assert!(is_dense(&elems));
    }
}

// =============================================================
// compact / is_dense
// =============================================================

#[test]
fn compact_closes_gaps_preserving_order() {
    let mut elems = make_elements(3);
    elems[0].z_index = 4;
    elems[1].z_index = 10;
    elems[2].z_index = 2;
    compact(&mut elems);
    assert_eq!(z_of(&elems, "elem3"), 1);
    assert_eq!(z_of(&elems, "elem1"), 2);
    assert_eq!(z_of(&elems, "elem2"), 3);
    assert!(is_dense(&elems));
}

#[test]
fn compact_breaks_ties_by_collection_order() {
    let mut elems = make_elements(2);
    elems[0].z_index = 5;
    elems[1].z_index = 5;
    compact(&mut elems);
    assert_eq!(z_of(&elems, "elem1"), 1);
    assert_eq!(z_of(&elems, "elem2"), 2);
}

#[test]
fn is_dense_rejects_gaps_and_ties() {
    let mut elems = make_elements(3);
    assert!(is_dense(&elems));
    elems[2].z_index = 4;
    assert!(!is_dense(&elems));
    elems[2].z_index = 2;
    assert!(!is_dense(&elems));
}

#[test]
fn is_dense_empty() {
    assert!(is_dense(&[]));
}
