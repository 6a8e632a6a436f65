//! Push validation and namespace range bookkeeping.

mod common;

use common::*;
use ncmt::{LeafRange, NamespaceId, NamespacedData, Ncmt, NcmtError, Options};

#[test]
fn first_push_accepts_any_namespace() {
    let mut tree = Ncmt::new();
    tree.push(NamespacedData::new(NamespaceId::parity(8), b"last".to_vec())).unwrap();
    assert_eq!(tree.leaves().len(), 1);
}

#[test]
fn equal_namespaces_are_allowed() {
    let mut tree = Ncmt::new();
    for payload in [b"a", b"b", b"c"] {
        tree.push(NamespacedData::new(ns(3), payload.to_vec())).unwrap();
    }
    assert_eq!(tree.namespace_range(&ns(3)), Some(LeafRange { start: 0, end: 3 }));
}

#[test]
fn decreasing_namespace_is_rejected() {
    let mut tree = Ncmt::new();
    tree.push(NamespacedData::new(ns(5), vec![1])).unwrap();
    let err = tree.push(NamespacedData::new(ns(4), vec![2])).unwrap_err();
    assert_eq!(err, NcmtError::OutOfOrderPush { last: ns(5), got: ns(4) });
    assert_eq!(
        err.to_string(),
        "invalid push: namespace 0000000000000004 is less than the last pushed namespace 0000000000000005"
    );

    // Rejected pushes leave the tree untouched.
    assert_eq!(tree.leaves().len(), 1);
    assert_eq!(tree.namespace_range(&ns(4)), None);
    tree.push(NamespacedData::new(ns(5), vec![3])).unwrap();
}

#[test]
fn namespace_width_is_checked() {
    let mut tree = Ncmt::new();
    let err = tree.push(NamespacedData::new(vec![1u8, 2, 3], vec![0])).unwrap_err();
    assert_eq!(err, NcmtError::InvalidNamespaceSize { expected: 8, got: 3 });
    assert!(tree.leaves().is_empty());

    let mut narrow = Ncmt::with_options(Options::default().namespace_size(2)).unwrap();
    narrow.push(NamespacedData::new(vec![0u8, 1], vec![0])).unwrap();
    assert!(matches!(
        narrow.push(NamespacedData::new(ns(1), vec![0])),
        Err(NcmtError::InvalidNamespaceSize { expected: 2, got: 8 })
    ));
}

#[test]
fn width_check_comes_before_order_check() {
    let mut tree = Ncmt::new();
    tree.push(NamespacedData::new(ns(9), vec![0])).unwrap();
    // Shorter and smaller: the width error wins.
    let err = tree.push(NamespacedData::new(vec![0u8], vec![0])).unwrap_err();
    assert!(matches!(err, NcmtError::InvalidNamespaceSize { .. }), "{err:?}");
}

#[test]
fn ranges_cover_contiguous_runs() {
    let mut rng = rng_from_env();
    let mut tree = Ncmt::new();
    let runs = [(1u64, 3usize), (2, 1), (7, 4), (8, 2)];
    for (id, count) in runs {
        for _ in 0..count {
            tree.push(NamespacedData::new(ns(id), random_bytes(16, &mut rng))).unwrap();
        }
    }

    assert_eq!(tree.namespace_range(&ns(1)), Some(LeafRange { start: 0, end: 3 }));
    assert_eq!(tree.namespace_range(&ns(2)), Some(LeafRange::singleton(3)));
    assert_eq!(tree.namespace_range(&ns(7)), Some(LeafRange { start: 4, end: 8 }));
    assert_eq!(tree.namespace_range(&ns(8)), Some(LeafRange { start: 8, end: 10 }));
    assert_eq!(tree.namespace_range(&ns(3)), None);
    assert_eq!(tree.namespace_ranges().len(), 4);

    for (id, range) in tree.namespace_ranges().iter() {
        for leaf in &tree.leaves()[range.as_range()] {
            assert_eq!(leaf.namespace_id(), id);
        }
    }
}

#[test]
fn ranges_survive_build_and_track_later_pushes() {
    let mut rng = rng_from_env();
    let mut tree = pushed_tree(8, 4, &mut rng);
    tree.build().unwrap();
    // Parity leaves are not indexed.
    assert_eq!(tree.namespace_range(&ns(7)), Some(LeafRange::singleton(7)));

    tree.push(NamespacedData::new(ns(7), vec![1, 2, 3, 4])).unwrap();
    assert_eq!(tree.namespace_range(&ns(7)), Some(LeafRange { start: 7, end: 9 }));
    assert_eq!(tree.leaves().len(), 9);
}

#[test]
fn leaf_hash_commits_to_namespace_and_payload() {
    let mut tree = Ncmt::new();
    tree.push(NamespacedData::new(ns(1), b"data".to_vec())).unwrap();
    let leaf = &tree.leaves()[0];
    assert_eq!(leaf.payload(), b"data");
    assert_eq!(&leaf.hash()[..8], ns(1).as_bytes());
    assert_eq!(&leaf.hash()[8..16], ns(1).as_bytes());
    assert_eq!(leaf.hash().len(), 16 + 32);
}

#[test]
fn prefixed_buffers_split_on_namespace_width() {
    let raw = [0u8, 0, 0, 0, 0, 0, 0, 4, 0xAA, 0xBB];
    let d = NamespacedData::from_prefixed(8, &raw).unwrap();
    assert_eq!(d.namespace_id(), &ns(4));
    assert_eq!(d.payload(), &[0xAA, 0xBB]);
    assert_eq!(d.to_prefixed(), raw.to_vec());
    assert!(NamespacedData::from_prefixed(8, &raw[..5]).is_none());

    let mut tree = Ncmt::new();
    tree.push(d).unwrap();
}
