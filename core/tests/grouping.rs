use jigsnap_core::{is_complete, Links};

fn assert_equivalence(links: &Links) {
    let total = links.len();
    for a in 0..total {
        assert!(links.same_group(a, a));
        for b in 0..total {
            assert_eq!(links.same_group(a, b), links.same_group(b, a));
            if !links.same_group(a, b) {
                continue;
            }
            for c in 0..total {
                if links.same_group(b, c) {
                    assert!(links.same_group(a, c), "{a} ~ {b} ~ {c}");
                }
            }
        }
    }
}

#[test]
fn merges_form_a_partition_that_only_shrinks() {
    let mut links = Links::new(6);
    let mut previous = links.group_count();
    assert_eq!(previous, 6);
    for (a, b) in [(0, 1), (3, 4), (1, 0), (4, 5), (1, 3), (2, 2), (5, 0)] {
        links.merge(a, b);
        assert_equivalence(&links);
        let count = links.group_count();
        assert!(count <= previous);
        previous = count;
    }
    assert_eq!(links.groups(), vec![vec![0, 1, 3, 4, 5], vec![2]]);
    assert_eq!(links.group_id(5), Some(0));
}

#[test]
fn merge_order_does_not_change_the_partition() {
    let pairs = [(0, 1), (2, 3), (1, 2), (4, 5)];
    let mut forward = Links::new(6);
    for (a, b) in pairs {
        forward.merge(a, b);
    }
    let mut backward = Links::new(6);
    for (a, b) in pairs.iter().rev() {
        backward.merge(*b, *a);
    }
    assert_eq!(forward.groups(), backward.groups());
}

#[test]
fn two_by_two_needs_three_merges() {
    let mut links = Links::new(4);
    links.merge(0, 1);
    links.merge(0, 2);
    assert!(!links.is_fully_connected());
    assert_eq!(links.group_count(), 2);
    links.merge(1, 3);
    assert!(links.is_fully_connected());
    assert_eq!(links.group_count(), 1);
}

#[test]
fn two_pairs_are_not_complete() {
    let mut links = Links::new(4);
    links.merge(0, 1);
    links.merge(2, 3);
    assert!(!links.is_fully_connected());
    let sizes: Vec<usize> = links.groups().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![2, 2]);
}

#[test]
fn empty_store_is_never_complete() {
    assert!(!Links::new(0).is_fully_connected());
    assert!(!is_complete(&Default::default()));
}
