// Property tests: every operation is checked against std's Vec as a model.

use proptest::prelude::*;
use vector::{Vector, VectorError};

fn build(values: &[i32]) -> Vector<i32> {
    Vector::from_slice(values).unwrap()
}

// Generate a non-empty list together with a valid index into it
prop_compose! {
    fn list_and_index()(values in prop::collection::vec(any::<i32>(), 1..64))
        (index in 0..values.len(), values in Just(values)) -> (Vec<i32>, usize) {
        (values, index)
    }
}

// Generate a non-empty list with an inclusive range inside it
prop_compose! {
    fn list_and_range()(values in prop::collection::vec(any::<i32>(), 1..64))
        (bounds in (0..values.len(), 0..values.len()), values in Just(values))
        -> (Vec<i32>, usize, usize) {
        let (a, b) = bounds;
        (values, a.min(b), a.max(b))
    }
}

proptest! {
    #[test]
    fn test_push_order(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let mut v = Vector::new();
        for &x in &values {
            v.push(x).unwrap();
        }
        prop_assert_eq!(v.len(), values.len());
        prop_assert!(v.len() <= v.capacity());
        for (p, x) in values.iter().enumerate() {
            prop_assert_eq!(v.at(p), Ok(x));
        }
    }

    #[test]
    fn test_push_pop_round_trip(values in prop::collection::vec(any::<i32>(), 0..64), extra: i32) {
        let mut v = build(&values);
        v.push(extra).unwrap();
        prop_assert_eq!(v.pop(), Some(extra));
        prop_assert_eq!(v.as_slice(), values.as_slice());
    }

    #[test]
    fn test_insert_remove_round_trip((values, p) in list_and_index(), extra: i32) {
        let mut v = build(&values);
        v.insert(extra, p).unwrap();
        prop_assert_eq!(v.at(p), Ok(&extra));
        prop_assert_eq!(v.remove(p), Ok(extra));
        prop_assert_eq!(v.as_slice(), values.as_slice());
    }

    #[test]
    fn test_clone_independent(values in prop::collection::vec(any::<i32>(), 0..64), extra: i32) {
        let original = build(&values);
        let mut copy = original.try_clone().unwrap();
        prop_assert!(original.equals(&copy));

        copy.push(extra).unwrap();
        copy.for_each(|x| *x = x.wrapping_add(1));
        prop_assert_eq!(original.as_slice(), values.as_slice());
    }

    #[test]
    fn test_remove_range_matches_drain((values, start, stop) in list_and_range()) {
        let mut v = build(&values);
        v.remove_range(start, stop).unwrap();

        let mut model = values.clone();
        model.drain(start..=stop);
        prop_assert_eq!(v.len(), values.len() - (stop - start + 1));
        prop_assert_eq!(v.as_slice(), model.as_slice());
    }

    #[test]
    fn test_filter_matches_retain(values in prop::collection::vec(0i32..10, 0..100), keep in 0i32..10) {
        let mut v = build(&values);
        v.filter(|_, x| *x < keep);

        let model: Vec<i32> = values.iter().copied().filter(|x| *x < keep).collect();
        prop_assert_eq!(v.as_slice(), model.as_slice());
    }

    #[test]
    fn test_map_doubles(values in prop::collection::vec(-1000i32..1000, 0..64)) {
        let v = build(&values);
        let mapped = v.map(|_, x| i64::from(*x) * 2).unwrap();
        prop_assert_eq!(mapped.len(), v.len());
        prop_assert_eq!(mapped.size(), mapped.capacity() * std::mem::size_of::<i64>());
        for (p, x) in values.iter().enumerate() {
            prop_assert_eq!(mapped.at(p), Ok(&(i64::from(*x) * 2)));
        }
    }

    #[test]
    fn test_bulk_ops_match_model(
        values in prop::collection::vec(any::<i32>(), 0..64),
        block in prop::collection::vec(any::<i32>(), 1..64),
        at in any::<prop::sample::Index>(),
    ) {
        let p = at.index(values.len() + 1);
        let mut v = build(&values);
        v.insert_n(&block, p).unwrap();

        let mut model = values.clone();
        model.splice(p..p, block.iter().copied());
        prop_assert_eq!(v.as_slice(), model.as_slice());

        v.push_n(&block).unwrap();
        model.extend_from_slice(&block);
        prop_assert_eq!(v.as_slice(), model.as_slice());
        prop_assert!(v.len() <= v.capacity());
    }

    #[test]
    fn test_out_of_bounds_is_harmless(values in prop::collection::vec(any::<i32>(), 0..32), past in 0usize..8) {
        let mut v = build(&values);
        let capacity = v.capacity();
        let p = values.len() + past;

        prop_assert!(v.at(p).is_err());
        prop_assert_eq!(v.remove(p), Err(VectorError::OutOfBounds { index: p, len: values.len() }));
        prop_assert!(v.assign(0, p).is_err());
        prop_assert!(v.swap(0, p).is_err());
        prop_assert!(v.remove_range(p, p).is_err());

        prop_assert_eq!(v.len(), values.len());
        prop_assert_eq!(v.capacity(), capacity);
        prop_assert_eq!(v.as_slice(), values.as_slice());
    }

    #[test]
    fn test_shrink_zero_then_push(values in prop::collection::vec(any::<i32>(), 1..64), extra: i32) {
        let mut v = build(&values);
        v.shrink(0).unwrap();
        prop_assert_eq!((v.len(), v.capacity()), (0, 0));

        v.push(extra).unwrap();
        prop_assert_eq!(v.as_slice(), &[extra]);
    }
}
