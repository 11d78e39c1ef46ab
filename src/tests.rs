/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#[cfg(test)]
mod rand_tests {
    use rand::distributions::{Distribution, Uniform};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use std::collections::BTreeMap;
    use std::ops::Bound::{Excluded, Included, Unbounded};

    use crate::{Handle, SplayMap};

    struct Env<'a, 'b, 'c> {
        rng: &'a mut StdRng,
        splay: &'b mut SplayMap<u32, u32>,
        btree: &'c mut BTreeMap<u32, u32>,
        key_dist: Uniform<u32>,
    }

    #[derive(Default)]
    struct OpNum {
        insert: usize,
        erase: usize,
        erase_at: usize,
        lower_bound: usize,
        upper_bound: usize,
        find: usize,
    }

    impl OpNum {
        fn total(&self) -> usize {
            self.insert
                + self.erase
                + self.erase_at
                + self.lower_bound
                + self.upper_bound
                + self.find
        }
    }

    fn entry_of(env: &Env, h: Handle) -> Option<(u32, u32)> {
        env.splay.entry(h).map(|(k, v)| (*k, *v))
    }

    fn try_insert(env: &mut Env, key: u32, value: u32) {
        let (h, inserted) = env.splay.insert(key, value);
        let std_inserted = !env.btree.contains_key(&key);
        if std_inserted {
            env.btree.insert(key, value);
        }
        assert_eq!(inserted, std_inserted);
        assert_eq!(entry_of(env, h), Some((key, env.btree[&key])));
    }

    fn erase(env: &mut Env, key: u32) {
        let std_erased = env.btree.remove(&key).map_or(0, |_| 1);
        assert_eq!(env.splay.erase(&key), std_erased);
        assert!(env.splay.find(&key).is_end());
    }

    fn erase_at(env: &mut Env, key: u32) {
        let h = env.splay.find(&key);
        if h.is_end() {
            assert!(!env.btree.contains_key(&key));
            return;
        }
        env.btree.remove(&key);
        let next = env.splay.erase_at(h);
        let std_next = env
            .btree
            .range((Excluded(key), Unbounded))
            .next()
            .map(|(k, v)| (*k, *v));
        assert_eq!(entry_of(env, next), std_next);
        assert_eq!(env.splay.entry(h), None);
    }

    fn lower_bound(env: &mut Env, key: u32) {
        let std_ret = env
            .btree
            .range((Included(key), Unbounded))
            .next()
            .map(|(k, v)| (*k, *v));
        let h = env.splay.lower_bound_no_splay(&key);
        assert_eq!(entry_of(env, h), std_ret);
        let h = env.splay.lower_bound(&key);
        assert_eq!(entry_of(env, h), std_ret);
    }

    fn upper_bound(env: &mut Env, key: u32) {
        let std_ret = env
            .btree
            .range((Excluded(key), Unbounded))
            .next()
            .map(|(k, v)| (*k, *v));
        let h = env.splay.upper_bound_no_splay(&key);
        assert_eq!(entry_of(env, h), std_ret);
        let h = env.splay.upper_bound(&key);
        assert_eq!(entry_of(env, h), std_ret);
    }

    fn find(env: &mut Env, key: u32) {
        let std_ret = env.btree.get(&key).map(|v| (key, *v));
        let h = env.splay.find(&key);
        assert_eq!(entry_of(env, h), std_ret);
        assert_eq!(env.splay.count(&key), std_ret.map_or(0, |_| 1));
    }

    fn rand_op(mut num: OpNum, max_key: u32) {
        let mut rng = StdRng::seed_from_u64(233);
        let mut splay = SplayMap::<u32, u32>::new();
        let mut btree = BTreeMap::<u32, u32>::new();
        let mut env = Env {
            rng: &mut rng,
            splay: &mut splay,
            btree: &mut btree,
            key_dist: Uniform::new_inclusive(0, max_key),
        };
        let mut step = 0usize;
        while num.total() > 0 {
            assert_eq!(env.splay.len(), env.btree.len());
            step += 1;
            if step % 97 == 0 {
                env.splay.check_sanity();
            }
            let op_dist = Uniform::from(0..num.total());
            let mut rand_num = op_dist.sample(env.rng);
            let key = env.key_dist.sample(env.rng);
            if rand_num < num.insert {
                num.insert -= 1;
                let value = env.key_dist.sample(env.rng);
                try_insert(&mut env, key, value);
                continue;
            }
            rand_num -= num.insert;
            if rand_num < num.erase {
                num.erase -= 1;
                erase(&mut env, key);
                continue;
            }
            rand_num -= num.erase;
            if rand_num < num.erase_at {
                num.erase_at -= 1;
                erase_at(&mut env, key);
                continue;
            }
            rand_num -= num.erase_at;
            if rand_num < num.lower_bound {
                num.lower_bound -= 1;
                lower_bound(&mut env, key);
                continue;
            }
            rand_num -= num.lower_bound;
            if rand_num < num.upper_bound {
                num.upper_bound -= 1;
                upper_bound(&mut env, key);
                continue;
            }
            rand_num -= num.upper_bound;
            if rand_num < num.find {
                num.find -= 1;
                find(&mut env, key);
                continue;
            }
            unreachable!();
        }
        env.splay.check_sanity();
        assert!(env
            .splay
            .iter()
            .map(|(k, v)| (*k, *v))
            .eq(env.btree.iter().map(|(k, v)| (*k, *v))));
    }

    fn rand_mixed(magnitude: u32) {
        let n = 10usize.pow(magnitude);
        rand_op(
            OpNum {
                insert: 2 * n,
                erase: n / 2,
                erase_at: n / 2,
                lower_bound: n,
                upper_bound: n,
                find: n,
            },
            n as u32,
        );
    }

    #[test]
    fn rand_mixed_1e1() {
        rand_mixed(1);
    }
    #[test]
    fn rand_mixed_1e2() {
        rand_mixed(2);
    }
    #[test]
    fn rand_mixed_1e3() {
        rand_mixed(3);
    }
    #[test]
    fn rand_mixed_1e4() {
        rand_mixed(4);
    }

    #[test]
    fn insert_then_erase_all_in_any_order() {
        let mut rng = StdRng::seed_from_u64(233);
        for n in [1usize, 2, 10, 300] {
            let mut keys: Vec<usize> = (0..n).collect();
            keys.shuffle(&mut rng);
            let mut splay: SplayMap<usize, ()> = keys.iter().map(|&k| (k, ())).collect();
            assert_eq!(splay.len(), n);
            keys.shuffle(&mut rng);
            for k in &keys {
                assert_eq!(splay.erase(k), 1);
            }
            assert!(splay.is_empty());
            assert_eq!(splay.len(), 0);
            assert_eq!(splay.begin(), splay.end());
        }
    }

    #[test]
    fn splaying_keeps_handles_and_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut keys: Vec<u32> = (0..200).collect();
        keys.shuffle(&mut rng);
        let mut splay = SplayMap::new();
        let handles: Vec<(Handle, u32)> = keys
            .iter()
            .map(|&k| (splay.insert(k, k * 10).0, k))
            .collect();
        let dist = Uniform::new(0, 250);
        for _ in 0..1000 {
            let k = dist.sample(&mut rng);
            splay.find(&k);
            splay.lower_bound(&k);
            splay.upper_bound(&k);
        }
        assert_eq!(splay.len(), 200);
        for (h, k) in handles {
            assert_eq!(splay.entry(h), Some((&k, &(k * 10))));
        }
        assert!(splay.keys().copied().eq(0..200));
        splay.check_sanity();
    }
}

#[cfg(test)]
mod scenarios {
    use compare::{natural, Compare};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use crate::{Error, Key, SplayMap, SplaySet, SplayTree, Violation};

    fn shuffled_set() -> SplaySet<i32> {
        let mut v: Vec<i32> = (0..58).collect();
        v.shuffle(&mut StdRng::seed_from_u64(233));
        v.into_iter().collect()
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut set = shuffled_set();
        assert_eq!(set.len(), 58);
        let (h, inserted) = set.insert(30);
        assert!(!inserted);
        assert_eq!(set.get(h), Some(&30));
        assert!(!set.insert(30).1);
        assert_eq!(set.len(), 58);
    }

    #[test]
    fn bounds_delimit_range() {
        let mut set = shuffled_set();
        let lo = set.lower_bound(&50);
        let hi = set.upper_bound(&100);
        assert!(hi.is_end());
        let got: Vec<i32> = set.range(lo, hi).copied().collect();
        assert_eq!(got, (50..58).collect::<Vec<_>>());
        let got: Vec<i32> = set.range(lo, hi).rev().copied().collect();
        assert_eq!(got, (50..58).rev().collect::<Vec<_>>());

        let lo = set.lower_bound_no_splay(&-5);
        let hi = set.lower_bound_no_splay(&3);
        assert_eq!(set.range(lo, hi).count(), 3);
    }

    #[test]
    fn erase_by_key() {
        let mut set = shuffled_set();
        assert_eq!(set.erase(&53), 1);
        assert!(set.find(&53).is_end());
        assert_eq!(set.erase(&53), 0);
        assert_eq!(set.len(), 57);
        assert_eq!(set.count(&53), 0);
        assert_eq!(set.count(&54), 1);
        set.check_sanity();
    }

    #[test]
    fn erase_from_begin() {
        let mut set = shuffled_set();
        for _ in 0..30 {
            let begin = set.begin();
            set.erase_at(begin);
        }
        assert_eq!(set.len(), 28);
        assert!(set.iter().copied().eq(30..58));
    }

    #[test]
    fn erase_everything() {
        let mut set = shuffled_set();
        let (begin, end) = (set.begin(), set.end());
        assert!(set.erase_range(begin, end).is_end());
        assert!(set.is_empty());
        let begin = set.begin();
        assert!(set.erase_range(begin, begin).is_end());
    }

    #[test]
    fn erase_middle_range() {
        let mut set = shuffled_set();
        let first = set.lower_bound(&10);
        let last = set.lower_bound(&20);
        let ret = set.erase_range(first, last);
        assert_eq!(ret, last);
        assert_eq!(set.get(ret), Some(&20));
        assert_eq!(set.get(first), None);
        assert_eq!(set.len(), 48);
        assert!(set.iter().copied().eq((0..10).chain(20..58)));
        set.check_sanity();
    }

    #[test]
    fn reversed_range_is_empty() {
        let set = shuffled_set();
        let lo = set.lower_bound_no_splay(&5);
        let hi = set.lower_bound_no_splay(&3);
        assert_eq!(set.range(lo, hi).count(), 0);
        assert_eq!(set.range(lo, hi).next_back(), None);
        assert_eq!(set.range(lo, lo).count(), 0);
        assert_eq!(set.range(hi, lo).copied().collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(set.range(set.end(), lo).count(), 0);
    }

    #[test]
    fn bounds_splay_only_their_result() {
        let mut set: SplaySet<i32> = (0..20).collect();
        let h = set.lower_bound(&7);
        assert_eq!(set.get(h), Some(&7));
        assert_eq!(set.dump().lines().next(), Some("7"));
        let h = set.upper_bound(&12);
        assert_eq!(set.get(h), Some(&13));
        assert_eq!(set.dump().lines().next(), Some("13"));

        let before = set.dump();
        assert!(set.upper_bound(&19).is_end());
        assert!(set.lower_bound(&100).is_end());
        assert_eq!(set.dump(), before);
        set.check_sanity();
    }

    #[test]
    fn erase_by_split() {
        let mut set = shuffled_set();
        let kept = set.find(&40);
        let gone = set.find(&10);
        assert_eq!(set.erase_before(&20), 20);
        assert_eq!(set.first(), Some(&20));
        assert_eq!(set.get(gone), None);
        assert_eq!(set.erase_from(&50), 8);
        assert_eq!(set.last(), Some(&49));
        assert_eq!(set.get(kept), Some(&40));
        assert_eq!(set.len(), 30);
        set.check_sanity();
        assert_eq!(set.erase_from(&100), 0);
        assert_eq!(set.erase_before(&0), 0);
        assert_eq!(set.erase_before(&100), 30);
        assert!(set.is_empty());
    }

    #[test]
    fn scoped_keys_slice() {
        let mut map = SplayMap::new();
        map.insert((2, "x".to_owned()), 'c');
        map.insert((1, "x".to_owned()), 'a');
        map.insert((1, "y".to_owned()), 'b');
        map.insert((3, "a".to_owned()), 'd');
        assert_eq!(map.len(), 4);
        let lo = map.lower_bound(&(1, String::new()));
        let hi = map.lower_bound(&(2, String::new()));
        let got: Vec<char> = map.range(lo, hi).map(|(_, v)| *v).collect();
        assert_eq!(got, vec!['a', 'b']);
    }

    #[test]
    fn erase_at_returns_successor() {
        let mut set: SplaySet<i32> = [1, 3, 5, 7].into();
        let h = set.find(&3);
        let next = set.erase_at(h);
        assert_eq!(set.get(next), Some(&5));
        assert_eq!(set.get(h), None);
        let last = set.find(&7);
        assert!(set.erase_at(last).is_end());
        let (value, next) = set.remove_at(set.begin());
        assert_eq!((value, set.get(next)), (1, Some(&5)));
    }

    #[test]
    fn bad_handles_are_reported() {
        let mut set: SplaySet<i32> = [1, 2, 3].into();
        let other: SplaySet<i32> = [1, 2, 3].into();
        let h = set.find(&2);
        set.erase_at(h);
        assert_eq!(
            set.try_erase_at(h),
            Err(Error::InvariantViolation(Violation::StaleHandle))
        );
        assert_eq!(
            set.try_erase_at(other.begin()),
            Err(Error::InvariantViolation(Violation::ForeignHandle))
        );
        assert_eq!(
            set.try_erase_at(set.end()),
            Err(Error::InvariantViolation(Violation::EndHandle))
        );
        assert_eq!(set.get(other.begin()), None);
        assert_eq!(set.len(), 2);
    }

    #[test]
    #[should_panic(expected = "erasing the end handle")]
    fn erasing_end_panics() {
        let mut set: SplaySet<i32> = [1].into();
        let end = set.end();
        set.erase_at(end);
    }

    #[test]
    fn clear_invalidates_handles() {
        let mut set: SplaySet<i32> = [4, 2, 6].into();
        let h = set.find(&4);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.get(h), None);
        set.insert(4);
        assert_eq!(set.get(h), None);
        assert_eq!(set.len(), 1);
        set.check_sanity();
    }

    #[test]
    fn stepping_handles() {
        let set: SplaySet<i32> = [10, 20, 30].into();
        let mut h = set.begin();
        let mut seen = Vec::new();
        while h != set.end() {
            seen.push(*set.get(h).unwrap());
            h = set.next(h);
        }
        assert_eq!(seen, vec![10, 20, 30]);
        assert_eq!(set.next(set.end()), set.end());
        let last = set.prev(set.end());
        assert_eq!(set.get(last), Some(&30));
        assert!(set.prev(set.begin()).is_end());
        assert_eq!(set.first(), Some(&10));
        assert_eq!(set.last(), Some(&30));
    }

    #[test]
    fn no_splay_queries_keep_shape() {
        let set: SplaySet<i32> = (0..20).collect();
        let before = set.dump();
        assert!(!set.find_no_splay(&7).is_end());
        assert!(set.find_no_splay(&70).is_end());
        assert!(set.contains(&3));
        let (lo, hi) = set.equal_range_no_splay(&7);
        assert_eq!(set.range(lo, hi).copied().collect::<Vec<_>>(), vec![7]);
        assert_eq!(set.count_no_splay(&7), 1);
        assert_eq!(set.dump(), before);
    }

    #[test]
    fn equal_range_spans_one() {
        let mut set: SplaySet<i32> = (0..20).step_by(2).collect();
        let (lo, hi) = set.equal_range(&8);
        assert_eq!(set.range(lo, hi).copied().collect::<Vec<_>>(), vec![8]);
        let (lo, hi) = set.equal_range(&9);
        assert_eq!(lo, hi);
        assert_eq!(set.get(lo), Some(&10));
    }

    #[test]
    fn bulk_construction_keeps_first() {
        let map: SplayMap<i32, &str> = [(1, "a"), (2, "b"), (1, "c")].into();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1), Some(&"a"));
    }

    #[test]
    fn map_access() {
        let mut map: SplayMap<&str, i32> = SplayMap::new();
        map.insert("one", 1);
        map.insert("two", 2);
        assert_eq!(map.at(&"one"), Ok(&1));
        assert_eq!(map.at(&"three"), Err(Error::KeyNotFound));
        *map.at_mut(&"two").unwrap() += 20;
        assert_eq!(map.get(&"two"), Some(&22));

        let h = map.find(&"one");
        *map.value_mut(h).unwrap() = 100;
        assert_eq!(map.entry(h), Some((&"one", &100)));

        *map.get_or_insert_with("three", || 0) += 3;
        *map.get_or_insert_with("three", || 0) += 3;
        assert_eq!(map.get(&"three"), Some(&6));
        assert_eq!(map.remove(&"three"), Some(6));
        assert_eq!(map.remove_entry(&"two"), Some(("two", 22)));
        assert_eq!(format!("{:?}", map), r#"{"one": 100}"#);
    }

    #[test]
    fn custom_order() {
        let mut set = SplaySet::with_cmp(natural().rev());
        set.extend([3, 1, 2]);
        assert!(set.iter().copied().eq([3, 2, 1]));
        let h = set.lower_bound(&2);
        assert_eq!(set.get(h), Some(&2));
        let h = set.upper_bound(&2);
        assert_eq!(set.get(h), Some(&1));
        assert!(set.comparator().compares_lt(&3, &1));
    }

    #[test]
    fn whole_container_comparison() {
        let a: SplaySet<i32> = [1, 2].into();
        let b: SplaySet<i32> = [1, 3].into();
        let c: SplaySet<i32> = [1, 2, 0].into();
        assert!(a < b);
        assert!(c < a);
        assert!(a != b);
        assert_eq!(a, a.clone());
        let mut d = a.clone();
        d.insert(5);
        assert!(a < d);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn owned_iteration() {
        let set: SplaySet<i32> = [5, 1, 4, 2, 3].into();
        assert_eq!(set.clone().into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(set.into_iter().rev().collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
        let mut set: SplaySet<i32> = [2, 1].into();
        assert_eq!(set.pop_last(), Some(2));
        assert_eq!(set.pop_first(), Some(1));
        assert_eq!(set.pop_first(), None);
    }

    #[test]
    fn dump_shape() {
        let mut set = SplaySet::new();
        set.insert(1);
        set.insert(2);
        // The last insertion is the root.
        assert_eq!(set.dump(), "2\n    1\n    /\\\n");
    }

    #[test]
    fn records_with_their_own_key() {
        #[derive(Debug, PartialEq)]
        struct Record {
            id: u32,
            hits: u32,
        }
        impl Key<u32> for Record {
            fn key(&self) -> &u32 {
                &self.id
            }
        }
        let mut tree = SplayTree::<u32, Record>::new();
        for id in [3, 1, 2, 1] {
            let (h, _) = tree.insert(Record { id, hits: 0 });
            tree.get_mut(h).unwrap().hits += 1;
        }
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get_by_key(&1), Some(&Record { id: 1, hits: 2 }));
        assert_eq!(
            tree.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(tree.remove(&2).map(|r| r.hits), Some(1));
        tree.check_sanity();
    }
}
