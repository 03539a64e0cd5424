//! Property tests for FileCache against a simple recency model

use std::collections::VecDeque;

use filecache::{Error, FileCache};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Put(u8),
    Get(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![(0u8..16).prop_map(Op::Put), (0u8..16).prop_map(Op::Get)]
}

fn key(k: u8) -> String {
    format!("/file{}.txt", k)
}

proptest! {
    #[test]
    fn test_matches_recency_model(
        max_size in 1usize..8,
        ops in prop::collection::vec(op(), 0..200),
    ) {
        let mut cache = FileCache::new(max_size, 0).unwrap();
        // front = most recently used
        let mut model: VecDeque<String> = VecDeque::new();

        for op in ops {
            match op {
                Op::Put(k) => {
                    let key = key(k);
                    let result = cache.put(&key, "text/plain", key.as_bytes());
                    if model.contains(&key) {
                        prop_assert_eq!(result, Err(Error::DuplicateKey(key)));
                    } else {
                        model.push_front(key);
                        let expected = if model.len() > max_size { model.pop_back() } else { None };
                        prop_assert_eq!(result.unwrap().map(|f| f.key), expected);
                    }
                }
                Op::Get(k) => {
                    let key = key(k);
                    let found = cache.get(&key).map(|view| view.payload().to_vec());
                    match model.iter().position(|m| *m == key) {
                        Some(pos) => {
                            prop_assert_eq!(found, Some(key.clone().into_bytes()));
                            model.remove(pos);
                            model.push_front(key);
                        }
                        None => prop_assert!(found.is_none()),
                    }
                }
            }

            prop_assert!(cache.len() <= max_size);
            prop_assert!(cache.check_invariants().is_ok());
            prop_assert_eq!(
                cache.keys_by_recency(),
                model.iter().map(String::as_str).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_distinct_puts_evict_oldest(max_size in 1usize..16) {
        let mut cache = FileCache::new(max_size, 0).unwrap();

        for k in 0..=max_size {
            cache.put(&format!("k{}", k), "text/plain", b"x").unwrap();
            prop_assert!(cache.len() <= max_size);
        }

        prop_assert!(cache.get("k0").is_none());
        for k in 1..=max_size {
            let key = format!("k{}", k);
            prop_assert!(cache.get(&key).is_some());
        }
    }

    #[test]
    fn test_round_trip_survives_buffer_mutation(
        payload in prop::collection::vec(any::<u8>(), 0..512),
        content_type in "[a-z]{1,8}/[a-z0-9.+-]{1,16}",
    ) {
        let mut cache = FileCache::new(4, 0).unwrap();
        let mut buf = payload.clone();
        let mut key = String::from("/data.bin");

        cache.put(&key, &content_type, &buf).unwrap();
        buf.iter_mut().for_each(|b| *b = !*b);
        buf.clear();
        key.push_str(".changed");

        let view = cache.get("/data.bin").unwrap();
        prop_assert_eq!(view.content_type(), content_type.as_str());
        prop_assert_eq!(view.payload(), payload.as_slice());
        prop_assert_eq!(view.len(), payload.len());
    }

    #[test]
    fn test_destroy_releases_resident_records(
        max_size in 1usize..10,
        count in 0usize..30,
    ) {
        let mut cache = FileCache::new(max_size, 0).unwrap();
        for k in 0..count {
            cache.put(&format!("k{}", k), "text/plain", b"x").unwrap();
        }

        prop_assert_eq!(cache.destroy(), count.min(max_size));
    }
}

#[test]
fn test_empty_cache_misses() {
    let mut cache = FileCache::new(3, 0).unwrap();

    for k in 0..16 {
        assert!(cache.get(&key(k)).is_none());
    }
    assert!(cache.is_empty());
    assert_eq!(cache.stats().misses(), 16);
}

#[test]
fn test_promotion_on_hit() {
    let mut cache = FileCache::new(3, 0).unwrap();
    cache.put("A", "text/plain", b"a").unwrap();
    cache.put("B", "text/plain", b"b").unwrap();
    cache.put("C", "text/plain", b"c").unwrap();

    cache.get("A").unwrap();
    cache.put("D", "text/plain", b"d").unwrap();

    assert!(cache.get("B").is_none());
    assert!(cache.get("A").is_some());
    assert!(cache.get("C").is_some());
    assert!(cache.get("D").is_some());
}
