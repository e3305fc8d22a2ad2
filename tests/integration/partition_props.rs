use proptest::prelude::*;
use sqleq_symtab::chunkify;

proptest! {
    #[test]
    fn chunks_concatenate_to_input(items in proptest::collection::vec(any::<u16>(), 0..200), n in 1usize..40) {
        let chunks = chunkify(&items, n).unwrap();
        prop_assert_eq!(chunks.len(), n);
        let joined: Vec<u16> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
        prop_assert_eq!(joined, items);
    }

    #[test]
    fn larger_chunks_come_first(items in proptest::collection::vec(any::<u8>(), 0..200), n in 1usize..40) {
        let chunks = chunkify(&items, n).unwrap();
        let small = items.len() / n;
        let remainder = items.len() % n;

        for (i, chunk) in chunks.iter().enumerate() {
            let expected = if i < remainder { small + 1 } else { small };
            prop_assert_eq!(chunk.len(), expected);
        }
    }

    #[test]
    fn zero_workers_always_rejected(items in proptest::collection::vec(any::<u8>(), 0..20)) {
        prop_assert!(chunkify(&items, 0).is_err());
    }
}
