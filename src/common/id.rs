use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_UID: AtomicU64 = AtomicU64::new(1);

/// Take the next process-wide unique node id.
///
/// Ids are strictly increasing and never reused, including across documents
/// and for cloned nodes.
#[inline]
pub fn next_node_uid() -> u64 {
    NEXT_NODE_UID.fetch_add(1, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_uids_are_increasing() {
        let a = next_node_uid();
        let b = next_node_uid();
        assert!(b > a);
    }

    #[test]
    fn test_node_uids_unique_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..256).map(|_| next_node_uid()).collect::<Vec<_>>()))
            .collect();
        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let len = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), len);
    }
}
