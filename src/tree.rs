//! Hash trees of XMSS: the L-tree that compresses a W-OTS+ public key into a leaf, and the main
//! Merkle tree whose root is recomputed from a leaf and its authentication path.
//!
//! Both combine nodes with [`XmssHasher::hash2`]. The address level is the height of the node
//! being produced minus one, and the level index is the position of that node within its level.

use crate::adrs::{Adrs, AdrsType};
use crate::hash::sha256::bytes_to_words;
use crate::hash::{Node, XmssHasher};
use crate::params::XMSS_N;

/// Folds `nodes` pairwise into a single node, in place, following the L-tree schedule.
///
/// Each round combines `nodes[2i]` and `nodes[2i + 1]` into `nodes[i]`. When a round has an odd
/// number of nodes the last one is lifted unchanged into the next round. `combine` receives the
/// round (starting at 0), the output index within the round and the two inputs. `n` nodes
/// always take exactly `n - 1` combinations.
pub fn ltree_fold<F>(nodes: &mut [Node], mut combine: F) -> Node
where
    F: FnMut(u32, u32, &Node, &Node) -> Node,
{
    debug_assert!(!nodes.is_empty());

    let mut len = nodes.len();
    let mut level = 0u32;
    while len > 1 {
        let half = len / 2;
        for i in 0..half {
            let (left, right) = (nodes[2 * i], nodes[2 * i + 1]);
            nodes[i] = combine(level, i as u32, &left, &right);
        }
        if len % 2 == 1 {
            nodes[half] = nodes[len - 1];
        }
        len = len.div_ceil(2);
        level += 1;
    }

    nodes.first().copied().unwrap_or_default()
}

/// Compresses a W-OTS+ public key into its Merkle leaf. `pk` is used as working space and
/// holds garbage afterwards.
///
/// `adrs` must carry the leaf index as its context; the type is forced to L-tree.
pub fn ltree_hash_ots(hasher: &XmssHasher, pk: &mut [Node], adrs: &mut Adrs) -> Node {
    adrs.set_type(AdrsType::LTree);
    ltree_fold(pk, |level, index, left, right| {
        adrs.set_level(level);
        adrs.set_level_idx(index);
        hasher.hash2(left, right, adrs)
    })
}

/// Climbs from `leaf` to the root of the main tree using the sibling nodes of `auth_path`.
///
/// `adrs` must hold the leaf index as its level index; the type is forced to hash tree. Bit `k`
/// of the leaf index tells whether the running node is the left (0) or right (1) child at
/// height `k`.
pub fn root_from_auth_path(
    hasher: &XmssHasher,
    adrs: &mut Adrs,
    leaf: Node,
    auth_path: &[[u8; XMSS_N]],
) -> Node {
    adrs.set_type(AdrsType::HashTree);
    let idx = adrs.level_idx();

    let mut node = leaf;
    for (k, sibling) in auth_path.iter().enumerate() {
        let sibling = bytes_to_words(sibling);
        adrs.set_level(k as u32);
        adrs.set_level_idx(adrs.level_idx() >> 1);
        node = if (idx >> k) & 1 == 0 {
            hasher.hash2(&node, &sibling, adrs)
        } else {
            hasher.hash2(&sibling, &node, adrs)
        };
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256::words_to_bytes;
    use crate::params::{XMSS_TREE_HEIGHT, XMSS_WOTS_LEN};
    use rand::prelude::*;

    fn leaf_ids(n: usize) -> Vec<Node> {
        (0..n as u32).map(|i| [i, 0, 0, 0, 0, 0, 0, 0]).collect()
    }

    #[test]
    fn test_ltree_fold_takes_n_minus_one_combinations() {
        for n in 1..=100 {
            let mut nodes = leaf_ids(n);
            let mut calls = 0;
            ltree_fold(&mut nodes, |_, _, left, _| {
                calls += 1;
                *left
            });
            assert_eq!(calls, n - 1, "{} leaves", n);
        }
    }

    #[test]
    fn test_ltree_fold_schedule_for_wots_len() {
        let mut nodes = leaf_ids(XMSS_WOTS_LEN);
        let mut per_level = Vec::new();
        ltree_fold(&mut nodes, |level, index, left, _| {
            let level = level as usize;
            if per_level.len() <= level {
                per_level.push(0);
            }
            assert_eq!(index, per_level[level]);
            per_level[level] += 1;
            *left
        });
        assert_eq!(per_level, vec![33, 17, 8, 4, 2, 1, 1]);
        assert_eq!(per_level.iter().sum::<u32>(), 66);
    }

    #[test]
    fn test_ltree_fold_lifts_odd_node() {
        // Each combination records (level, index, left id, right id) and returns a fresh id.
        let mut calls = Vec::new();
        let mut nodes = leaf_ids(5);
        let mut next_id = 100;
        let root = ltree_fold(&mut nodes, |level, index, left, right| {
            calls.push((level, index, left[0], right[0]));
            next_id += 1;
            [next_id, 0, 0, 0, 0, 0, 0, 0]
        });

        // Round 0: (0,1)->101, (2,3)->102, 4 lifted. Round 1: (101,102)->103, 4 lifted.
        // Round 2: (103,4)->104.
        assert_eq!(
            calls,
            vec![
                (0, 0, 0, 1),
                (0, 1, 2, 3),
                (1, 0, 101, 102),
                (2, 0, 103, 4)
            ]
        );
        assert_eq!(root[0], 104);
    }

    #[test]
    fn test_ltree_hash_ots_depends_on_leaf_context() {
        let mut rng = thread_rng();
        let hasher = XmssHasher::new(&rng.gen());
        let pk: Vec<Node> = (0..XMSS_WOTS_LEN).map(|_| rng.gen()).collect();

        let mut adrs = Adrs::from(AdrsType::Ots);
        adrs.set_context_idx(5);
        let leaf = ltree_hash_ots(&hasher, &mut pk.clone(), &mut adrs);
        assert_eq!(adrs.level(), 6);

        let mut adrs = Adrs::from(AdrsType::LTree);
        adrs.set_context_idx(5);
        assert_eq!(ltree_hash_ots(&hasher, &mut pk.clone(), &mut adrs), leaf);

        let mut adrs = Adrs::from(AdrsType::LTree);
        adrs.set_context_idx(6);
        assert_ne!(ltree_hash_ots(&hasher, &mut pk.clone(), &mut adrs), leaf);
    }

    fn root_for(hasher: &XmssHasher, idx: u32, leaf: Node, auth_path: &[[u8; XMSS_N]]) -> Node {
        let mut adrs = Adrs::from(AdrsType::HashTree);
        adrs.set_level_idx(idx);
        root_from_auth_path(hasher, &mut adrs, leaf, auth_path)
    }

    #[test]
    fn test_sibling_leaves_share_root() {
        let mut rng = thread_rng();
        let hasher = XmssHasher::new(&rng.gen());
        let left_leaf: Node = rng.gen();
        let right_leaf: Node = rng.gen();
        let pair_idx = rng.gen_range(0..1u32 << (XMSS_TREE_HEIGHT - 1));

        let path: [[u8; XMSS_N]; XMSS_TREE_HEIGHT] = rng.gen();

        let mut left_path = path;
        left_path[0] = words_to_bytes(&right_leaf);
        let mut right_path = path;
        right_path[0] = words_to_bytes(&left_leaf);

        let root = root_for(&hasher, 2 * pair_idx, left_leaf, &left_path);
        assert_eq!(root_for(&hasher, 2 * pair_idx + 1, right_leaf, &right_path), root);

        // The same leaf placed on the other side of its sibling lands elsewhere.
        assert_ne!(root_for(&hasher, 2 * pair_idx + 1, left_leaf, &left_path), root);
    }

    #[test]
    fn test_root_depends_on_every_auth_node() {
        let mut rng = thread_rng();
        let hasher = XmssHasher::new(&rng.gen());
        let leaf: Node = rng.gen();
        let idx = rng.gen_range(0..1u32 << XMSS_TREE_HEIGHT);
        let path: [[u8; XMSS_N]; XMSS_TREE_HEIGHT] = rng.gen();

        let root = root_for(&hasher, idx, leaf, &path);
        for k in 0..XMSS_TREE_HEIGHT {
            let mut tampered = path;
            tampered[k][0] ^= 0x80;
            assert_ne!(root_for(&hasher, idx, leaf, &tampered), root, "auth node {}", k);
        }
    }
}
