//! A minimal XMSS-SHA2_20_256 signer for tests, written directly over `sha2::Sha256` and the
//! RFC 8391 byte layout. It shares no code with the verifier.
//!
//! Only one leaf is ever used: the signer draws a W-OTS+ secret key for it, and a random
//! authentication path stands in for the rest of the tree. The root derived from both is a
//! public key under which the signature is valid.

#![allow(dead_code)]

use rand::prelude::*;
use sha2::{Digest, Sha256};
use xmss_verify::params::{XMSS_PK_BYTES, XMSS_SIG_BYTES};
use xmss_verify::{XmssPublicKey, XmssSignature};

pub const N: usize = 32;
pub const WOTS_LEN: usize = 67;
pub const TREE_HEIGHT: usize = 20;

const ADRS_TYPE_OTS: u32 = 0;
const ADRS_TYPE_LTREE: u32 = 1;
const ADRS_TYPE_HASH_TREE: u32 = 2;

type Bytes32 = [u8; N];

fn to_byte(x: u32) -> Bytes32 {
    let mut out = [0u8; N];
    out[N - 4..].copy_from_slice(&x.to_be_bytes());
    out
}

fn adrs_bytes(adrs: &[u32; 8]) -> Bytes32 {
    let mut out = [0u8; N];
    for (chunk, word) in out.chunks_exact_mut(4).zip(adrs) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

fn sha256(parts: &[&[u8]]) -> Bytes32 {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

fn xor(a: &Bytes32, b: &Bytes32) -> Bytes32 {
    let mut out = *a;
    out.iter_mut().zip(b).for_each(|(x, y)| *x ^= y);
    out
}

fn prf(seed: &Bytes32, adrs: &[u32; 8]) -> Bytes32 {
    sha256(&[&to_byte(3), seed, &adrs_bytes(adrs)])
}

fn f(seed: &Bytes32, adrs: &mut [u32; 8], x: &Bytes32) -> Bytes32 {
    adrs[7] = 0;
    let key = prf(seed, adrs);
    adrs[7] = 1;
    let mask = prf(seed, adrs);
    sha256(&[&to_byte(0), &key, &xor(x, &mask)])
}

fn rand_hash(seed: &Bytes32, adrs: &mut [u32; 8], left: &Bytes32, right: &Bytes32) -> Bytes32 {
    adrs[7] = 0;
    let key = prf(seed, adrs);
    adrs[7] = 1;
    let mask_left = prf(seed, adrs);
    adrs[7] = 2;
    let mask_right = prf(seed, adrs);
    sha256(&[&to_byte(1), &key, &xor(left, &mask_left), &xor(right, &mask_right)])
}

fn chain(seed: &Bytes32, adrs: &mut [u32; 8], x: &Bytes32, start: u32, steps: u32) -> Bytes32 {
    let mut out = *x;
    for j in start..start + steps {
        adrs[6] = j;
        out = f(seed, adrs, &out);
    }
    out
}

/// The 67 chain lengths a digest is signed with: 64 nibbles, high nibble first, then the three
/// nibbles of the checksum.
pub fn chain_lengths(digest: &Bytes32) -> [u8; WOTS_LEN] {
    let mut out = [0u8; WOTS_LEN];
    for (i, byte) in digest.iter().enumerate() {
        out[2 * i] = byte >> 4;
        out[2 * i + 1] = byte & 0x0f;
    }
    let csum: u32 = out[..64].iter().map(|&d| 15 - u32::from(d)).sum();
    let csum = csum << 4;
    out[64] = ((csum >> 12) & 0xf) as u8;
    out[65] = ((csum >> 8) & 0xf) as u8;
    out[66] = ((csum >> 4) & 0xf) as u8;
    out
}

pub fn h_msg(r: &Bytes32, root: &Bytes32, idx: u32, message: &[u8]) -> Bytes32 {
    sha256(&[&to_byte(2), r, root, &to_byte(idx), message])
}

fn ltree(seed: &Bytes32, idx: u32, mut nodes: Vec<Bytes32>) -> Bytes32 {
    let mut adrs = [0, 0, 0, ADRS_TYPE_LTREE, idx, 0, 0, 0];
    let mut len = nodes.len();
    let mut height = 0;
    while len > 1 {
        for i in 0..len / 2 {
            adrs[5] = height;
            adrs[6] = i as u32;
            nodes[i] = rand_hash(seed, &mut adrs, &nodes[2 * i], &nodes[2 * i + 1]);
        }
        if len % 2 == 1 {
            nodes[len / 2] = nodes[len - 1];
        }
        len = (len + 1) / 2;
        height += 1;
    }
    nodes[0]
}

fn root_from_path(seed: &Bytes32, idx: u32, leaf: &Bytes32, auth_path: &[Bytes32]) -> Bytes32 {
    let mut adrs = [0, 0, 0, ADRS_TYPE_HASH_TREE, 0, 0, 0, 0];
    let mut node = *leaf;
    for (k, sibling) in auth_path.iter().enumerate() {
        adrs[5] = k as u32;
        adrs[6] = idx >> (k + 1);
        node = if (idx >> k) & 1 == 0 {
            rand_hash(seed, &mut adrs, &node, sibling)
        } else {
            rand_hash(seed, &mut adrs, sibling, &node)
        };
    }
    node
}

/// A freshly generated single-leaf key.
pub struct TestKey {
    pub idx: u32,
    pub seed: Bytes32,
    pub root: Bytes32,
    wots_sk: Vec<Bytes32>,
    auth_path: Vec<Bytes32>,
}

impl TestKey {
    pub fn generate<R: Rng>(rng: &mut R, idx: u32) -> Self {
        let seed: Bytes32 = rng.gen();
        let wots_sk: Vec<Bytes32> = (0..WOTS_LEN).map(|_| rng.gen()).collect();
        let auth_path: Vec<Bytes32> = (0..TREE_HEIGHT).map(|_| rng.gen()).collect();

        let mut adrs = [0, 0, 0, ADRS_TYPE_OTS, idx, 0, 0, 0];
        let wots_pk = wots_sk
            .iter()
            .enumerate()
            .map(|(i, sk)| {
                adrs[5] = i as u32;
                chain(&seed, &mut adrs, sk, 0, 15)
            })
            .collect();
        let leaf = ltree(&seed, idx, wots_pk);
        let root = root_from_path(&seed, idx, &leaf, &auth_path);

        Self {
            idx,
            seed,
            root,
            wots_sk,
            auth_path,
        }
    }

    pub fn public_key(&self) -> XmssPublicKey {
        let mut out = [0u8; XMSS_PK_BYTES];
        out[..N].copy_from_slice(&self.root);
        out[N..].copy_from_slice(&self.seed);
        XmssPublicKey::from(out)
    }

    /// Signs `message` with randomness `r` as `idx || r || ots || auth_path`.
    pub fn sign_with_randomness(&self, message: &[u8], r: &Bytes32) -> XmssSignature {
        let digest = h_msg(r, &self.root, self.idx, message);
        let lengths = chain_lengths(&digest);

        let mut out = [0u8; XMSS_SIG_BYTES];
        out[..4].copy_from_slice(&self.idx.to_be_bytes());
        out[4..4 + N].copy_from_slice(r);

        let mut adrs = [0, 0, 0, ADRS_TYPE_OTS, self.idx, 0, 0, 0];
        let ots_start = 4 + N;
        for (i, sk) in self.wots_sk.iter().enumerate() {
            adrs[5] = i as u32;
            let node = chain(&self.seed, &mut adrs, sk, 0, u32::from(lengths[i]));
            out[ots_start + i * N..ots_start + (i + 1) * N].copy_from_slice(&node);
        }

        let auth_start = ots_start + WOTS_LEN * N;
        for (k, node) in self.auth_path.iter().enumerate() {
            out[auth_start + k * N..auth_start + (k + 1) * N].copy_from_slice(node);
        }
        XmssSignature::from(out)
    }

    pub fn sign<R: Rng>(&self, rng: &mut R, message: &[u8]) -> XmssSignature {
        let r: Bytes32 = rng.gen();
        self.sign_with_randomness(message, &r)
    }
}

/// A key at a random leaf together with a signature on `message`.
pub fn signed_fixture(seed: u64, message: &[u8]) -> (XmssPublicKey, XmssSignature) {
    let mut rng = StdRng::seed_from_u64(seed);
    let idx = rng.gen_range(0..1u32 << TREE_HEIGHT);
    let key = TestKey::generate(&mut rng, idx);
    let sig = key.sign(&mut rng, message);
    (key.public_key(), sig)
}
