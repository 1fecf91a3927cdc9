//! Determinism digest for settlement lists.
//!
//! Identical records in identical order must always produce the same
//! transfers in the same order. The `settlement_root` is a SHA-256 over the
//! ordered list, which lets snapshot tests and callers compare results
//! without diffing full payloads.

use groupsplit_types::Settlement;
use sha2::{Digest, Sha256};

/// Compute the settlement root hash over an ordered transfer list.
///
/// Depends on, in order: transfer count, then each transfer's payer, payee
/// and amount. Identifiers are length-prefixed so `("AB", "C")` and
/// `("A", "BC")` hash differently.
#[must_use]
pub fn compute_settlement_root(settlements: &[Settlement]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"groupsplit:settlement_root:v1:");
    hasher.update((settlements.len() as u64).to_le_bytes());

    for settlement in settlements {
        for id in [&settlement.from, &settlement.to] {
            let bytes = id.as_str().as_bytes();
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }
        hasher.update(settlement.amount.to_le_bytes());
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Verify that `settlements` hash to `expected_root`.
#[must_use]
pub fn verify_settlement_root(settlements: &[Settlement], expected_root: &[u8; 32]) -> bool {
    compute_settlement_root(settlements) == *expected_root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(from: &str, to: &str, amount: u64) -> Settlement {
        Settlement {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    #[test]
    fn empty_list_deterministic() {
        assert_eq!(compute_settlement_root(&[]), compute_settlement_root(&[]));
    }

    #[test]
    fn order_matters() {
        let t1 = transfer("B", "A", 10);
        let t2 = transfer("C", "A", 10);
        let root_ab = compute_settlement_root(&[t1.clone(), t2.clone()]);
        let root_ba = compute_settlement_root(&[t2, t1]);
        assert_ne!(root_ab, root_ba, "Order of transfers must affect root hash");
    }

    #[test]
    fn identifier_boundaries_matter() {
        let a = compute_settlement_root(&[transfer("AB", "C", 1)]);
        let b = compute_settlement_root(&[transfer("A", "BC", 1)]);
        assert_ne!(a, b);
    }

    #[test]
    fn amount_matters() {
        let a = compute_settlement_root(&[transfer("B", "A", 1)]);
        let b = compute_settlement_root(&[transfer("B", "A", 2)]);
        assert_ne!(a, b);
    }

    #[test]
    fn verify_roundtrip() {
        let list = vec![transfer("B", "A", 10_000)];
        let root = compute_settlement_root(&list);
        assert!(verify_settlement_root(&list, &root));
        assert!(!verify_settlement_root(&list, &[0xAB; 32]));
    }
}
