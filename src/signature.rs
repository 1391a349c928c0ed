//! Transaction integrity signatures
//!
//! Every transaction row carries an HMAC-SHA256 over
//! `from|to|amount-with-2-decimals`, keyed with a per-deployment secret.
//! A stored record whose signature no longer recomputes has been altered
//! outside this system. The byte layout must stay stable: existing signed
//! rows are verified against it.

use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use sha2::Sha256;

use crate::core_types::AccountId;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies transaction records with the deployment HMAC secret.
#[derive(Clone)]
pub struct TransactionSigner {
    key: Vec<u8>,
}

impl TransactionSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    fn payload(from: AccountId, to: AccountId, amount: Decimal) -> String {
        format!("{}|{}|{:.2}", from, to, amount)
    }

    /// Compute the hex-encoded signature for a transfer tuple.
    pub fn sign(&self, from: AccountId, to: AccountId, amount: Decimal) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length");
        mac.update(Self::payload(from, to, amount).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verify a stored signature against the record's own fields.
    ///
    /// Comparison is constant-time via the Mac verifier.
    pub fn verify(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        signature: &str,
    ) -> bool {
        let Ok(raw) = hex::decode(signature) else {
            return false;
        };
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length");
        mac.update(Self::payload(from, to, amount).as_bytes());
        mac.verify_slice(&raw).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TransactionSigner {
        TransactionSigner::new("test-secret")
    }

    #[test]
    fn test_sign_is_deterministic() {
        let (from, to) = (AccountId::new(), AccountId::new());
        let amount = Decimal::new(10050, 2); // 100.50
        assert_eq!(signer().sign(from, to, amount), signer().sign(from, to, amount));
    }

    #[test]
    fn test_amount_is_normalized_to_two_decimals() {
        let (from, to) = (AccountId::new(), AccountId::new());
        // 10.5 and 10.50 must produce the same payload bytes
        let a = Decimal::new(105, 1);
        let b = Decimal::new(1050, 2);
        assert_eq!(signer().sign(from, to, a), signer().sign(from, to, b));
    }

    #[test]
    fn test_verify_detects_tampering() {
        let (from, to) = (AccountId::new(), AccountId::new());
        let amount = Decimal::new(25000, 2);
        let sig = signer().sign(from, to, amount);

        assert!(signer().verify(from, to, amount, &sig));
        // Tampered amount
        assert!(!signer().verify(from, to, Decimal::new(25001, 2), &sig));
        // Swapped direction
        assert!(!signer().verify(to, from, amount, &sig));
        // Garbage signature
        assert!(!signer().verify(from, to, amount, "not-hex"));
    }

    #[test]
    fn test_different_secrets_disagree() {
        let (from, to) = (AccountId::new(), AccountId::new());
        let amount = Decimal::new(100, 0);
        let sig = signer().sign(from, to, amount);
        assert!(!TransactionSigner::new("other-secret").verify(from, to, amount, &sig));
    }
}
