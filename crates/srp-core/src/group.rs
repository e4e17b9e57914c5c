// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — SRP Password-Authenticated Key Exchange
// Licensed under the MIT License

use std::sync::OnceLock;

use num_bigint::BigUint;

use crate::types::MODULUS_BITS;

/// RFC 3526 group 14: the 2048-bit MODP safe-prime modulus.
const MODULUS_HEX: &str = "
    FFFFFFFF FFFFFFFF C90FDAA2 2168C234 C4C6628B 80DC1CD1
    29024E08 8A67CC74 020BBEA6 3B139B22 514A0879 8E3404DD
    EF9519B3 CD3A431B 302B0A6D F25F1437 4FE1356D 6D51C245
    E485B576 625E7EC6 F44C42E9 A637ED6B 0BFF5CB6 F406B7ED
    EE386BFB 5A899FA5 AE9F2411 7C4B1FE6 49286651 ECE45B3D
    C2007CB8 A163BF05 98DA4836 1C55D39A 69163FA8 FD24CF5F
    83655D23 DCA3AD96 1C62F356 208552BB 9ED52907 7096966D
    670C354E 4ABC9804 F1746C08 CA18217C 32905E46 2E36CE3B
    E39E772C 180E8603 9B2783A2 EC07A28F B5C55DF0 6F4C52C9
    DE2BCBF6 95581718 3995497C EA956AE5 15D22618 98FA0510
    15728E5A 8AACAA68 FFFFFFFF FFFFFFFF";

/// Generator of the prime-order subgroup.
const GENERATOR: u32 = 2;

/// Fixed multiplier parameter `k`.
///
/// This is an explicit protocol parameter, NOT derived from the group as
/// `H(p ‖ g)` the way SRP-6a does; implementations that compute `k`
/// differently are not interoperable with this one.
const MULTIPLIER: u32 = 3;

/// The safe-prime group shared by both protocol sides.
///
/// Immutable and process-wide; obtain it through
/// [`GroupParameters::rfc3526_2048`]. All protocol arithmetic happens
/// modulo [`modulus`](Self::modulus), with ephemeral exponents drawn from
/// `[0, order)`.
pub struct GroupParameters {
    modulus: BigUint,
    generator: BigUint,
    order: BigUint,
    multiplier: BigUint,
}

impl GroupParameters {
    /// Returns the process-wide RFC 3526 2048-bit MODP group.
    ///
    /// The first call validates the group structurally: the modulus has the
    /// expected bit length, the subgroup order is `(p - 1) / 2`, and the
    /// generator has order `q` (so `g^q ≡ 1 mod p`). Primality of `p` and
    /// `q` is pinned by the RFC 3526 provenance of the constant and is not
    /// re-proved at runtime.
    pub fn rfc3526_2048() -> &'static GroupParameters {
        static GROUP: OnceLock<GroupParameters> = OnceLock::new();
        GROUP.get_or_init(|| {
            let hex: String = MODULUS_HEX.split_whitespace().collect();
            let modulus = BigUint::parse_bytes(hex.as_bytes(), 16)
                .expect("RFC 3526 modulus constant is valid hex");
            let generator = BigUint::from(GENERATOR);
            let order = (&modulus - 1u32) >> 1;
            let multiplier = BigUint::from(MULTIPLIER);

            let group = GroupParameters {
                modulus,
                generator,
                order,
                multiplier,
            };
            group.assert_valid();
            group
        })
    }

    fn assert_valid(&self) {
        assert_eq!(self.modulus.bits(), MODULUS_BITS);
        assert_eq!(&self.modulus % 2u32, BigUint::from(1u32), "modulus must be odd");
        assert_eq!(self.order, (&self.modulus - 1u32) >> 1);
        assert!(self.generator > BigUint::from(1u32));
        assert!(self.generator < self.modulus);
        assert_eq!(
            self.generator.modpow(&self.order, &self.modulus),
            BigUint::from(1u32),
            "generator must have order q",
        );
        assert!(self.multiplier > BigUint::from(0u32));
        assert!(self.multiplier < self.modulus);
    }

    /// The safe prime `p`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// The subgroup generator `g`.
    pub fn generator(&self) -> &BigUint {
        &self.generator
    }

    /// The subgroup order `q = (p - 1) / 2`.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// The fixed multiplier parameter `k`.
    pub fn multiplier(&self) -> &BigUint {
        &self.multiplier
    }
}
