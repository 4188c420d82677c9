/*
    Shared bit-string utilities
*/

use std::ops::ShlAssign;

use bitvec::prelude::Lsb0;
use num_bigint::BigUint;

/// The packed bit-string type used by every encodable context.
pub type BitVec = bitvec::prelude::BitVec<u32, Lsb0>;

/// Constructs a [`BitVec`] with the crate's storage parameters.
#[macro_export]
macro_rules! bitvec {
    [ $($t:tt)* ] => {
        {
            bitvec::bitvec![u32, bitvec::prelude::Lsb0; $($t)*]
        }
    };
}

// Converts a `BitVec` to a `BigUint`
pub(crate) fn bitvec_to_biguint(bv: &BitVec) -> BigUint {
    let mut i = BigUint::default();
    for b in bv.iter().rev() {
        i.shl_assign(1);
        i.set_bit(0, *b);
    }
    i
}

// Converts a `BigUint` to a `BitVec` of exactly `width` bits.
// The value must fit in `width` bits.
pub(crate) fn biguint_to_bitvec(i: &BigUint, width: usize) -> BitVec {
    assert!(
        i.bits() as usize <= width,
        "value needs {} bits, only {} available",
        i.bits(),
        width
    );
    let mut bv = BitVec::from_vec(i.to_u32_digits());
    bv.resize(width, false);
    bv
}

// Packs sign, exponent, and mantissa fields into a bit string:
// mantissa in the low bits, then the exponent, sign on top.
pub(crate) fn pack_fields(s: bool, e: &BigUint, es: usize, m: &BigUint, mlen: usize) -> BitVec {
    debug_assert!(e.bits() as usize <= es && m.bits() as usize <= mlen);
    let nbits = 1 + es + mlen;
    let mut bv = BitVec::repeat(false, nbits);
    for i in 0..mlen as u64 {
        bv.set(i as usize, m.bit(i));
    }
    for i in 0..es as u64 {
        bv.set(mlen + i as usize, e.bit(i));
    }
    bv.set(nbits - 1, s);
    bv
}

// Splices a packed representation into sign, exponent, and mantissa.
pub(crate) fn unpack_fields(bv: &BitVec, es: usize, mlen: usize) -> (bool, BigUint, BigUint) {
    debug_assert_eq!(bv.len(), 1 + es + mlen);
    let s = bv[bv.len() - 1];
    let e = bitvec_to_biguint(&BitVec::from(&bv[mlen..mlen + es]));
    let m = bitvec_to_biguint(&BitVec::from(&bv[..mlen]));
    (s, e, m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn biguint_round_trip() {
        let i = BigUint::from(0b1011_0010_u32);
        let bv = biguint_to_bitvec(&i, 8);
        assert!(bv[1] && bv[4] && bv[5] && bv[7]);
        assert_eq!(bitvec_to_biguint(&bv), i);
    }
}
