//! BN254 points in the layout used by snarkjs and the alt_bn128 precompiles

mod g1;
mod g2;

pub use g1::G1Point;
pub use g2::G2Point;

use crate::{BaseElement, Error, Result};

/// Split a big-endian byte string into 32-byte coordinates
fn coordinates<const N: usize>(bytes: &[u8]) -> Result<[BaseElement; N]> {
    if bytes.len() != N * 32 {
        return Err(Error::MalformedPoint(format!(
            "expected {} bytes, got {}",
            N * 32,
            bytes.len()
        )));
    }

    let mut out = [BaseElement::ZERO; N];
    for (slot, chunk) in out.iter_mut().zip(bytes.chunks_exact(32)) {
        let mut word = [0; 32];
        word.copy_from_slice(chunk);
        *slot = BaseElement::from_be_bytes(word)?;
    }

    Ok(out)
}

fn expect_len<T>(what: &str, items: &[T], len: usize) -> Result<()> {
    match items.len() == len {
        true => Ok(()),
        false => Err(Error::MalformedPoint(format!(
            "{what} must have {len} components, got {}",
            items.len()
        ))),
    }
}
