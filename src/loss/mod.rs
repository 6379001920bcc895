//! Loss functions comparing rendered outputs against their targets.
//!
//! Every function takes the tensors by value and only fails
//! when the shapes are incompatible.
//! Numeric degeneracies, such as an empty mask, propagate as NaN.

pub mod l1;
pub mod l2;
pub mod patch;
pub mod psnr;
pub mod ssim;

pub use crate::error::Error;
pub use burn::tensor::{backend::Backend, Bool, Tensor};
pub use l1::*;
pub use l2::*;
pub use patch::*;
pub use psnr::*;
pub use ssim::*;

/// Both shapes should be identical.
pub(crate) fn check_dims_same<const D: usize>(
    value: [usize; D],
    target: [usize; D],
) -> Result<(), Error> {
    if value != target {
        return Err(Error::MismatchedTensorShape(
            value.to_vec(),
            target.to_vec(),
        ));
    }

    Ok(())
}

/// `source` should be broadcastable to `target`.
pub(crate) fn check_dims_broadcastable<const D: usize>(
    source: [usize; D],
    target: [usize; D],
) -> Result<(), Error> {
    let is_broadcastable = source
        .iter()
        .zip(target.iter())
        .all(|(&s, &t)| s == t || s == 1);
    if !is_broadcastable {
        return Err(Error::MismatchedTensorShape(
            source.to_vec(),
            target.to_vec(),
        ));
    }

    Ok(())
}
