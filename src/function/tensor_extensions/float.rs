use burn::tensor::{backend, Bool, Float, Tensor};

pub trait TensorFloatExtension<B: backend::Backend, const D: usize> {
    /// Numerical gradient along `dim` with unit spacing.
    ///
    /// Central differences in the interior, one-sided differences at both ends.
    /// A dimension of length 1 has zero gradient.
    fn gradient(
        self,
        dim: usize,
    ) -> Self;

    /// Mean of the elements selected by `mask`.
    ///
    /// It is NaN if `mask` selects nothing.
    fn mean_masked(
        self,
        mask: Tensor<B, D, Bool>,
    ) -> Tensor<B, 1>;

    /// L2 norm along `dim`, keeping the dimension.
    fn norm_l2_dim(
        self,
        dim: usize,
    ) -> Self;

    /// Unbiased standard deviation along `dim`, keeping the dimension.
    fn std_dim(
        self,
        dim: usize,
    ) -> Self;
}

impl<B: backend::Backend, const D: usize> TensorFloatExtension<B, D>
    for Tensor<B, D, Float>
{
    fn gradient(
        self,
        dim: usize,
    ) -> Self {
        assert!(dim < D, "dim should be less than self.dims().len()");

        let size = self.dims()[dim];
        if size < 2 {
            return self.zeros_like();
        }

        let head = self.to_owned().narrow(dim, 1, 1)
            - self.to_owned().narrow(dim, 0, 1);
        let tail = self.to_owned().narrow(dim, size - 1, 1)
            - self.to_owned().narrow(dim, size - 2, 1);
        if size == 2 {
            return Tensor::cat(vec![head, tail], dim);
        }

        // (f[i + 1] - f[i - 1]) / 2
        let body = (self.to_owned().narrow(dim, 2, size - 2)
            - self.narrow(dim, 0, size - 2))
        .div_scalar(2.0);

        Tensor::cat(vec![head, body, tail], dim)
    }

    fn mean_masked(
        self,
        mask: Tensor<B, D, Bool>,
    ) -> Tensor<B, 1> {
        let count = mask.to_owned().int().sum().float();
        self.mask_fill(mask.bool_not(), 0.0).sum().div(count)
    }

    fn norm_l2_dim(
        self,
        dim: usize,
    ) -> Self {
        self.powf_scalar(2.0).sum_dim(dim).sqrt()
    }

    fn std_dim(
        self,
        dim: usize,
    ) -> Self {
        self.var(dim).sqrt()
    }
}
