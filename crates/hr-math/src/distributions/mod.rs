//! Probability distributions.
//!
//! Only the standard normal is needed by the pricers; its CDF delegates to
//! the `statrs` error function.

pub mod normal;

pub use normal::{normal_cdf, normal_cdf_inverse, normal_pdf};
