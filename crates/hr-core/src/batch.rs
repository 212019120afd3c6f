//! Scalar-or-vector values.
//!
//! Every contract and market field, and every pricer output, is a [`Batch`]:
//! either a single number or a vector of numbers. A scalar broadcasts across
//! any batch index. Pricers always compute over `N ≥ 1` entries and use
//! [`Batch::from_shape`] to hand back a true scalar when the input was
//! scalar, so callers never receive a length-1 vector by accident.

use crate::errors::{Error, Result};
use crate::Real;

/// The shape of a batch computation: one scalar, or `n` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// All inputs were scalars; the output is a scalar.
    Scalar,
    /// At least one input was a vector of this length.
    Vector(usize),
}

impl Shape {
    /// Number of entries to compute (1 for a scalar).
    pub fn len(&self) -> usize {
        match self {
            Shape::Scalar => 1,
            Shape::Vector(n) => *n,
        }
    }

    /// `true` for a zero-length vector shape.
    pub fn is_empty(&self) -> bool {
        matches!(self, Shape::Vector(0))
    }

    /// `true` for [`Shape::Scalar`].
    pub fn is_scalar(&self) -> bool {
        matches!(self, Shape::Scalar)
    }
}

/// A scalar or a fixed-length vector of reals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Batch {
    /// A single value, broadcast across any index.
    Scalar(Real),
    /// One value per batch entry.
    Vector(Vec<Real>),
}

impl Batch {
    /// Wrap per-entry results according to `shape`.
    ///
    /// A scalar shape takes the first (and only) value.
    pub fn from_shape(shape: Shape, values: Vec<Real>) -> Result<Self> {
        match shape {
            Shape::Scalar => match values.as_slice() {
                [v] => Ok(Batch::Scalar(*v)),
                _ => Err(Error::InvalidArgument(format!(
                    "scalar shape needs exactly one value, got {}",
                    values.len()
                ))),
            },
            Shape::Vector(n) => {
                crate::ensure!(
                    values.len() == n,
                    "vector shape of length {n} got {} values",
                    values.len()
                );
                Ok(Batch::Vector(values))
            }
        }
    }

    /// Length of a vector, `None` for a scalar.
    pub fn len(&self) -> Option<usize> {
        match self {
            Batch::Scalar(_) => None,
            Batch::Vector(v) => Some(v.len()),
        }
    }

    /// `true` for an empty vector.
    pub fn is_empty(&self) -> bool {
        matches!(self, Batch::Vector(v) if v.is_empty())
    }

    /// `true` for [`Batch::Scalar`].
    pub fn is_scalar(&self) -> bool {
        matches!(self, Batch::Scalar(_))
    }

    /// The value at index `i`; scalars broadcast.
    ///
    /// # Panics
    /// Panics if `i` is out of range for a vector.
    #[inline]
    pub fn at(&self, i: usize) -> Real {
        match self {
            Batch::Scalar(x) => *x,
            Batch::Vector(v) => v[i],
        }
    }

    /// The scalar value, or `None` for a vector.
    pub fn as_scalar(&self) -> Option<Real> {
        match self {
            Batch::Scalar(x) => Some(*x),
            Batch::Vector(_) => None,
        }
    }

    /// The vector values, or `None` for a scalar.
    pub fn as_slice(&self) -> Option<&[Real]> {
        match self {
            Batch::Scalar(_) => None,
            Batch::Vector(v) => Some(v),
        }
    }

    /// Expand to `n` values, broadcasting a scalar.
    pub fn to_vec(&self, n: usize) -> Vec<Real> {
        match self {
            Batch::Scalar(x) => vec![*x; n],
            Batch::Vector(v) => v.clone(),
        }
    }

    /// Apply `f` elementwise, preserving the scalar/vector form.
    pub fn map<F: Fn(Real) -> Real>(&self, f: F) -> Self {
        match self {
            Batch::Scalar(x) => Batch::Scalar(f(*x)),
            Batch::Vector(v) => Batch::Vector(v.iter().map(|&x| f(x)).collect()),
        }
    }

    /// Combine two batches elementwise.
    ///
    /// Scalars broadcast against vectors; two vectors must share a length.
    pub fn zip_with<F: Fn(Real, Real) -> Real>(&self, other: &Batch, f: F) -> Result<Self> {
        match (self, other) {
            (Batch::Scalar(a), Batch::Scalar(b)) => Ok(Batch::Scalar(f(*a, *b))),
            (Batch::Vector(a), Batch::Scalar(b)) => {
                Ok(Batch::Vector(a.iter().map(|&x| f(x, *b)).collect()))
            }
            (Batch::Scalar(a), Batch::Vector(b)) => {
                Ok(Batch::Vector(b.iter().map(|&y| f(*a, y)).collect()))
            }
            (Batch::Vector(a), Batch::Vector(b)) => {
                crate::ensure!(
                    a.len() == b.len(),
                    "cannot combine vectors of lengths {} and {}",
                    a.len(),
                    b.len()
                );
                Ok(Batch::Vector(
                    a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect(),
                ))
            }
        }
    }

    /// Add a constant to every entry.
    pub fn shift(&self, delta: Real) -> Self {
        self.map(|x| x + delta)
    }
}

impl From<Real> for Batch {
    fn from(x: Real) -> Self {
        Batch::Scalar(x)
    }
}

impl From<Vec<Real>> for Batch {
    fn from(v: Vec<Real>) -> Self {
        Batch::Vector(v)
    }
}

impl From<&[Real]> for Batch {
    fn from(v: &[Real]) -> Self {
        Batch::Vector(v.to_vec())
    }
}

impl<const N: usize> From<[Real; N]> for Batch {
    fn from(v: [Real; N]) -> Self {
        Batch::Vector(v.to_vec())
    }
}

impl Default for Batch {
    fn default() -> Self {
        Batch::Scalar(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_broadcasts() {
        let b = Batch::from(2.5);
        assert_eq!(b.at(0), 2.5);
        assert_eq!(b.at(17), 2.5);
        assert_eq!(b.len(), None);
        assert_eq!(b.to_vec(3), vec![2.5, 2.5, 2.5]);
    }

    #[test]
    fn from_shape_unwraps_scalar() {
        let s = Batch::from_shape(Shape::Scalar, vec![1.0]).unwrap();
        assert_eq!(s, Batch::Scalar(1.0));
        let v = Batch::from_shape(Shape::Vector(1), vec![1.0]).unwrap();
        assert_eq!(v, Batch::Vector(vec![1.0]));
        assert!(Batch::from_shape(Shape::Scalar, vec![1.0, 2.0]).is_err());
        assert!(Batch::from_shape(Shape::Vector(3), vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn zip_with_broadcasts_and_checks_lengths() {
        let a = Batch::from([1.0, 2.0, 3.0]);
        let b = Batch::from(10.0);
        assert_eq!(
            a.zip_with(&b, |x, y| x + y).unwrap(),
            Batch::Vector(vec![11.0, 12.0, 13.0])
        );
        let c = Batch::from([1.0, 2.0]);
        assert!(a.zip_with(&c, |x, y| x + y).is_err());
    }

    #[test]
    fn shape_len() {
        assert_eq!(Shape::Scalar.len(), 1);
        assert_eq!(Shape::Vector(4).len(), 4);
        assert!(Shape::Vector(0).is_empty());
        assert!(!Shape::Scalar.is_empty());
    }

    proptest::proptest! {
        #[test]
        fn scalar_and_singleton_vector_agree(x in -1e6f64..1e6, y in -1e6f64..1e6) {
            let f = |a: Real, b: Real| a * b + 1.0;
            let s = Batch::from(x).zip_with(&Batch::from(y), f).unwrap();
            let v = Batch::from(vec![x]).zip_with(&Batch::from(y), f).unwrap();
            proptest::prop_assert!(s.is_scalar());
            proptest::prop_assert_eq!(s.at(0), v.at(0));
        }
    }
}
