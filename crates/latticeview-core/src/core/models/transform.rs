use super::lattice::BasisSet;
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
use serde::Serialize;

/// A fractional ⇄ cartesian transform pair for a periodic cell.
///
/// Both directions are stored as homogeneous 4×4 matrices so that cells with an
/// origin offset are represented exactly. The pair is immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitCellTransform {
    frac_to_cart: Matrix4<f64>,
    cart_to_frac: Matrix4<f64>,
}

impl UnitCellTransform {
    /// Builds the transform pair from a fractional-to-cartesian matrix.
    ///
    /// # Return
    ///
    /// Returns `None` if the matrix is not invertible.
    pub fn from_frac_to_cart(frac_to_cart: Matrix4<f64>) -> Option<Self> {
        let cart_to_frac = frac_to_cart.try_inverse()?;
        Some(Self {
            frac_to_cart,
            cart_to_frac,
        })
    }

    /// Builds the transform whose fractional axes are the given basis vectors.
    ///
    /// The basis vectors become the columns of the linear part, so that the fractional
    /// point `(1, 0, 0)` maps onto `a`, and so on.
    ///
    /// # Return
    ///
    /// Returns `None` if the basis spans less than three dimensions.
    pub fn from_basis(basis: &BasisSet) -> Option<Self> {
        let linear = Matrix3::from_columns(basis.vectors());
        Self::from_frac_to_cart(linear.to_homogeneous())
    }

    pub fn frac_to_cart(&self) -> &Matrix4<f64> {
        &self.frac_to_cart
    }

    pub fn cart_to_frac(&self) -> &Matrix4<f64> {
        &self.cart_to_frac
    }

    pub fn to_fractional(&self, cart: &Point3<f64>) -> Point3<f64> {
        self.cart_to_frac.transform_point(cart)
    }

    pub fn to_cartesian(&self, frac: &Point3<f64>) -> Point3<f64> {
        self.frac_to_cart.transform_point(frac)
    }

    /// Recovers the cell basis by mapping the fractional unit vectors to cartesian space.
    pub fn basis(&self) -> BasisSet {
        BasisSet::new(
            self.frac_to_cart.transform_vector(&Vector3::x()),
            self.frac_to_cart.transform_vector(&Vector3::y()),
            self.frac_to_cart.transform_vector(&Vector3::z()),
        )
    }
}
