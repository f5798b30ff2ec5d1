//! Three-component vector arithmetic
//!
//! Value type with the operations the calculator exposes:
//! - Addition and subtraction (componentwise)
//! - Scalar multiplication
//! - Dot product (scalar result)
//! - Cross product (right-hand rule)

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A vector in three-dimensional space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a vector from its components
    ///
    /// # Examples
    ///
    /// ```
    /// use minimat::Vec3;
    ///
    /// let v = Vec3::new(1.0, 2.0, 3.0);
    /// assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
    /// ```
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Multiply every component by `factor`.
    pub fn scale(self, factor: f64) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Sum of componentwise products
    ///
    /// # Examples
    ///
    /// ```
    /// use minimat::Vec3;
    ///
    /// let a = Vec3::new(1.0, 2.0, 3.0);
    /// assert_eq!(a.dot(a), 14.0);
    /// ```
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Vector perpendicular to both inputs, oriented by the right-hand rule
    ///
    /// # Examples
    ///
    /// ```
    /// use minimat::Vec3;
    ///
    /// let i = Vec3::new(1.0, 0.0, 0.0);
    /// let j = Vec3::new(0.0, 1.0, 0.0);
    /// assert_eq!(i.cross(j), Vec3::new(0.0, 0.0, 1.0));
    /// ```
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, factor: f64) -> Vec3 {
        self.scale(factor)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Vec3::new(v[0], v[1], v[2])
    }
}

/// Renders as `(x.xx, y.xx, z.xx)`.
impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}
