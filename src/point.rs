use num::{NumCast, ToPrimitive, Zero, Float};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display}, iter::Sum, ops::{Add, AddAssign, Sub}
};

pub trait Primitive: Add + AddAssign + Sum + Sub + Zero + Float + NumCast
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + 'static {}
impl Primitive for f32 {}
impl Primitive for f64 {}


/// A two-dimensional coordinate pair.
///
/// Used with a [`Primitive`] for samples and centroids, and with `i64` for generated
/// (and persisted) integer data. The field names double as the `x,y` header when persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point<T> {
    pub x: T,
    pub y: T
}
impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}
impl<T: ToPrimitive> Point<T> {
    /// Widen both coordinates to `f64`. Coordinates that can not be represented are mapped to NaN.
    pub fn to_f64(&self) -> Point<f64> {
        Point::new(self.x.to_f64().unwrap_or(f64::NAN), self.y.to_f64().unwrap_or(f64::NAN))
    }
}
impl<T: Primitive> Point<T> {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
impl<T: Display> Display for Point<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
