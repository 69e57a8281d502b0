//! Group actions.

/// Left action on `T`.
///
/// Elements of implementing types act on `T` values on the left.
pub trait LeftAction<T>
where
    T: ?Sized,
{
    /// Act on a value on the left.
    fn left_apply(&self, mut value: T) -> T
    where
        T: Sized,
    {
        self.left_apply_to(&mut value);
        value
    }

    /// Act on a value, in place, on the left.
    fn left_apply_to(&self, value: &mut T);
}
