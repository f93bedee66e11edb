use std::convert::TryFrom;

/// The integer types a whole number field can be declared with. The codec works on `i128`
/// internally so that the complete `u64` and `i64` ranges stay representable.
pub trait WholeNumber: Copy {
    const MIN: i128;
    const MAX: i128;

    fn to_i128(self) -> i128;

    fn from_i128(value: i128) -> Option<Self>;
}

macro_rules! impl_whole_number {
    ( $($T:ident),+ ) => {$(
        impl WholeNumber for $T {
            const MIN: i128 = $T::MIN as i128;
            const MAX: i128 = $T::MAX as i128;

            #[inline]
            fn to_i128(self) -> i128 {
                i128::from(self)
            }

            #[inline]
            fn from_i128(value: i128) -> Option<Self> {
                $T::try_from(value).ok()
            }
        }
    )*}
}

impl_whole_number!(u8, u16, u32, u64);
impl_whole_number!(i8, i16, i32, i64);
