use num::{Float, NumCast, Zero};
use rand::distributions::uniform::SampleUniform;
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{AddAssign, SubAssign},
    sync::atomic::{AtomicU32, AtomicU64, Ordering},
};

pub trait Primitive: AddAssign + Sum + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static
                + AtomicPrimitive {}
impl Primitive for f32 {}
impl Primitive for f64 {}


/// Floating point types that can be accumulated from many threads without a lock.
///
/// The value is stored bit-cast inside an atomic integer of the same width, additions are done
/// with a compare-and-swap loop. Atomic accumulation is not associative in floating point, so two
/// parallel runs may differ in the last bits of a sum.
pub trait AtomicPrimitive: Sized {
    type Atomic: Send + Sync + Debug;

    fn new_atomic(value: Self) -> Self::Atomic;
    fn atomic_add(atomic: &Self::Atomic, value: Self);
    fn atomic_into_inner(atomic: Self::Atomic) -> Self;
}

macro_rules! impl_atomic_primitive {
    ($float: ty, $atomic: ty) => {
        impl AtomicPrimitive for $float {
            type Atomic = $atomic;

            #[inline(always)]
            fn new_atomic(value: Self) -> Self::Atomic {
                <$atomic>::new(value.to_bits())
            }

            #[inline(always)]
            fn atomic_add(atomic: &Self::Atomic, value: Self) {
                // The closure never returns None, so the update cannot fail.
                let _ = atomic.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                    Some((<$float>::from_bits(bits) + value).to_bits())
                });
            }

            #[inline(always)]
            fn atomic_into_inner(atomic: Self::Atomic) -> Self {
                <$float>::from_bits(atomic.into_inner())
            }
        }
    };
}

impl_atomic_primitive!(f32, AtomicU32);
impl_atomic_primitive!(f64, AtomicU64);


#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test] fn concurrent_atomic_add_f32() { concurrent_atomic_add::<f32>(); }
    #[test] fn concurrent_atomic_add_f64() { concurrent_atomic_add::<f64>(); }

    fn concurrent_atomic_add<T: Primitive>() {
        // Integers stay exact in both float widths, so ordering does not matter here.
        let atomic = T::new_atomic(T::zero());
        (0..10_000).into_par_iter().for_each(|_| T::atomic_add(&atomic, T::one()));
        assert_eq!(T::atomic_into_inner(atomic), T::from(10_000).unwrap());
    }

    #[test]
    fn atomic_add_keeps_fractions() {
        let atomic = f64::new_atomic(0.25);
        f64::atomic_add(&atomic, 0.5);
        f64::atomic_add(&atomic, -1.0);
        assert_eq!(f64::atomic_into_inner(atomic), -0.25);
    }
}
