//! # Semirings for generic sparse multiplication
//!
//! A semiring supplies the `multiply` that combines an entry of A with an
//! entry of B, the `add` that folds products into a running accumulator, and
//! the `identity` of `add` that each accumulator slot starts from.
//!
//! Two styles are provided:
//!
//! - Zero-sized structs ([`PlusTimes`], [`MinPlus`], [`MaxPlus`], [`MaxMin`],
//!   [`LorLand`]). The multiply kernel is generic over the semiring, so each
//!   one gets its own monomorphized kernel body with no dispatch cost.
//! - [`OperatorSemiring`], which holds plain function pointers. Every
//!   structure with the same value types shares one kernel body at the cost
//!   of an indirect call per operation.
//!
//! Neither `add` nor `multiply` has to be commutative or associative. The
//! kernel folds products for C(i,j) in a fixed order (B(:,j) ascending by
//! row k, then A(:,k) ascending by row i), and for non-commutative `add` that
//! order defines the result.

use std::fmt;
use std::marker::PhantomData;

use num_traits::{Bounded, Float, Num};

/// Algebraic structure used to accumulate `C = A ⊕.⊗ B`
///
/// `A` and `B` are the entry types of the left and right operands; the
/// product lands in [`Output`](Self::Output).
pub trait Semiring<A, B = A> {
    /// Value domain of C and of the accumulator
    type Output: Copy;

    /// Identity of `add`: `add(identity(), x) == x` for every product `x`
    fn identity(&self) -> Self::Output;

    /// Folds `delta` into the running accumulator
    fn add(&self, accum: Self::Output, delta: Self::Output) -> Self::Output;

    /// Combines A(i,k) with B(k,j)
    fn multiply(&self, a: A, b: B) -> Self::Output;

    /// True if `identity` leaves `sample` unchanged on the left of `add`
    fn verify_identity(&self, sample: Self::Output) -> bool
    where
        Self::Output: PartialEq,
    {
        self.add(self.identity(), sample) == sample
    }
}

/// Ordinary arithmetic `(+, ×)` with identity 0
pub struct PlusTimes<T>(PhantomData<T>);

/// Tropical shortest-path `(min, +)` with identity +∞
pub struct MinPlus<T>(PhantomData<T>);

/// Tropical longest-path `(max, +)` with identity −∞
pub struct MaxPlus<T>(PhantomData<T>);

/// Bottleneck / widest-path `(max, min)` with identity `T::min_value()`
pub struct MaxMin<T>(PhantomData<T>);

/// Boolean reachability `(or, and)` with identity `false`
#[derive(Debug, Clone, Copy, Default)]
pub struct LorLand;

macro_rules! marker_semiring {
    ($($name:ident),*) => {
        $(
            impl<T> $name<T> {
                pub const fn new() -> Self {
                    $name(PhantomData)
                }
            }

            impl<T> Default for $name<T> {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl<T> Clone for $name<T> {
                fn clone(&self) -> Self {
                    *self
                }
            }

            impl<T> Copy for $name<T> {}

            impl<T> fmt::Debug for $name<T> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(stringify!($name))
                }
            }
        )*
    };
}

marker_semiring!(PlusTimes, MinPlus, MaxPlus, MaxMin);

impl<T: Copy + Num> Semiring<T> for PlusTimes<T> {
    type Output = T;

    #[inline]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline]
    fn add(&self, accum: T, delta: T) -> T {
        accum + delta
    }

    #[inline]
    fn multiply(&self, a: T, b: T) -> T {
        a * b
    }
}

impl<T: Float> Semiring<T> for MinPlus<T> {
    type Output = T;

    #[inline]
    fn identity(&self) -> T {
        T::infinity()
    }

    #[inline]
    fn add(&self, accum: T, delta: T) -> T {
        accum.min(delta)
    }

    #[inline]
    fn multiply(&self, a: T, b: T) -> T {
        a + b
    }
}

impl<T: Float> Semiring<T> for MaxPlus<T> {
    type Output = T;

    #[inline]
    fn identity(&self) -> T {
        T::neg_infinity()
    }

    #[inline]
    fn add(&self, accum: T, delta: T) -> T {
        accum.max(delta)
    }

    #[inline]
    fn multiply(&self, a: T, b: T) -> T {
        a + b
    }
}

impl<T: Copy + PartialOrd + Bounded> Semiring<T> for MaxMin<T> {
    type Output = T;

    #[inline]
    fn identity(&self) -> T {
        T::min_value()
    }

    #[inline]
    fn add(&self, accum: T, delta: T) -> T {
        if delta > accum {
            delta
        } else {
            accum
        }
    }

    #[inline]
    fn multiply(&self, a: T, b: T) -> T {
        if a < b {
            a
        } else {
            b
        }
    }
}

impl Semiring<bool> for LorLand {
    type Output = bool;

    #[inline]
    fn identity(&self) -> bool {
        false
    }

    #[inline]
    fn add(&self, accum: bool, delta: bool) -> bool {
        accum || delta
    }

    #[inline]
    fn multiply(&self, a: bool, b: bool) -> bool {
        a && b
    }
}

/// Semiring assembled at runtime from plain function pointers
///
/// The input domains may differ from each other and from the output, e.g. a
/// boolean adjacency matrix times `f64` weights.
pub struct OperatorSemiring<A, B, Z> {
    identity: Z,
    add: fn(Z, Z) -> Z,
    multiply: fn(A, B) -> Z,
}

impl<A, B, Z: Copy> OperatorSemiring<A, B, Z> {
    pub fn new(identity: Z, add: fn(Z, Z) -> Z, multiply: fn(A, B) -> Z) -> Self {
        Self {
            identity,
            add,
            multiply,
        }
    }
}

impl<A, B, Z: Copy> Clone for OperatorSemiring<A, B, Z> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, B, Z: Copy> Copy for OperatorSemiring<A, B, Z> {}

impl<A, B, Z: fmt::Debug> fmt::Debug for OperatorSemiring<A, B, Z> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorSemiring")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl<A, B, Z: Copy> Semiring<A, B> for OperatorSemiring<A, B, Z> {
    type Output = Z;

    #[inline]
    fn identity(&self) -> Z {
        self.identity
    }

    #[inline]
    fn add(&self, accum: Z, delta: Z) -> Z {
        (self.add)(accum, delta)
    }

    #[inline]
    fn multiply(&self, a: A, b: B) -> Z {
        (self.multiply)(a, b)
    }
}
