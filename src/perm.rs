//! Permutations of a bounded set of points.
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::str::FromStr;
use std::sync::OnceLock;

use num_integer::Integer;
use num_traits::{One, Zero};

use crate::action::LeftAction;
use crate::codec;
use crate::config::Config;
use crate::cycles::{self, Cycle, Cycles};
use crate::error::{ArityError, EncodingError, Error, ValidationError};
use crate::El;

/// A permutation of a finite set.
///
/// A permutation of length n is a bijection on the points `base..base + n`, where the base is
/// taken from the [`Config`] it was built with (0 by default). Points are limited to
/// `config.max_index()`, which is at most 35, so that every permutation has a string encoding
/// with one character per point.
///
/// Internally a permutation is stored as a vector containing the images of its points in order.
/// The decomposition into cycles is computed on first use and cached.
#[derive(Clone)]
pub struct Permutation {
    values: Vec<El>,
    config: Config,
    cycles: OnceLock<Vec<Vec<El>>>,
}

impl Permutation {
    /// Wrap values that are already known to form a permutation.
    fn from_parts(values: Vec<El>, config: Config) -> Permutation {
        debug_assert!(config.validate(&values).is_ok());
        Permutation {
            values,
            config,
            cycles: OnceLock::new(),
        }
    }

    /// Create a permutation from a vector containing the images of `0..n`.
    pub fn from_vec(values: Vec<El>) -> Result<Permutation, ValidationError> {
        Self::from_vec_with_config(values, Config::DEFAULT)
    }

    /// Create a permutation from a vector containing the images of `config.domain(n)`.
    pub fn from_vec_with_config(
        values: Vec<El>,
        config: Config,
    ) -> Result<Permutation, ValidationError> {
        config.validate(&values)?;
        Ok(Self::from_parts(values, config))
    }

    /// Create a permutation of length `n` whose k-th value is `f(k)`.
    pub fn from_fn<F>(n: usize, f: F) -> Result<Permutation, ValidationError>
    where
        F: FnMut(El) -> El,
    {
        Self::from_fn_with_config(n, f, Config::DEFAULT)
    }

    /// Create a permutation of length `n` whose k-th value is `f(k)`.
    pub fn from_fn_with_config<F>(
        n: usize,
        mut f: F,
        config: Config,
    ) -> Result<Permutation, ValidationError>
    where
        F: FnMut(El) -> El,
    {
        // Any prefix longer than the number of allowed points already fails validation
        let capacity = (config.max_index() - config.base()) as usize + 1;
        let values = (0..n).take(capacity + 1).map(|k| f(k as El)).collect();
        Self::from_vec_with_config(values, config)
    }

    /// The identity permutation of length `n`.
    pub fn identity(n: usize) -> Result<Permutation, ValidationError> {
        Self::identity_with_config(n, Config::DEFAULT)
    }

    /// The identity permutation of length `n`.
    pub fn identity_with_config(n: usize, config: Config) -> Result<Permutation, ValidationError> {
        let base = config.base();
        Self::from_fn_with_config(n, |k| k + base, config)
    }

    /// Parse a permutation in flat form or, if the string contains `'('`, in cycle notation.
    ///
    /// In flat form the k-th character is the image of the k-th point. The permutation acts on the
    /// points up to the largest one mentioned: characters past that point are dropped, so `"0100"`
    /// is the identity on two points, and a shorter string is padded with fixed points.
    pub fn from_string(s: &str) -> Result<Permutation, EncodingError> {
        Self::from_string_with_config(s, Config::DEFAULT)
    }

    /// Parse a permutation in flat form or cycle notation.
    pub fn from_string_with_config(s: &str, config: Config) -> Result<Permutation, EncodingError> {
        if s.contains('(') {
            return Self::from_cycle_string_with_config(s, None, config);
        }
        let values = codec::parse_flat(s, config)?;
        Ok(Self::from_vec_with_config(values, config)?)
    }

    /// Parse a permutation in cycle notation.
    ///
    /// The permutation is defined on the points up to and including `last`, which defaults to the
    /// largest point in any cycle. Cycles are composed from right to left, so `"(01)(12)"` maps 1
    /// to 2 before mapping 2 to itself. Groups of fewer than two points are ignored.
    pub fn from_cycle_string(s: &str, last: Option<El>) -> Result<Permutation, EncodingError> {
        Self::from_cycle_string_with_config(s, last, Config::DEFAULT)
    }

    /// Parse a permutation in cycle notation.
    pub fn from_cycle_string_with_config(
        s: &str,
        last: Option<El>,
        config: Config,
    ) -> Result<Permutation, EncodingError> {
        let cycles = codec::parse_cycles(s)?;
        let values = codec::eval_cycles(&cycles, last, config)?;
        Ok(Self::from_vec_with_config(values, config)?)
    }

    /// The number of points this permutation acts on.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The first point of the domain.
    pub fn base(&self) -> El {
        self.config.base()
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// The points this permutation acts on.
    pub fn domain(&self) -> Range<El> {
        self.config.domain(self.len())
    }

    /// The images of `self.domain()` in order.
    pub fn as_slice(&self) -> &[El] {
        &self.values
    }

    /// The image of a point, or `None` if the point is outside of the domain.
    pub fn at(&self, point: El) -> Option<El> {
        point
            .checked_sub(self.base())
            .and_then(|offset| self.values.get(offset as usize))
            .copied()
    }

    fn composed_values(&self, theta: &Permutation) -> Vec<El> {
        theta.values.iter().map(|&el| self.left_apply(el)).collect()
    }

    /// The permutation mapping every point `i` to `self(theta(i))`.
    ///
    /// Both permutations must be defined on the same domain.
    pub fn compose(&self, theta: &Permutation) -> Result<Permutation, Error> {
        if self.len() != theta.len() {
            debug_log!(left = self.len(), right = theta.len(), "length mismatch");
            return Err(ArityError::LengthMismatch {
                left: self.len(),
                right: theta.len(),
            }
            .into());
        }
        if self.base() != theta.base() {
            debug_log!(left = self.base(), right = theta.base(), "base mismatch");
            return Err(ArityError::BaseMismatch {
                left: self.base(),
                right: theta.base(),
            }
            .into());
        }

        Ok(Self::from_vec_with_config(
            self.composed_values(theta),
            self.config,
        )?)
    }

    /// The inverse of this permutation.
    pub fn inverse(&self) -> Permutation {
        let base = self.base();
        let mut values = vec![base; self.len()];
        for (el, &image) in self.domain().zip(self.values.iter()) {
            values[(image - base) as usize] = el;
        }
        Self::from_parts(values, self.config)
    }

    /// A power of this permutation.
    ///
    /// Negative exponents are powers of the inverse. This performs exponentiation by squaring.
    pub fn pow<E>(&self, exponent: E) -> Permutation
    where
        E: Integer,
    {
        let mut square = if exponent < E::zero() {
            self.inverse()
        } else {
            self.clone()
        };
        let mut result = Self::from_parts(self.domain().collect(), self.config);

        // Truncating division walks through the bits of |exponent| without negating it
        let mut exp = exponent;
        while !exp.is_zero() {
            if exp.is_odd() {
                result = Self::from_parts(square.composed_values(&result), self.config);
            }
            exp = exp / (E::one() + E::one());
            if !exp.is_zero() {
                square = Self::from_parts(square.composed_values(&square), self.config);
            }
        }

        result
    }

    /// The smallest positive exponent for which this permutation is the identity.
    pub fn order(&self) -> usize {
        self.cycles()
            .iter()
            .fold(1, |order, cycle| order.lcm(&cycle.len()))
    }

    /// The sign of this permutation, 1 for even and -1 for odd permutations.
    pub fn sign(&self) -> i32 {
        let transpositions: usize = self.cycles().iter().map(|cycle| cycle.len() - 1).sum();
        if transpositions.is_even() {
            1
        } else {
            -1
        }
    }

    pub fn is_identity(&self) -> bool {
        self.domain().zip(self.values.iter()).all(|(el, &image)| el == image)
    }

    /// Return the cycle starting at a point.
    ///
    /// Returns a 1-cycle when the point is fixed or outside of the domain.
    pub fn cycle_at(&self, point: El) -> Cycle {
        Cycle::new(self, point)
    }

    /// Returns an iterator over all proper cycles.
    ///
    /// The returned iterator does not produce any 1-cycles.
    pub fn cycle_iter(&self) -> Cycles {
        Cycles::new(self)
    }

    /// All proper cycles, each starting at its smallest point, ordered by that point.
    ///
    /// This is computed on the first call and cached afterwards.
    pub fn cycles(&self) -> &[Vec<El>] {
        self.cycles.get_or_init(|| cycles::decompose(self))
    }

    /// Displays this permutation in cycle notation.
    pub fn cycle_notation(&self) -> CycleNotation {
        CycleNotation { perm: self }
    }

    /// This permutation in cycle notation, e.g. `"(012)(34)"`.
    ///
    /// The identity is written as the empty string.
    pub fn to_cycle_string(&self) -> String {
        self.cycle_notation().to_string()
    }
}

/// Cycle notation of a permutation, see [`Permutation::cycle_notation`].
pub struct CycleNotation<'a> {
    perm: &'a Permutation,
}

impl<'a> fmt::Display for CycleNotation<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for cycle in self.perm.cycles() {
            codec::write_cycle(f, cycle.iter().copied())?;
        }
        Ok(())
    }
}

impl From<Permutation> for Vec<El> {
    fn from(perm: Permutation) -> Vec<El> {
        perm.values
    }
}

/// Application of a permutation to a point.
///
/// Points outside of the domain are fixed.
impl LeftAction<El> for Permutation {
    fn left_apply_to(&self, el: &mut El) {
        *el = self.at(*el).unwrap_or(*el);
    }
}

/// Application of a permutation to a slice.
///
/// For a permutation p, this moves an element of the slice at position k to the position of
/// p(base + k). Positions past the domain are left in place.
///
/// Panics when the slice is shorter than the permutation.
impl<T> LeftAction<[T]> for Permutation {
    fn left_apply_to(&self, slice: &mut [T]) {
        assert!(slice.len() >= self.len());
        let base = self.base();

        for cycle in self.cycles() {
            let first = (cycle[0] - base) as usize;
            for &el in &cycle[1..] {
                slice.swap(first, (el - base) as usize);
            }
        }
    }
}

impl<T> LeftAction<Vec<T>> for Permutation {
    fn left_apply_to(&self, vec: &mut Vec<T>) {
        self.left_apply_to(&mut vec[..]);
    }
}

/// The flat form, one character per image.
impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        codec::write_points(f, self.values.iter().copied())
    }
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Permutation(")?;
        fmt::Display::fmt(self, f)?;
        f.write_str(")")
    }
}

impl FromStr for Permutation {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Permutation, EncodingError> {
        Permutation::from_string(s)
    }
}

impl PartialEq for Permutation {
    fn eq(&self, other: &Permutation) -> bool {
        self.base() == other.base() && self.values == other.values
    }
}

impl Eq for Permutation {}

impl Hash for Permutation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base().hash(state);
        self.values.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::{prelude::*, *};

    fn random_perm<S>(size: S) -> impl Strategy<Value = Permutation>
    where
        S: Strategy<Value = El>,
    {
        size.prop_map(|v| (0..v).collect::<Vec<_>>())
            .prop_shuffle()
            .prop_map(|vec| Permutation::from_vec(vec).unwrap())
    }

    fn perm(values: Vec<El>) -> Permutation {
        Permutation::from_vec(values).unwrap()
    }

    #[test]
    fn from_vec_errors() {
        assert_eq!(
            Permutation::from_vec(vec![0, 0]),
            Err(ValidationError::Duplicate { value: 0 })
        );
        assert_eq!(
            Permutation::from_vec(vec![0, 36]),
            Err(ValidationError::OutOfRange {
                value: 36,
                min: 0,
                max: 35
            })
        );
        assert_eq!(
            Permutation::from_vec(vec![1, 2]),
            Err(ValidationError::OutOfDomain { value: 2, len: 2 })
        );
        assert!(Permutation::from_vec(vec![]).unwrap().is_empty());
    }

    #[test]
    fn from_fn_and_identity() {
        let p = Permutation::from_fn(4, |k| 3 - k).unwrap();
        assert_eq!(p.as_slice(), &[3, 2, 1, 0]);

        let id = Permutation::identity(36).unwrap();
        assert!(id.is_identity());
        assert_eq!(id.len(), 36);

        assert!(Permutation::identity(37).is_err());
        assert!(Permutation::identity(usize::MAX).is_err());
    }

    #[test]
    fn identity_with_base() {
        let config = Config::with_base(1).unwrap();
        let id = Permutation::identity_with_config(3, config).unwrap();
        assert_eq!(id.as_slice(), &[1, 2, 3]);
        assert_eq!(id.domain(), 1..4);
        assert_eq!(id.at(0), None);
        assert_eq!(id.at(1), Some(1));
        assert_eq!(id.at(3), Some(3));
        assert_eq!(id.at(4), None);
        assert!(Permutation::identity_with_config(36, config).is_err());
        assert!(Permutation::identity_with_config(35, config).is_ok());
    }

    #[test]
    fn at_outside_of_domain() {
        let p = perm(vec![1, 0]);
        assert_eq!(p.at(0), Some(1));
        assert_eq!(p.at(2), None);
        assert_eq!(p.left_apply(2 as El), 2);
    }

    #[test]
    fn flat_strings() {
        assert_eq!(Permutation::from_string("012").unwrap().to_string(), "012");
        assert_eq!(Permutation::from_string("120").unwrap().to_string(), "120");
        assert_eq!(Permutation::from_string("10").unwrap().as_slice(), &[1, 0]);
        assert_eq!(Permutation::from_string("").unwrap().len(), 0);
        assert_eq!(
            Permutation::from_string("2"),
            Err(EncodingError::Validation(ValidationError::Duplicate {
                value: 2
            }))
        );
        assert_eq!(
            Permutation::from_string("0A"),
            Err(EncodingError::Validation(ValidationError::Duplicate {
                value: 10
            }))
        );
        assert_eq!(Permutation::from_string("00").unwrap().as_slice(), &[0]);
        assert_eq!(Permutation::from_string("0100").unwrap().as_slice(), &[0, 1]);
        assert_eq!(Permutation::from_string("1022").unwrap().to_string(), "102");
        assert_eq!(
            Permutation::from_string("01a"),
            Err(EncodingError::InvalidChar('a'))
        );
        assert_eq!("201".parse::<Permutation>().unwrap(), perm(vec![2, 0, 1]));
    }

    #[test]
    fn cycle_strings() {
        let p = Permutation::from_cycle_string("(01)(23)", Some(3)).unwrap();
        assert_eq!(p.as_slice(), &[1, 0, 3, 2]);

        let p = Permutation::from_cycle_string("(01)", Some(3)).unwrap();
        assert_eq!(p.as_slice(), &[1, 0, 2, 3]);

        let p = Permutation::from_string("(12)").unwrap();
        assert_eq!(p.as_slice(), &[0, 2, 1]);

        let p = Permutation::from_string("(01)(12)").unwrap();
        assert_eq!(p.as_slice(), &[1, 2, 0]);

        let p = Permutation::from_string("(3)").unwrap();
        assert!(p.is_empty());

        assert!(Permutation::from_cycle_string("(01)(23)", Some(2)).is_err());
        assert!(Permutation::from_cycle_string("(01)", Some(36)).is_err());
    }

    #[test]
    fn cycle_strings_with_base() {
        let config = Config::with_base(1).unwrap();
        let p = Permutation::from_cycle_string_with_config("(12)(34)", None, config).unwrap();
        assert_eq!(p.as_slice(), &[2, 1, 4, 3]);
        assert_eq!(p.at(1), Some(2));

        let p = Permutation::from_string_with_config("21", config).unwrap();
        assert_eq!(p.as_slice(), &[2, 1]);

        assert!(Permutation::from_cycle_string_with_config("(01)", None, config).is_err());
    }

    #[test]
    fn equality() {
        let a = perm(vec![1, 0]);
        let b = perm(vec![1, 0]);
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_ne!(a, perm(vec![1, 0, 2]));
        assert_ne!(perm(vec![0]), perm(vec![0, 1]));

        let config = Config::with_base(1).unwrap();
        let shifted = Permutation::from_vec_with_config(vec![1], config).unwrap();
        assert_ne!(perm(vec![0]), shifted);
    }

    #[test]
    fn clone_is_independent() {
        let a = perm(vec![2, 0, 1]);
        let _ = a.cycles();
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a.as_slice().as_ptr(), b.as_slice().as_ptr());
        assert_eq!(b.cycles(), &[vec![0, 2, 1]]);
    }

    #[test]
    fn composition_order() {
        let a = perm(vec![1, 0, 2, 3]);
        let b = perm(vec![2, 3, 0, 1]);

        // a after b
        assert_eq!(a.compose(&b).unwrap(), perm(vec![2, 3, 1, 0]));
        // b after a
        assert_eq!(b.compose(&a).unwrap(), perm(vec![3, 2, 0, 1]));
    }

    #[test]
    fn composition_arity() {
        let a = perm(vec![1, 0]);
        let b = perm(vec![1, 0, 2]);
        assert_eq!(
            a.compose(&b),
            Err(Error::Arity(ArityError::LengthMismatch { left: 2, right: 3 }))
        );

        let config = Config::with_base(1).unwrap();
        let c = Permutation::from_vec_with_config(vec![2, 1], config).unwrap();
        assert_eq!(
            a.compose(&c),
            Err(Error::Arity(ArityError::BaseMismatch { left: 0, right: 1 }))
        );
    }

    #[test]
    fn order_and_sign() {
        assert_eq!(perm(vec![]).order(), 1);
        assert_eq!(perm(vec![1, 0, 3, 4, 2]).order(), 6);
        assert_eq!(perm(vec![1, 0, 3, 4, 2]).sign(), -1);
        assert_eq!(perm(vec![1, 2, 0]).sign(), 1);
        assert_eq!(perm(vec![0, 1]).sign(), 1);
    }

    #[test]
    fn fmt_perms() {
        let p = perm(vec![2, 3, 1, 0, 5, 4]);
        assert_eq!(format!("{}", p), "231054");
        assert_eq!(format!("{:?}", p), "Permutation(231054)");
        assert_eq!(format!("{}", p.cycle_notation()), "(0213)(45)");
    }

    #[test]
    fn apply_to_slice() {
        let p = perm(vec![1, 2, 0, 3]);
        assert_eq!(p.left_apply(vec!['x', 'y', 'z', 'w']), vec!['z', 'x', 'y', 'w']);

        let mut data = [10, 20, 30, 40, 50];
        p.left_apply_to(&mut data[..]);
        assert_eq!(data, [30, 10, 20, 40, 50]);
    }

    #[test]
    #[should_panic]
    fn apply_to_short_slice() {
        let p = perm(vec![1, 2, 0, 3]);
        p.left_apply_to(&mut [1, 2, 3][..]);
    }

    proptest! {
        #[test]
        fn from_vec_ok(v in (0..=36u32).prop_map(|v| (0..v).collect::<Vec<_>>()).prop_shuffle()) {
            let p = Permutation::from_vec(v.clone()).unwrap();
            for (i, &el) in v.iter().enumerate() {
                prop_assert_eq!(p.at(i as El), Some(el));
            }
            prop_assert_eq!(v, Vec::from(p));
        }

        #[test]
        fn from_vec_not_injective(
            mut v in prop::collection::vec(0..36u32, 1..36)
        ) {
            let n = v.len() as El;
            for el in v.iter_mut() {
                *el %= n;
            }
            let mut v2 = v.clone();
            v2.sort();
            v2.dedup();
            prop_assume!(v2.len() < v.len());
            prop_assert!(Permutation::from_vec(v).is_err())
        }

        #[test]
        fn flat_roundtrip(perm in random_perm(0..=36u32)) {
            prop_assert_eq!(Permutation::from_string(&perm.to_string()).unwrap(), perm);
        }

        #[test]
        fn cycle_roundtrip_with_length(perm in random_perm(1..=36u32)) {
            let last = perm.len() as El - 1;
            let parsed = Permutation::from_cycle_string(&perm.to_cycle_string(), Some(last));
            prop_assert_eq!(parsed.unwrap(), perm);
        }

        #[test]
        fn cycle_roundtrip_on_support(perm in random_perm(0..=36u32)) {
            let parsed = Permutation::from_cycle_string(&perm.to_cycle_string(), None).unwrap();
            prop_assert!(parsed.len() <= perm.len());
            for el in perm.domain() {
                prop_assert_eq!(parsed.left_apply(el), perm.left_apply(el));
            }
        }

        #[test]
        fn identity_is_unit(perm in random_perm(0..=36u32)) {
            let id = Permutation::identity(perm.len()).unwrap();
            prop_assert_eq!(perm.compose(&id).unwrap(), perm.clone());
            prop_assert_eq!(id.compose(&perm).unwrap(), perm);
        }

        #[test]
        fn compose_is_function_composition(
            (a, b) in (0..=36u32).prop_flat_map(|n| (random_perm(Just(n)), random_perm(Just(n))))
        ) {
            let ab = a.compose(&b).unwrap();
            for el in a.domain() {
                prop_assert_eq!(ab.at(el), a.at(b.left_apply(el)));
            }
        }

        #[test]
        fn slice_action_matches_composition(
            (a, b) in (0..=36u32).prop_flat_map(|n| (random_perm(Just(n)), random_perm(Just(n))))
        ) {
            let data: Vec<El> = (0..a.len() as El).collect();
            let sequential = a.left_apply(b.left_apply(data.clone()));
            let combined = a.compose(&b).unwrap().left_apply(data);
            prop_assert_eq!(sequential, combined);
        }

        #[test]
        fn inverse_cancels(perm in random_perm(0..=36u32)) {
            let inv = perm.inverse();
            prop_assert!(perm.compose(&inv).unwrap().is_identity());
            prop_assert!(inv.compose(&perm).unwrap().is_identity());
            prop_assert_eq!(inv.sign(), perm.sign());
        }

        #[test]
        fn adding_signed_exponents(
            perm in random_perm(0..=36u32),
            a in -1_000_000..1_000_000isize,
            b in -1_000_000..1_000_000isize,
        ) {
            let combined = perm.pow(a).compose(&perm.pow(b)).unwrap();
            prop_assert_eq!(combined, perm.pow(a + b));
        }

        #[test]
        fn order_is_period(perm in random_perm(0..=36u32), k in 0..8usize) {
            let order = perm.order();
            prop_assert!(perm.pow(order).is_identity());
            prop_assert_eq!(perm.pow(order * k + 1), perm.clone());
            prop_assert_eq!(perm.pow(-1i64), perm.inverse());
        }

        #[test]
        fn sign_is_multiplicative(
            (a, b) in (0..=36u32).prop_flat_map(|n| (random_perm(Just(n)), random_perm(Just(n))))
        ) {
            prop_assert_eq!(a.compose(&b).unwrap().sign(), a.sign() * b.sign());
        }
    }
}
