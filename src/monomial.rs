use std::{
    cmp::Ordering,
    fmt::{self, Display},
    ops::{Mul, MulAssign},
};

use itertools::Itertools;

use crate::{
    error::Error,
    poly::{Operand, Polynomial},
    traits::{Conjugate, One, Ring, WithSites},
};

/// Exponent token of a dichotomic generator
pub type Token = i64;

/// Product of dichotomic generators
///
/// Stores one word of tokens per site. Trailing empty words are never
/// stored, so equal products have identical representations.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Monomial {
    words: Vec<Vec<Token>>,
}

impl Monomial {
    /// Construct from the words at sites 0, 1, ...
    ///
    /// A single token `x` is passed as the word `[x]`.
    pub fn new<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: IntoIterator<Item = Token>,
    {
        let words = words
            .into_iter()
            .map(|w| w.into_iter().collect())
            .collect();
        Self::from_words(words)
    }

    /// Construct from the words at sites 0, 1, ...
    ///
    /// Adjacent equal tokens in a word cancel.
    pub fn from_words(words: Vec<Vec<Token>>) -> Self {
        let words = words.into_iter().map(reduce_word).collect();
        Self::from_reduced_words(words)
    }

    fn from_reduced_words(mut words: Vec<Vec<Token>>) -> Self {
        debug_assert!(words.iter().all(|w| is_reduced(w)));
        trim_empty(&mut words);
        Self { words }
    }

    fn from_words_unchecked(words: Vec<Vec<Token>>) -> Self {
        debug_assert!(!matches!(words.last(), Some(w) if w.is_empty()));
        debug_assert!(words.iter().all(|w| is_reduced(w)));
        Self { words }
    }

    /// The empty product
    pub fn identity() -> Self {
        Self::default()
    }

    /// Single generator `x` at `site`
    ///
    /// # Panics
    ///
    /// Panics if `site` exceeds [MAX_SITE].
    pub fn var(site: usize, x: Token) -> Self {
        assert!(site <= MAX_SITE, "Site index {site} exceeds {MAX_SITE}");
        let mut words = vec![Vec::new(); site + 1];
        words[site].push(x);
        Self::from_words_unchecked(words)
    }

    /// Single generator `x` at `site`, rejecting invalid sites
    pub fn try_var(site: i64, x: Token) -> Result<Self, Error> {
        if site < 0 {
            return Err(Error::NegativeSite(site));
        }
        if site as u64 > MAX_SITE as u64 {
            return Err(Error::SiteTooLarge(site));
        }
        Ok(Self::var(site as usize, x))
    }

    pub fn words(&self) -> &[Vec<Token>] {
        self.words.as_ref()
    }

    pub fn into_words(self) -> Vec<Vec<Token>> {
        self.words
    }

    /// Word at the given site, empty if the site is unused
    pub fn word(&self, site: usize) -> &[Token] {
        self.words.get(site).map(|w| w.as_slice()).unwrap_or_default()
    }

    /// Number of sites up to and including the last occupied one
    pub fn nsites(&self) -> usize {
        self.words.len()
    }

    /// Total number of generators
    pub fn order(&self) -> usize {
        self.words.iter().map(|w| w.len()).sum()
    }

    pub fn is_identity(&self) -> bool {
        self.words.is_empty()
    }

    /// Promote to a polynomial with unit coefficient
    pub fn into_poly<T: Ring>(self) -> Polynomial<T> {
        Polynomial::monomial(self, T::one())
    }

    /// Single-term polynomial `self * coeff`
    ///
    /// This is the zero polynomial if `coeff` is zero.
    pub fn scale<T: Ring>(self, coeff: T) -> Polynomial<T> {
        Polynomial::monomial(self, coeff)
    }

    /// `-self` as a polynomial
    pub fn neg_poly<T: Ring>(self) -> Polynomial<T> {
        Polynomial::monomial(self, -T::one())
    }

    /// `self + rhs` as a polynomial
    pub fn add_mono<T: Ring>(&self, rhs: &Monomial) -> Polynomial<T> {
        Polynomial::from_terms([(self.clone(), T::one()), (rhs.clone(), T::one())])
    }

    /// `self - rhs` as a polynomial
    pub fn sub_mono<T: Ring>(&self, rhs: &Monomial) -> Polynomial<T> {
        Polynomial::from_terms([(self.clone(), T::one()), (rhs.clone(), -T::one())])
    }

    pub fn mul_operand<T: Ring>(&self, rhs: Operand<T>) -> Polynomial<T> {
        match rhs {
            Operand::Monomial(m) => (self * &m).into_poly(),
            Operand::Polynomial(p) => self * &p,
            Operand::Scalar(c) => self.clone().scale(c),
        }
    }
}

/// Largest supported site index
pub const MAX_SITE: usize = u16::MAX as usize;

// cancel adjacent equal tokens
fn reduce_word(word: Vec<Token>) -> Vec<Token> {
    if is_reduced(&word) {
        return word;
    }
    let mut res: Vec<Token> = Vec::with_capacity(word.len());
    for x in word {
        if res.last() == Some(&x) {
            res.pop();
        } else {
            res.push(x);
        }
    }
    res
}

fn is_reduced(word: &[Token]) -> bool {
    word.windows(2).all(|x| x[0] != x[1])
}

fn trim_empty(words: &mut Vec<Vec<Token>>) {
    let len = words
        .iter()
        .rposition(|w| !w.is_empty())
        .map(|pos| pos + 1)
        .unwrap_or_default();
    words.truncate(len);
}

// Product of two words at the same site
//
// Generators square to one, so matching tokens at the junction cancel
// pairwise, working outwards from the junction.
fn mul_words(x: &[Token], y: &[Token]) -> Vec<Token> {
    let ncancel = x
        .iter()
        .rev()
        .zip(y.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let mut res = Vec::with_capacity(x.len() + y.len() - 2 * ncancel);
    res.extend_from_slice(&x[..x.len() - ncancel]);
    res.extend_from_slice(&y[ncancel..]);
    res
}

impl<'a, 'b> Mul<&'b Monomial> for &'a Monomial {
    type Output = Monomial;

    fn mul(self, rhs: &'b Monomial) -> Self::Output {
        let common = std::cmp::min(self.nsites(), rhs.nsites());
        let rest = if self.nsites() > common {
            &self.words[common..]
        } else {
            &rhs.words[common..]
        };
        let mut words = Vec::with_capacity(common + rest.len());
        words.extend(
            self.words
                .iter()
                .zip(rhs.words.iter())
                .map(|(x, y)| mul_words(x, y)),
        );
        words.extend_from_slice(rest);
        Monomial::from_reduced_words(words)
    }
}

impl<'a> Mul<&'a Monomial> for Monomial {
    type Output = Monomial;

    fn mul(self, rhs: &'a Monomial) -> Self::Output {
        &self * rhs
    }
}

impl<'a> Mul<Monomial> for &'a Monomial {
    type Output = Monomial;

    fn mul(self, rhs: Monomial) -> Self::Output {
        self * &rhs
    }
}

impl Mul for Monomial {
    type Output = Monomial;

    fn mul(self, rhs: Monomial) -> Self::Output {
        &self * &rhs
    }
}

impl<'a> MulAssign<&'a Monomial> for Monomial {
    fn mul_assign(&mut self, rhs: &'a Monomial) {
        *self = &*self * rhs;
    }
}

impl MulAssign for Monomial {
    fn mul_assign(&mut self, rhs: Monomial) {
        *self *= &rhs;
    }
}

impl One for Monomial {
    fn one() -> Self {
        Self::identity()
    }

    fn is_one(&self) -> bool {
        self.is_identity()
    }
}

impl Conjugate for Monomial {
    fn conjugate(&self) -> Self {
        let words = self
            .words
            .iter()
            .map(|w| w.iter().rev().copied().collect())
            .collect();
        Self::from_words_unchecked(words)
    }
}

impl Ord for Monomial {
    /// Order by total degree, then prefer longer words site by site,
    /// then compare the words lexicographically
    fn cmp(&self, other: &Self) -> Ordering {
        let first_difference = |ord: &Ordering| ord.is_ne();
        self.order()
            .cmp(&other.order())
            .then_with(|| {
                self.words
                    .iter()
                    .zip(other.words.iter())
                    .map(|(u, v)| v.len().cmp(&u.len()))
                    .find(first_difference)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| {
                self.words
                    .iter()
                    .zip(other.words.iter())
                    .map(|(u, v)| u.cmp(v))
                    .find(first_difference)
                    .unwrap_or(Ordering::Equal)
            })
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Default label of a site: `A` for site 0, `B` for site 1, ...
pub fn site_label(site: usize) -> String {
    if site < 26 {
        char::from(b'A' + site as u8).to_string()
    } else {
        format!("#{site}:")
    }
}

pub struct FmtMonomial<'a, 'b, S> {
    m: &'a Monomial,
    labels: &'b [S],
}

impl<'a, 'b, S: Display + 'b> WithSites<'a, &'b [S]> for Monomial {
    type Output = FmtMonomial<'a, 'b, S>;

    fn with_sites(&'a self, labels: &'b [S]) -> Self::Output {
        FmtMonomial { m: self, labels }
    }
}

impl<'a, 'b, S: Display> Display for FmtMonomial<'a, 'b, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.m.is_identity() {
            return write!(f, "Id");
        }
        let gens = self
            .m
            .words()
            .iter()
            .enumerate()
            .flat_map(|(site, w)| w.iter().map(move |x| (site, x)))
            .map(|(site, x)| match self.labels.get(site) {
                Some(label) => format!("{label}{x}"),
                None => format!("{}{x}", site_label(site)),
            });
        write!(f, "{}", gens.format(" "))
    }
}

impl Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: &[&str] = &[];
        self.with_sites(labels).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash, Hasher},
    };

    use rand::{distributions::Distribution, Rng};
    use rand_xoshiro::rand_core::SeedableRng;

    use super::*;
    use crate::rand::MonomialSampler;

    fn log_init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn hash(m: &Monomial) -> u64 {
        let mut hasher = DefaultHasher::new();
        m.hash(&mut hasher);
        hasher.finish()
    }

    const SAMPLER: MonomialSampler = MonomialSampler {
        max_sites: 3,
        max_len: 4,
        max_token: 3,
    };

    #[test]
    fn canonical_form() {
        log_init();

        let a = Monomial::new([vec![1, 2], vec![], vec![3], vec![], vec![]]);
        let b = Monomial::new([vec![1, 2], vec![], vec![3]]);
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));
        assert_eq!(a.nsites(), 3);
        assert_eq!(Monomial::from_words(a.words().to_vec()), a);

        let empty = Monomial::new([Vec::<Token>::new(), vec![]]);
        assert_eq!(empty, Monomial::identity());
        assert!(empty.is_identity());
        assert_eq!(empty.order(), 0);
    }

    #[test]
    fn var() {
        log_init();

        let b3 = Monomial::var(1, 3);
        assert_eq!(b3, Monomial::new([vec![], vec![3]]));
        let empty: &[Token] = &[];
        let three: &[Token] = &[3];
        assert_eq!(b3.word(0), empty);
        assert_eq!(b3.word(1), three);
        assert_eq!(b3.word(7), empty);
        assert_eq!(Monomial::try_var(1, 3), Ok(b3));
        assert_eq!(Monomial::try_var(-1, 3), Err(Error::NegativeSite(-1)));
        assert_eq!(
            Monomial::try_var(MAX_SITE as i64, 3).map(|m| m.nsites()),
            Ok(MAX_SITE + 1)
        );
        assert_eq!(
            Monomial::try_var(i64::MAX, 3),
            Err(Error::SiteTooLarge(i64::MAX))
        );
    }

    #[test]
    #[should_panic]
    fn var_site_too_large() {
        Monomial::var(usize::MAX, 1);
    }

    #[test]
    fn reduce_on_construction() {
        log_init();

        assert_eq!(Monomial::new([[1, 1]]), Monomial::identity());
        assert_eq!(Monomial::new([[1, 2, 2]]), Monomial::var(0, 1));
        assert_eq!(Monomial::new([[1, 2, 2, 1, 3]]), Monomial::var(0, 3));
        assert_eq!(
            Monomial::new([vec![4], vec![2, 3, 3, 2]]),
            Monomial::var(0, 4)
        );
        let a = Monomial::new([[1, 1, 2]]);
        assert_eq!(a, Monomial::var(0, 2));
        assert_eq!(hash(&a), hash(&Monomial::var(0, 2)));
        assert_eq!(a.order(), 1);
    }

    #[test]
    fn associativity_unreduced_input() {
        log_init();

        let a = Monomial::new([[1, 2, 2]]);
        let b = Monomial::var(0, 2);
        let c = Monomial::new([[2, 1]]);
        assert_eq!((&a * &b) * &c, Monomial::identity());
        assert_eq!(&a * (&b * &c), Monomial::identity());

        const NTESTS: u32 = 300;
        let mut rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(5);
        let word = |rng: &mut rand_xoshiro::Xoshiro256StarStar| -> Vec<Token> {
            let len = rng.gen_range(0..=5);
            (0..len).map(|_| rng.gen_range(1..=2)).collect()
        };
        for _ in 0..NTESTS {
            let a = Monomial::new([word(&mut rng), word(&mut rng)]);
            let b = Monomial::new([word(&mut rng)]);
            let c = Monomial::new([word(&mut rng), word(&mut rng)]);
            assert_eq!((&a * &b) * &c, &a * (&b * &c), "{a} * {b} * {c}");
        }
    }

    #[test]
    fn merge() {
        log_init();

        let a = Monomial::new([[1, 2]]);
        let b = Monomial::new([[2, 3]]);
        assert_eq!(&a * &b, Monomial::new([[1, 3]]));

        let c = Monomial::new([[5, 6]]);
        assert_eq!(&a * &c, Monomial::new([[1, 2, 5, 6]]));

        assert_eq!(&a * &a.conjugate(), Monomial::identity());

        let a1 = Monomial::var(0, 1);
        let a2 = Monomial::var(0, 2);
        assert_eq!(&a1 * &a1, Monomial::identity());
        assert_eq!(&a1 * &a2, Monomial::new([[1, 2]]));
        assert_eq!(&a2 * &a1, Monomial::new([[2, 1]]));
        assert_ne!(&a1 * &a2, &a2 * &a1);
    }

    #[test]
    fn merge_trims() {
        log_init();

        let a = Monomial::new([vec![1], vec![2]]);
        let b = Monomial::new([vec![], vec![2]]);
        let prod = &a * &b;
        assert_eq!(prod, Monomial::var(0, 1));
        assert_eq!(prod.nsites(), 1);

        let c = Monomial::new([vec![4], vec![], vec![1, 2]]);
        assert_eq!(&a * &c, Monomial::new([vec![1, 4], vec![2], vec![1, 2]]));
        assert_eq!(&c * &a, Monomial::new([vec![4, 1], vec![2], vec![1, 2]]));
    }

    #[test]
    fn identity() {
        log_init();

        const NTESTS: u32 = 100;
        let mut rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(1);
        let id = Monomial::one();
        for _ in 0..NTESTS {
            let a = SAMPLER.sample(&mut rng);
            assert_eq!(&a * &id, a);
            assert_eq!(&id * &a, a);
        }
    }

    #[test]
    fn associativity() {
        log_init();

        const NTESTS: u32 = 500;
        let mut rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(1);
        for _ in 0..NTESTS {
            let a = SAMPLER.sample(&mut rng);
            let b = SAMPLER.sample(&mut rng);
            let c = SAMPLER.sample(&mut rng);
            assert_eq!((&a * &b) * &c, &a * (&b * &c), "{a} * {b} * {c}");
        }
    }

    #[test]
    fn degree() {
        log_init();

        let a = Monomial::new([vec![1, 2], vec![3]]);
        let b = Monomial::new([vec![3], vec![], vec![1]]);
        assert_eq!((&a * &b).order(), a.order() + b.order());

        // one cancellation at site 0, two at site 1
        let a = Monomial::new([vec![1, 2], vec![1, 2, 3]]);
        let b = Monomial::new([vec![2, 3], vec![3, 2]]);
        let prod = &a * &b;
        assert_eq!(prod, Monomial::new([vec![1, 3], vec![1]]));
        assert_eq!(prod.order(), a.order() + b.order() - 2 * (1 + 2));
    }

    #[test]
    fn conjugate() {
        log_init();

        let a = Monomial::new([vec![1, 2, 3], vec![4], vec![5, 6]]);
        assert_eq!(
            a.conjugate(),
            Monomial::new([vec![3, 2, 1], vec![4], vec![6, 5]])
        );

        const NTESTS: u32 = 100;
        let mut rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(2);
        for _ in 0..NTESTS {
            let a = SAMPLER.sample(&mut rng);
            let b = SAMPLER.sample(&mut rng);
            assert_eq!(a.conjugate().conjugate(), a);
            assert_eq!(a.conjugate().order(), a.order());
            assert_eq!((&a * &b).conjugate(), b.conjugate() * a.conjugate());
        }
    }

    #[test]
    fn ordering() {
        log_init();

        let id = Monomial::identity();
        let a1 = Monomial::var(0, 1);
        let a2 = Monomial::var(0, 2);
        let b1 = Monomial::var(1, 1);
        let a1a2 = Monomial::new([[1, 2]]);
        let a1b1 = Monomial::new([[1], [1]]);

        assert!(id < a1);
        assert!(a1 < a2);
        assert!(a2 < b1);
        assert!(b1 < a1a2);
        // longer words at earlier sites come first
        assert!(a1a2 < a1b1);
        assert!(a1a2 >= a1a2.clone());
        assert!(a1b1 > a1a2);

        let mut sorted = vec![a1b1.clone(), b1.clone(), id.clone(), a1a2.clone()];
        sorted.sort();
        assert_eq!(sorted, [id, b1, a1a2, a1b1]);
    }

    #[test]
    fn ordering_consistent_with_eq() {
        log_init();

        const NTESTS: u32 = 500;
        let mut rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(3);
        for _ in 0..NTESTS {
            let a = SAMPLER.sample(&mut rng);
            let b = if rng.gen_bool(0.2) {
                a.clone()
            } else {
                SAMPLER.sample(&mut rng)
            };
            assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
            assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        }
    }

    #[test]
    fn display() {
        log_init();

        assert_eq!(Monomial::identity().to_string(), "Id");
        assert_eq!(Monomial::var(2, 5).to_string(), "C5");
        let m = Monomial::new([vec![1, 2], vec![], vec![-3]]);
        assert_eq!(m.to_string(), "A1 A2 C-3");
        assert_eq!(m.with_sites(&["x", "y"][..]).to_string(), "x1 x2 C-3");
        assert_eq!(site_label(25), "Z");
        assert_eq!(site_label(26), "#26:");
    }
}
