use std::iter::repeat_with;

use rand::{distributions::Distribution, Rng};

use crate::monomial::{Monomial, Token};

/// Distribution of random monomials in reduced form
///
/// Samples up to `max_sites` sites, each with a word of up to `max_len`
/// tokens drawn from `1..=max_token`. Adjacent tokens in a word always
/// differ, so no word contains a cancelling pair.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MonomialSampler {
    pub max_sites: usize,
    pub max_len: usize,
    pub max_token: Token,
}

impl MonomialSampler {
    pub fn new(max_sites: usize, max_len: usize, max_token: Token) -> Self {
        Self {
            max_sites,
            max_len,
            max_token,
        }
    }

    fn sample_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Token> {
        let mut len = rng.gen_range(0..=self.max_len);
        // no tokens to draw from
        if self.max_token < 1 {
            len = 0;
        } else if self.max_token < 2 {
            len = std::cmp::min(len, 1);
        }
        let mut word = Vec::with_capacity(len);
        if len == 0 {
            return word;
        }
        let mut last = rng.gen_range(1..=self.max_token);
        word.push(last);
        for _ in 1..len {
            // skip over the previous token
            let mut next = rng.gen_range(1..self.max_token);
            if next >= last {
                next += 1;
            }
            word.push(next);
            last = next;
        }
        word
    }
}

impl Distribution<Monomial> for MonomialSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Monomial {
        let nsites = rng.gen_range(0..=self.max_sites);
        let words = repeat_with(|| self.sample_word(rng)).take(nsites).collect();
        Monomial::from_words(words)
    }
}

#[cfg(test)]
mod tests {
    use rand_xoshiro::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn reduced_words() {
        const NTESTS: u32 = 200;

        let mut rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(1);
        let sampler = MonomialSampler::new(4, 6, 3);
        for _ in 0..NTESTS {
            let m: Monomial = sampler.sample(&mut rng);
            assert!(m.nsites() <= 4);
            for w in m.words() {
                assert!(w.len() <= 6);
                assert!(w.iter().all(|x| (1..=3).contains(x)));
                assert!(w.windows(2).all(|x| x[0] != x[1]));
            }
        }
    }

    #[test]
    fn single_token() {
        const NTESTS: u32 = 50;

        let mut rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(2);
        let sampler = MonomialSampler::new(2, 5, 1);
        for _ in 0..NTESTS {
            let m: Monomial = sampler.sample(&mut rng);
            assert!(m.words().iter().all(|w| w.len() <= 1));
        }
    }

    #[test]
    fn no_tokens() {
        const NTESTS: u32 = 20;

        let mut rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(3);
        let sampler = MonomialSampler {
            max_sites: 3,
            max_len: 4,
            max_token: 0,
        };
        for _ in 0..NTESTS {
            let m: Monomial = sampler.sample(&mut rng);
            assert!(m.is_identity());
        }
    }
}
