use std::iter::repeat_with;

use ffnt::Z64;
use rand::{distributions::Distribution, Rng};

use crate::{poly::Polynomial, rand::MonomialSampler};

// generate a random polynomial over Z_P
// the number of input terms is sampled uniformly between 0 and `max_terms`
pub fn gen_poly<const P: u64>(
    max_terms: usize,
    sampler: &MonomialSampler,
    mut rng: impl Rng,
) -> Polynomial<Z64<P>> {
    let nterms = rng.gen_range(0..=max_terms);
    let terms: Vec<_> = repeat_with(|| (sampler.sample(&mut rng), rng.gen::<Z64<P>>()))
        .take(nterms)
        .collect();
    Polynomial::from_terms(terms)
}

// generate a random polynomial with small integer coefficients
pub fn gen_int_poly(
    max_terms: usize,
    sampler: &MonomialSampler,
    mut rng: impl Rng,
) -> Polynomial<i64> {
    let nterms = rng.gen_range(0..=max_terms);
    let terms: Vec<_> = repeat_with(|| (sampler.sample(&mut rng), rng.gen_range(-3..=3)))
        .take(nterms)
        .collect();
    Polynomial::from_terms(terms)
}
