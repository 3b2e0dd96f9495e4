use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Error)]
pub enum Error {
    #[error("Site index {0} is negative")]
    NegativeSite(i64),
    #[error("Site index {0} is too large")]
    SiteTooLarge(i64),
    #[error("Cannot raise polynomial to negative power {0}")]
    NegativeExponent(i64),
}
