//! Candle History Value Objects

mod candle;

pub use candle::Candle;

#[cfg(test)]
pub(crate) use candle::fixtures;
