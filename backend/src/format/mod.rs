//! Display formatting helpers

pub mod currency;

pub use currency::{format_currency, CurrencyFormat};
