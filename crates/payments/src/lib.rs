//! Mercado Pago integration for the marketplace checkout flow.
//!
//! - [`preference`] -- pure construction of hosted-checkout preferences.
//! - [`client`] -- REST client for preference creation and payment lookups,
//!   authenticated per call with the selling producer's own token
//!   (marketplace split, not merchant-of-record).
//! - [`oauth`] -- the account-linking flow (authorization URL, code
//!   exchange, account identity lookup).
//! - [`webhook`] -- the inbound-notification signature policy.
//! - [`config`] -- environment configuration for all of the above.

pub mod client;
pub mod config;
pub mod error;
pub mod oauth;
pub mod preference;
pub mod webhook;

pub use client::MercadoPagoClient;
pub use config::MercadoPagoConfig;
pub use error::PaymentError;
