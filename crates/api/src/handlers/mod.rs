pub mod auth;
pub mod beats;
pub mod checkout;
pub mod mercadopago;
pub mod payments;
pub mod payout;
