pub mod beat;
pub mod license;
pub mod payment_event;
pub mod session;
pub mod user;
