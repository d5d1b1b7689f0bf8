pub mod fallback;
pub mod health;
pub mod modules;
pub mod paypal;
