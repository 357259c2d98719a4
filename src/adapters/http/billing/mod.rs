//! Billing HTTP surface - checkout endpoint, payment webhook, and the
//! client-side gateway to the checkout endpoint.

mod client;
mod dto;
mod handlers;
mod routes;

pub use client::HttpCheckoutGateway;
pub use dto::{CheckoutRequest, CheckoutResponse, ErrorResponse};
pub use handlers::{
    create_checkout, handle_payment_webhook, BillingApiError, BillingAppState, CheckoutParams,
};
pub use routes::{billing_routes, webhook_routes};
