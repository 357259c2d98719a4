//! Subscription handlers - polling, checkout, and webhook reconciliation.

mod handle_payment_webhook;
mod poll;
mod start_checkout;

pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, WebhookDisposition,
};
pub use poll::{PollConfig, PollOutcome, SubscriptionPoller};
pub use start_checkout::{CheckoutRedirect, StartCheckoutHandler};
