//! Method handlers
//!
//! Each module adds the handler for one method to [`crate::Dispatcher`].
//! Every recognized request is answered with success; no handler produces
//! a 4xx or 5xx.

mod ack;
mod bye;
mod invite;
mod register;
