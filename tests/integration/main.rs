//! HTTP-level tests against the assembled router.

mod helpers;

mod auth_test;
mod durable_test;
mod outage_test;
mod refresh_test;
