// # dyndnsd library surface
//
// Exposes the HTTP layer so the endpoint tests can drive the router
// in-process; the binary in main.rs is the only other consumer.

pub mod server;
