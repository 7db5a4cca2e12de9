//! Use cases

mod net_log_binding;

pub use net_log_binding::NetLogBinding;
