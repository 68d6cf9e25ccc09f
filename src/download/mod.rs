//! HTTP delivery of the generated form.

pub mod handlers;
