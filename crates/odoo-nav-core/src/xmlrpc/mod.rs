//! Minimal XML-RPC implementation used to talk to Odoo.
//!
//! Odoo exposes its external API over XML-RPC at `/xmlrpc/2/common` and
//! `/xmlrpc/2/object`. This module covers the value model, the wire codec
//! for calls and responses (both directions, so tests can stand up a fake
//! server), and an async HTTP client.

pub mod client;
pub mod codec;
pub mod value;

pub use client::XmlRpcClient;
pub use codec::{
    decode_method_call, decode_response, encode_fault, encode_method_call, encode_response,
};
pub use value::Value;
