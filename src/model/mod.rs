//! Neural network architecture
//!
//! A small feed-forward classifier mapping an encoded feature row to
//! premium category logits.

pub mod premium_net;

pub use premium_net::{PremiumNet, PremiumNetConfig};
