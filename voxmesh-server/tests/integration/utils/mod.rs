
pub use test_peer::*;
