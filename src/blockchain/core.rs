// core.rs splits responsibilities into submodules: block and ledger types,
// balance replay, and full-chain validation.
pub mod chain;
pub mod state;
pub mod validation;

pub use chain::*;
pub use state::*;
pub use validation::*;
