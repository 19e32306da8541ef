pub mod batches;
pub mod labels;
pub mod ledger;
pub mod locations;
pub mod operators;
pub mod outbound;
pub mod receiving;
pub mod skus;
