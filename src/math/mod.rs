pub mod random;
pub mod vector;

pub use random::WeightInit;
