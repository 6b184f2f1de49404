pub mod heuristic;

pub use heuristic::HeuristicVerifier;

pub mod prelude {
    pub use crate::heuristic::HeuristicVerifier;
    pub use ng_core::{Verdict, Verifier};
}
