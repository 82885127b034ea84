//! Numeric building blocks for the test suite.

pub mod descriptive;
pub mod ks;
pub mod psi;

pub use descriptive::{distribution_shift, finite_sorted, mean, quantile, std_dev};
pub use ks::{ks_p_value, ks_statistic};
pub use psi::{categorical_psi, psi};
