//! Parameter store implementations

mod env;
mod ssm;

pub use env::EnvParameterStore;
pub use ssm::{RealSsmClient, SsmClientTrait, SsmParameterStore};
