//! Resource manager model types.

mod deployment;
mod provider;
mod resource_group;
mod scope;
mod storage_account;
mod subscription;
mod virtual_machine;

pub use deployment::*;
pub use provider::*;
pub use resource_group::*;
pub use scope::*;
pub use storage_account::*;
pub use subscription::*;
pub use virtual_machine::*;
