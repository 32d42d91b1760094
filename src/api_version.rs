//! API versions pinned per resource provider.
//!
//! The resource manager rejects requests whose `api-version` it does not
//! serve for a given provider and operation, so these are fixed here rather
//! than chosen per call.

/// `Microsoft.Resources` resource groups, deployments, providers.
pub const RESOURCES: &str = "2017-05-10";

/// Subscriptions, tenants and locations.
pub const SUBSCRIPTIONS: &str = "2016-06-01";

/// `Microsoft.Compute` virtual machines.
pub const COMPUTE: &str = "2017-03-30";

/// `Microsoft.Storage` accounts.
pub const STORAGE: &str = "2016-01-01";
