//! Leader discovery.
//!
//! A scheduler may be pointed at any master. Before subscribing it asks
//! which master currently leads, either over HTTP (`/redirect`) or by
//! reading the leader-election group in a coordination service.

mod redirect;
mod zk;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub use self::redirect::HttpLeaderResolver;
pub use self::zk::{CoordinationStore, StoreError, ZkLeaderResolver, ZkUrl};

use crate::error::NoLeaderError;
use crate::transport::HttpTransport;

/// Boxed, sendable future returned by the resolver traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Produces the URL of the currently leading master.
pub trait LeaderResolver: Send + Sync {
    fn resolve(&self) -> BoxFuture<'_, Result<String, NoLeaderError>>;
}

/// Always returns the same leader. Useful when the master is fixed.
#[derive(Debug, Clone)]
pub struct StaticLeaderResolver(pub String);

impl LeaderResolver for StaticLeaderResolver {
    fn resolve(&self) -> BoxFuture<'_, Result<String, NoLeaderError>> {
        let leader = self.0.clone();
        Box::pin(async move { Ok(leader) })
    }
}

/// Pick the resolver for a configured master reference.
///
/// `zk://` references go to the coordination service, everything else is
/// probed over HTTP.
pub fn for_master(
    master_url: &str,
    transport: HttpTransport,
    store: Option<Arc<dyn CoordinationStore>>,
) -> Box<dyn LeaderResolver> {
    if master_url.starts_with(zk::SCHEME) {
        Box::new(ZkLeaderResolver::new(master_url, store))
    } else {
        Box::new(HttpLeaderResolver::new(master_url, transport))
    }
}
