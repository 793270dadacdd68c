use std::error::Error as StdError;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use super::{BoxFuture, LeaderResolver};
use crate::error::NoLeaderError;

/// Prefix selecting the coordination-service resolver.
pub(super) const SCHEME: &str = "zk";

/// Children of the election group holding JSON `MasterInfo`.
const MEMBER_PREFIX: &str = "json.info_";

pub type StoreError = Box<dyn StdError + Send + Sync>;

/// Read access to a coordination service (ZooKeeper or equivalent).
///
/// The client never writes; it only lists the election group and reads
/// the leader's node.
pub trait CoordinationStore: Send + Sync {
    /// Names (not full paths) of the children of `path`.
    fn children<'a>(
        &'a self,
        url: &'a ZkUrl,
        path: &'a str,
    ) -> BoxFuture<'a, Result<Vec<String>, StoreError>>;

    /// Contents of the node at `path`.
    fn data<'a>(&'a self, url: &'a ZkUrl, path: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StoreError>>;
}

/// A parsed `zk://[auth@]host:port[,host:port...]/path` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZkUrl {
    pub auth: Option<String>,
    pub hosts: Vec<String>,
    pub path: String,
}

impl ZkUrl {
    pub fn parse(url: &str) -> Result<Self, NoLeaderError> {
        let rest = url
            .strip_prefix("zk://")
            .ok_or_else(|| NoLeaderError::InvalidUrl(format!("{url}: expected zk:// scheme")))?;

        let (authority, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, "/"),
        };
        let (auth, hosts) = match authority.rsplit_once('@') {
            Some((auth, hosts)) => (Some(auth.to_string()), hosts),
            None => (None, authority),
        };

        let hosts: Vec<String> = hosts
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .collect();
        if hosts.is_empty() {
            return Err(NoLeaderError::InvalidUrl(format!("{url}: no hosts")));
        }

        let path = match path.trim_end_matches('/') {
            "" => "/".to_string(),
            trimmed => trimmed.to_string(),
        };

        Ok(Self { auth, hosts, path })
    }

    fn child(&self, name: &str) -> String {
        if self.path == "/" {
            format!("/{name}")
        } else {
            format!("{}/{name}", self.path)
        }
    }
}

#[derive(Debug, Deserialize)]
struct MasterAddress {
    hostname: Option<String>,
    ip: Option<String>,
    port: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct MasterInfoJson {
    hostname: Option<String>,
    port: Option<u32>,
    address: Option<MasterAddress>,
}

impl MasterInfoJson {
    fn leader_url(&self) -> Option<String> {
        let address = self.address.as_ref();
        let host = address
            .and_then(|a| a.hostname.clone())
            .or_else(|| self.hostname.clone())
            .or_else(|| address.and_then(|a| a.ip.clone()))
            .filter(|h| !h.is_empty())?;
        let port = address.and_then(|a| a.port).or(self.port)?;
        Some(format!("http://{host}:{port}"))
    }
}

/// Reads the leading master from the Mesos election group.
pub struct ZkLeaderResolver {
    master: String,
    store: Option<Arc<dyn CoordinationStore>>,
}

impl ZkLeaderResolver {
    pub fn new(master: impl Into<String>, store: Option<Arc<dyn CoordinationStore>>) -> Self {
        Self {
            master: master.into(),
            store,
        }
    }

    async fn lookup(&self) -> Result<String, NoLeaderError> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| NoLeaderError::CoordinationUnavailable(self.master.clone()))?;
        let url = ZkUrl::parse(&self.master)?;

        let children = store
            .children(&url, &url.path)
            .await
            .map_err(|e| NoLeaderError::Coordination(e.to_string()))?;
        let leader_node = lowest_member(&children).ok_or(NoLeaderError::NotElected)?;
        let node_path = url.child(leader_node);
        debug!(node = %node_path, "reading leader from election group");

        let data = store
            .data(&url, &node_path)
            .await
            .map_err(|e| NoLeaderError::Coordination(e.to_string()))?;
        let info: MasterInfoJson = serde_json::from_slice(&data)
            .map_err(|e| NoLeaderError::InvalidMasterInfo(e.to_string()))?;
        let leader = info.leader_url().ok_or_else(|| {
            NoLeaderError::InvalidMasterInfo(format!("{node_path} has no usable address"))
        })?;

        info!(%leader, "discovered leading master");
        Ok(leader)
    }
}

impl LeaderResolver for ZkLeaderResolver {
    fn resolve(&self) -> BoxFuture<'_, Result<String, NoLeaderError>> {
        Box::pin(self.lookup())
    }
}

/// The election member with the lowest sequence number.
fn lowest_member(children: &[String]) -> Option<&str> {
    children
        .iter()
        .filter_map(|name| {
            let seq = name.strip_prefix(MEMBER_PREFIX)?.parse::<u64>().ok()?;
            Some((seq, name.as_str()))
        })
        .min_by_key(|(seq, _)| *seq)
        .map(|(_, name)| name)
}
