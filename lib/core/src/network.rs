use crate::graph::{Link, NewHost, NewLink};
use crate::validate::{validate_host, validate_link};
use crate::{Error, Result};
use ahash::AHashMap;
use std::collections::VecDeque;
use tracing::debug;

/// Outgoing edge, stored in its source host's entry.
#[derive(Debug, Clone)]
struct Edge {
    to: usize,
    description: String,
}

#[derive(Debug, Clone)]
struct HostEntry {
    name: String,
    /// Outgoing edges in insertion order
    edges: Vec<Edge>,
    /// Destination host slot -> position in `edges`
    by_target: AHashMap<usize, usize>,
}

impl HostEntry {
    fn new(name: String) -> Self {
        Self {
            name,
            edges: Vec::new(),
            by_target: AHashMap::new(),
        }
    }
}

/// In-memory directed network of hosts and described links.
///
/// Hosts live in insertion order in a slot vector, with a name index on the
/// side. Every host keeps its outgoing edges in insertion order too, so
/// listings and path tie-breaking are reproducible.
///
/// The store does no locking of its own: mutators take `&mut self`. Callers
/// that share it between threads wrap it in a lock.
#[derive(Debug, Clone, Default)]
pub struct Network {
    hosts: Vec<HostEntry>,
    index: AHashMap<String, usize>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all known hosts, in the order they were added.
    pub fn hosts(&self) -> Vec<String> {
        self.hosts.iter().map(|h| h.name.clone()).collect()
    }

    /// Every link, grouped by source host in host insertion order.
    pub fn links(&self) -> Vec<Link> {
        self.hosts
            .iter()
            .flat_map(|host| {
                host.edges.iter().map(move |edge| Link {
                    from: host.name.clone(),
                    to: self.hosts[edge.to].name.clone(),
                    description: edge.description.clone(),
                })
            })
            .collect()
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn link_count(&self) -> usize {
        self.hosts.iter().map(|h| h.edges.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn contains_host(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Add a host with no outgoing links.
    pub fn add_host(&mut self, host: Option<&NewHost>) -> Result<()> {
        let host = host.ok_or(Error::ArgumentMissing { argument: "host" })?;
        validate_host(host)?;

        // Validation guarantees a name is present
        let name = host.name().unwrap_or_default();
        if self.index.contains_key(name) {
            return Err(Error::AlreadyExists {
                entity: "host",
                field: "name",
                value: name.to_string(),
            });
        }

        let slot = self.hosts.len();
        self.hosts.push(HostEntry::new(name.to_string()));
        self.index.insert(name.to_string(), slot);
        debug!(host = name, hosts = self.hosts.len(), "host added");
        Ok(())
    }

    /// Add a link, or overwrite the description of an existing `from -> to` link.
    pub fn add_link(&mut self, link: Option<&NewLink>) -> Result<()> {
        let link = link.ok_or(Error::ArgumentMissing { argument: "link" })?;
        validate_link(link)?;

        let from = link.from_host().unwrap_or_default();
        let to = link.to_host().unwrap_or_default();
        let description = link.description().unwrap_or_default();

        let from_slot = self.slot(from)?;
        let to_slot = self.slot(to)?;

        let entry = &mut self.hosts[from_slot];
        match entry.by_target.get(&to_slot) {
            Some(&pos) => {
                debug!(from, to, description, "link description replaced");
                entry.edges[pos].description = description.to_string();
            }
            None => {
                debug!(from, to, description, "link added");
                entry.by_target.insert(to_slot, entry.edges.len());
                entry.edges.push(Edge {
                    to: to_slot,
                    description: description.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Fewest-hop route from `source` to `target`.
    ///
    /// Breadth-first over outgoing edges in insertion order; a host keeps the
    /// predecessor it was first discovered through, so among equally short
    /// routes the one discovered first wins. Returns an empty path when the
    /// target is unreachable or equal to the source. Empty strings count as
    /// missing arguments.
    pub fn path(&self, source: Option<&str>, target: Option<&str>) -> Result<Vec<Link>> {
        let source = source
            .filter(|s| !s.is_empty())
            .ok_or(Error::ArgumentMissing { argument: "source" })?;
        let target = target
            .filter(|s| !s.is_empty())
            .ok_or(Error::ArgumentMissing { argument: "target" })?;

        let start = self.slot(source)?;
        let goal = self.slot(target)?;

        let mut discovered = vec![false; self.hosts.len()];
        // For each discovered host: (predecessor slot, edge position in predecessor)
        let mut predecessor: Vec<Option<(usize, usize)>> = vec![None; self.hosts.len()];
        let mut frontier = VecDeque::new();

        discovered[start] = true;
        frontier.push_back(start);

        while let Some(current) = frontier.pop_front() {
            if current == goal {
                break;
            }
            for (pos, edge) in self.hosts[current].edges.iter().enumerate() {
                if !discovered[edge.to] {
                    discovered[edge.to] = true;
                    predecessor[edge.to] = Some((current, pos));
                    frontier.push_back(edge.to);
                }
            }
        }

        // The start slot never gets a predecessor, so the walk stops there.
        let mut route = Vec::new();
        let mut current = goal;
        while let Some((from, pos)) = predecessor[current] {
            route.push(Link {
                from: self.hosts[from].name.clone(),
                to: self.hosts[current].name.clone(),
                description: self.hosts[from].edges[pos].description.clone(),
            });
            current = from;
        }
        route.reverse();

        debug!(source, target, hops = route.len(), "path computed");
        Ok(route)
    }

    /// Drop every host and link.
    pub fn clear(&mut self) {
        self.hosts.clear();
        self.index.clear();
        debug!("network cleared");
    }

    fn slot(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn network_with(hosts: &[&str]) -> Network {
        let mut network = Network::new();
        for name in hosts {
            network.add_host(Some(&NewHost::new(*name))).unwrap();
        }
        network
    }

    fn link(network: &mut Network, from: &str, to: &str, description: &str) {
        network
            .add_link(Some(&NewLink::new(from, to, description)))
            .unwrap();
    }

    fn kind<T: std::fmt::Debug>(result: Result<T>) -> ErrorKind {
        result.unwrap_err().kind()
    }

    #[test]
    fn test_add_host_requires_argument() {
        let mut network = Network::new();
        assert_eq!(
            network.add_host(None),
            Err(Error::ArgumentMissing { argument: "host" })
        );
    }

    #[test]
    fn test_add_host_validation() {
        let mut network = Network::new();
        for host in [NewHost::default(), NewHost::new(""), NewHost::new("no spaces")] {
            assert_eq!(kind(network.add_host(Some(&host))), ErrorKind::ValidationFailed);
        }
        assert!(network.is_empty());

        assert!(network.add_host(Some(&NewHost::new("test"))).is_ok());
        assert_eq!(network.hosts(), vec!["test".to_string()]);
    }

    #[test]
    fn test_duplicate_host_rejected() {
        let mut network = network_with(&["test"]);
        let err = network.add_host(Some(&NewHost::new("test"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert!(err.to_string().contains("test"));
        assert_eq!(network.host_count(), 1);
    }

    #[test]
    fn test_add_link_validation_runs_before_lookup() {
        let mut network = Network::new();
        assert_eq!(
            network.add_link(None),
            Err(Error::ArgumentMissing { argument: "link" })
        );

        // No hosts exist, yet malformed input reports validation first
        let partial = NewLink {
            from: Some("test2".into()),
            to: Some("test".into()),
            ..Default::default()
        };
        assert_eq!(kind(network.add_link(Some(&partial))), ErrorKind::ValidationFailed);
        assert_eq!(
            kind(network.add_link(Some(&NewLink::default()))),
            ErrorKind::ValidationFailed
        );

        assert_eq!(
            kind(network.add_link(Some(&NewLink::new("test2", "test", "ftp")))),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_add_link_checks_from_before_to() {
        let mut network = Network::new();
        let request = NewLink::new("test1", "test2", "ftp");

        assert_eq!(
            network.add_link(Some(&request)),
            Err(Error::NotFound { host: "test1".into() })
        );

        network.add_host(Some(&NewHost::new("test1"))).unwrap();
        assert_eq!(
            network.add_link(Some(&request)),
            Err(Error::NotFound { host: "test2".into() })
        );

        network.add_host(Some(&NewHost::new("test2"))).unwrap();
        assert!(network.add_link(Some(&request)).is_ok());
        assert!(network.links().contains(&Link::new("test1", "test2", "ftp")));
    }

    #[test]
    fn test_relinking_overwrites_description_in_place() {
        let mut network = network_with(&["a", "b", "c"]);
        link(&mut network, "a", "b", "ftp");
        link(&mut network, "a", "c", "scp");
        link(&mut network, "a", "b", "rsync");

        assert_eq!(network.link_count(), 2);
        assert_eq!(
            network.links(),
            vec![Link::new("a", "b", "rsync"), Link::new("a", "c", "scp")]
        );
    }

    #[test]
    fn test_links_are_directed() {
        let mut network = network_with(&["a", "b"]);
        link(&mut network, "a", "b", "ftp");

        assert_eq!(network.path(Some("a"), Some("b")).unwrap().len(), 1);
        assert!(network.path(Some("b"), Some("a")).unwrap().is_empty());
    }

    #[test]
    fn test_path_argument_order() {
        let network = Network::new();
        assert_eq!(
            network.path(None, None),
            Err(Error::ArgumentMissing { argument: "source" })
        );
        assert_eq!(
            network.path(None, Some("test")),
            Err(Error::ArgumentMissing { argument: "source" })
        );
        assert_eq!(
            network.path(Some("test"), None),
            Err(Error::ArgumentMissing { argument: "target" })
        );
        assert_eq!(
            network.path(Some(""), Some("test")),
            Err(Error::ArgumentMissing { argument: "source" })
        );
    }

    #[test]
    fn test_path_unknown_hosts() {
        let mut network = Network::new();
        assert_eq!(kind(network.path(Some("test1"), Some("test2"))), ErrorKind::NotFound);

        network.add_host(Some(&NewHost::new("test1"))).unwrap();
        assert_eq!(
            network.path(Some("test1"), Some("test2")),
            Err(Error::NotFound { host: "test2".into() })
        );
        assert_eq!(
            network.path(Some("test2"), Some("test1")),
            Err(Error::NotFound { host: "test2".into() })
        );
    }

    #[test]
    fn test_path_to_self_is_empty() {
        let mut network = network_with(&["a", "b"]);
        link(&mut network, "a", "b", "ftp");
        link(&mut network, "b", "a", "ftp");
        assert!(network.path(Some("a"), Some("a")).unwrap().is_empty());
    }

    #[test]
    fn test_equal_length_ties_follow_insertion_order() {
        let mut network = network_with(&["s", "x", "y", "t"]);
        link(&mut network, "s", "y", "first");
        link(&mut network, "s", "x", "second");
        link(&mut network, "x", "t", "viaX");
        link(&mut network, "y", "t", "viaY");

        let path = network.path(Some("s"), Some("t")).unwrap();
        assert_eq!(
            path,
            vec![Link::new("s", "y", "first"), Link::new("y", "t", "viaY")]
        );
    }

    #[test]
    fn test_clear() {
        let mut network = network_with(&["a", "b"]);
        link(&mut network, "a", "b", "ftp");
        network.clear();

        assert!(network.is_empty());
        assert!(network.links().is_empty());
        assert!(!network.contains_host("a"));
        assert!(network.add_host(Some(&NewHost::new("a"))).is_ok());
    }
}
