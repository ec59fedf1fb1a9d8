use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Ordered candidate authorities for the next upstream query.
///
/// Duplicates are kept and order is significant: the transport tries the
/// addresses front to back. A set is never edited after construction; each
/// delegation hop builds a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSet {
    addrs: Arc<[Ipv4Addr]>,
}

impl ServerSet {
    pub fn new(addrs: Vec<Ipv4Addr>) -> Self {
        Self {
            addrs: addrs.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn first(&self) -> Option<Ipv4Addr> {
        self.addrs.first().copied()
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.addrs.contains(&addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.addrs.iter().copied()
    }

    pub fn as_slice(&self) -> &[Ipv4Addr] {
        &self.addrs
    }
}

impl Default for ServerSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Ipv4Addr>> for ServerSet {
    fn from(addrs: Vec<Ipv4Addr>) -> Self {
        Self::new(addrs)
    }
}

impl FromIterator<Ipv4Addr> for ServerSet {
    fn from_iter<I: IntoIterator<Item = Ipv4Addr>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for ServerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, addr) in self.addrs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", addr)?;
        }
        f.write_str("]")
    }
}
