use std::fmt;

/// One kind of extractable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    Stream,
    Playlist,
    Channel,
    Search,
    Comments,
    BulletComments,
    Suggestions,
    Subscriptions,
    Trending,
}

impl Capability {
    pub const ALL: [Capability; 9] = [
        Capability::Stream,
        Capability::Playlist,
        Capability::Channel,
        Capability::Search,
        Capability::Comments,
        Capability::BulletComments,
        Capability::Suggestions,
        Capability::Subscriptions,
        Capability::Trending,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Stream => "stream",
            Capability::Playlist => "playlist",
            Capability::Channel => "channel",
            Capability::Search => "search",
            Capability::Comments => "comments",
            Capability::BulletComments => "bullet-comments",
            Capability::Suggestions => "suggestions",
            Capability::Subscriptions => "subscriptions",
            Capability::Trending => "trending",
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of capabilities a service advertises. Fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilitySet(u16);

impl CapabilitySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.contains(*c))
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// Name and capability manifest of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub name: String,
    pub capabilities: CapabilitySet,
}

/// What kind of resource a URL points at, as far as one service can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    None,
    Stream,
    Channel,
    Playlist,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_set_membership() {
        let set: CapabilitySet = [Capability::Stream, Capability::Trending]
            .into_iter()
            .collect();

        assert!(set.contains(Capability::Stream));
        assert!(set.contains(Capability::Trending));
        assert!(!set.contains(Capability::Comments));
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Capability::Stream, Capability::Trending]
        );
    }

    #[test]
    fn test_empty_set() {
        let set = CapabilitySet::empty();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
