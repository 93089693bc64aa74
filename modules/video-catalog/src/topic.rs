use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;

/// The fixed set of topics the harvester knows how to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Topic {
    Lifestyle,
    Hobby,
    Knowledge,
    Technology,
    Business,
    Health,
}

impl Topic {
    pub const ALL: [Topic; 6] = [
        Topic::Lifestyle,
        Topic::Hobby,
        Topic::Knowledge,
        Topic::Technology,
        Topic::Business,
        Topic::Health,
    ];

    /// Freebase topic id used by `search.list`'s `topicId` filter.
    pub fn freebase_id(&self) -> &'static str {
        match self {
            Topic::Lifestyle => "/m/019_rr",
            Topic::Hobby => "/m/03glg",
            Topic::Knowledge => "/m/01k8wb",
            Topic::Technology => "/m/07c1v",
            Topic::Business => "/m/09s1f",
            Topic::Health => "/m/0kt51",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Lifestyle => "lifestyle",
            Topic::Hobby => "hobby",
            Topic::Knowledge => "knowledge",
            Topic::Technology => "technology",
            Topic::Business => "business",
            Topic::Health => "health",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Topic {
        *Self::ALL.choose(rng).unwrap_or(&Topic::Lifestyle)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
