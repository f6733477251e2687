//! Ticket triples and the compact notation.
//!
//! A ticket is an ordered triple of pairwise-distinct lanes. The compact
//! notation groups a head lane with a second set and a third set, e.g.
//! "1-23-456": head 1, second from {2,3}, third from {4,5,6}. "=" marks the
//! boxed variants.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Ordered finish triple of pairwise-distinct lanes in 1..=6.
/// Serialized as its "F-S-T" string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple([u8; 3]);

impl Triple {
    /// Returns `None` unless all three lanes are in range and distinct.
    pub fn new(first: u8, second: u8, third: u8) -> Option<Triple> {
        let lanes = [first, second, third];
        let in_range = lanes.iter().all(|l| (1..=6).contains(l));
        let distinct = first != second && first != third && second != third;
        (in_range && distinct).then_some(Triple(lanes))
    }

    pub fn first(self) -> u8 {
        self.0[0]
    }

    pub fn second(self) -> u8 {
        self.0[1]
    }

    pub fn third(self) -> u8 {
        self.0[2]
    }

    pub fn lanes(self) -> [u8; 3] {
        self.0
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.0[0], self.0[1], self.0[2])
    }
}

impl FromStr for Triple {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let mut next = || -> Result<u8, String> {
            parts
                .next()
                .ok_or_else(|| format!("malformed triple: {}", s))?
                .trim()
                .parse()
                .map_err(|_| format!("malformed triple: {}", s))
        };
        let (first, second, third) = (next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(format!("malformed triple: {}", s));
        }
        Triple::new(first, second, third).ok_or_else(|| format!("invalid triple: {}", s))
    }
}

impl Serialize for Triple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Triple {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Expansion strategy for one (head, seconds, thirds) group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Notation {
    /// Plain cross product: head - second set - third set.
    Formation,
    /// Box among the seconds for places 2 and 3, plus thirds outside the
    /// second set.
    SecondBox,
    /// Looser box: second set and third set interchangeable.
    CrossBox,
}

impl Notation {
    pub const ALL: [Notation; 3] = [Notation::Formation, Notation::SecondBox, Notation::CrossBox];
}

/// Expand a compact group into concrete tickets. Self-collisions are skipped
/// and the result is de-duplicated, preserving first-occurrence order.
pub fn expand(head: u8, seconds: &[u8], thirds: &[u8], notation: Notation) -> Vec<Triple> {
    let mut seen = BTreeSet::new();
    let mut tickets = Vec::new();
    let mut push = |triple: Option<Triple>| {
        if let Some(t) = triple {
            if seen.insert(t) {
                tickets.push(t);
            }
        }
    };

    match notation {
        Notation::Formation => {
            for &s in seconds {
                for &t in thirds {
                    push(Triple::new(head, s, t));
                }
            }
        }
        Notation::SecondBox => {
            for &s1 in seconds {
                for &s2 in seconds {
                    push(Triple::new(head, s1, s2));
                }
            }
            for &s in seconds {
                for &t in thirds {
                    if !seconds.contains(&t) {
                        push(Triple::new(head, s, t));
                    }
                }
            }
        }
        Notation::CrossBox => {
            for &s in seconds {
                for &t in thirds {
                    push(Triple::new(head, s, t));
                    push(Triple::new(head, t, s));
                }
            }
        }
    }

    tickets
}

/// Compact human-readable rendering of one expanded group.
pub fn compact(head: u8, seconds: &[u8], thirds: &[u8], notation: Notation) -> String {
    let digits = |lanes: &[u8]| lanes.iter().map(|l| l.to_string()).collect::<String>();
    match notation {
        Notation::Formation => format!("{}-{}-{}", head, digits(seconds), digits(thirds)),
        Notation::SecondBox => format!("{}-{}={}", head, digits(seconds), digits(thirds)),
        Notation::CrossBox => format!("{}={}-{}", head, digits(seconds), digits(thirds)),
    }
}
