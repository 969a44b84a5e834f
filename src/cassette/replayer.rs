//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Serves a cassette's interactions per port/method pair.
///
/// Interactions can be taken strictly in order ([`next_interaction`]) or by
/// matching input ([`take_matching`]) for calls whose completion order
/// depends on scheduling.
///
/// [`next_interaction`]: CassetteReplayer::next_interaction
/// [`take_matching`]: CassetteReplayer::take_matching
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Creates a replayer over every interaction in `cassette`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Takes the next interaction for `port`/`method`.
    ///
    /// # Panics
    ///
    /// Panics if no interaction remains for the pair, listing what the
    /// cassette does contain.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let queue = self.queue(port, method);
        queue.pop_front().unwrap_or_else(|| {
            panic!("Cassette exhausted: all interactions for port={port:?} method={method:?} consumed")
        })
    }

    /// Takes the first remaining interaction for `port`/`method` whose
    /// recorded input equals `input`.
    ///
    /// # Panics
    ///
    /// Panics if no remaining interaction matches.
    pub fn take_matching(
        &mut self,
        port: &str,
        method: &str,
        input: &serde_json::Value,
    ) -> Interaction {
        let queue = self.queue(port, method);
        let position = queue.iter().position(|i| &i.input == input).unwrap_or_else(|| {
            panic!(
                "Cassette exhausted: no interaction for port={port:?} method={method:?} \
                 with input {input}"
            )
        });
        queue.remove(position).expect("position is in bounds")
    }

    /// Number of interactions not yet taken.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    fn queue(&mut self, port: &str, method: &str) -> &mut VecDeque<Interaction> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };
        if !self.queues.contains_key(&key) {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        }
        self.queues.get_mut(&key).expect("checked above")
    }
}
