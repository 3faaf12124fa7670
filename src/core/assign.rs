//! Round-robin lead assignment

use tracing::debug;

use crate::entities::Contact;

/// Hands out agents in a fixed rotation
#[derive(Debug, Clone)]
pub struct RoundRobin {
    agents: Vec<String>,
    cursor: usize,
}

impl RoundRobin {
    /// Start the rotation at `start` (taken modulo the agent count)
    pub fn new(agents: Vec<String>, start: usize) -> Self {
        let cursor = if agents.is_empty() {
            0
        } else {
            start % agents.len()
        };
        Self { agents, cursor }
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Next agent in the rotation, or None if there are no agents
    pub fn next_agent(&mut self) -> Option<&str> {
        if self.agents.is_empty() {
            return None;
        }
        let agent = &self.agents[self.cursor];
        self.cursor = (self.cursor + 1) % self.agents.len();
        Some(agent)
    }

    /// Assign every contact without an owner; returns how many were assigned
    ///
    /// Contacts that already name an agent keep it and do not advance the
    /// rotation.
    pub fn assign(&mut self, contacts: &mut [Contact]) -> usize {
        let mut assigned = 0;
        for contact in contacts.iter_mut().filter(|c| c.assigned_to.is_none()) {
            let Some(agent) = self.next_agent() else {
                break;
            };
            debug!(contact = %contact.id, agent, "assigned lead");
            contact.assigned_to = Some(agent.to_string());
            assigned += 1;
        }
        assigned
    }
}
