//! Team assembly: leader selection, cost aggregation and scoring.
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::constants::{GADGET_OPERATION_FEE, INITIAL_INVESTMENT, TEAM_SIZE};
use crate::gadgets::Gadget;
use crate::roster::{Character, CharacterId};
use crate::scoring::{SynergyList, calculate_efficiency};

/// Errors raised when a team selection is malformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamError {
    #[error("a team needs exactly {expected} members (got {actual})")]
    WrongSize { expected: usize, actual: usize },
    #[error("applicant {0} was selected more than once")]
    DuplicateMember(CharacterId),
}

/// A fully analyzed team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Members in selection order; exactly one carries the leader flag.
    pub members: Vec<Character>,
    pub gadget: Gadget,
    pub total_personnel_cost: u32,
    /// Personnel plus gadget cost plus the operation fee.
    pub total_operating_cost: u32,
    /// Operating cost plus the initial investment.
    pub grand_total_cost: u32,
    pub efficiency_score: u8,
    pub synergies: SynergyList,
}

impl Team {
    #[must_use]
    pub fn leader(&self) -> Option<&Character> {
        self.members.iter().find(|m| m.is_leader)
    }

    /// Net effect of every synergy.
    #[must_use]
    pub fn synergy_total(&self) -> i32 {
        self.synergies.iter().map(|s| s.effect).sum()
    }

    #[must_use]
    pub fn has_synergy(&self, name: &str) -> bool {
        self.synergies.iter().any(|s| s.name == name)
    }
}

/// Index of the member with the strictly highest communication.
///
/// Ties keep the earliest member. Returns `None` for an empty slice.
#[must_use]
pub fn select_leader(members: &[Character]) -> Option<usize> {
    let mut best: Option<(usize, u8)> = None;
    for (idx, member) in members.iter().enumerate() {
        let communication = member.stats.communication;
        match best {
            Some((_, top)) if communication <= top => {}
            _ => best = Some((idx, communication)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Build a team from pre-validated members.
///
/// Member count is not enforced here; see [`build_team_checked`].
#[must_use]
pub fn build_team(members: &[Character], gadget: &Gadget) -> Team {
    let leader = select_leader(members);
    let members: Vec<Character> = members
        .iter()
        .enumerate()
        .map(|(idx, member)| Character {
            is_leader: Some(idx) == leader,
            ..member.clone()
        })
        .collect();

    let total_personnel_cost = members
        .iter()
        .fold(0u32, |sum, m| sum.saturating_add(m.cost));
    let total_operating_cost = total_personnel_cost
        .saturating_add(gadget.cost)
        .saturating_add(GADGET_OPERATION_FEE);
    let grand_total_cost = total_operating_cost.saturating_add(INITIAL_INVESTMENT);
    let efficiency = calculate_efficiency(&members, gadget);

    debug!(
        "built team of {} with {}: score {} grand total {grand_total_cost}",
        members.len(),
        gadget.name,
        efficiency.score
    );

    Team {
        members,
        gadget: gadget.clone(),
        total_personnel_cost,
        total_operating_cost,
        grand_total_cost,
        efficiency_score: efficiency.score,
        synergies: efficiency.synergies,
    }
}

/// Build a team after checking member count and uniqueness.
///
/// # Errors
///
/// Returns an error when the selection is not exactly five distinct applicants.
pub fn build_team_checked(members: &[Character], gadget: &Gadget) -> Result<Team, TeamError> {
    if members.len() != TEAM_SIZE {
        return Err(TeamError::WrongSize {
            expected: TEAM_SIZE,
            actual: members.len(),
        });
    }
    let mut seen = HashSet::with_capacity(members.len());
    for member in members {
        if !seen.insert(&member.id) {
            return Err(TeamError::DuplicateMember(member.id.clone()));
        }
    }
    Ok(build_team(members, gadget))
}
