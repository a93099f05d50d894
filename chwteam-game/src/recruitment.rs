//! Recruitment session state: the applicant pool, the current selection and
//! the analyzed team.
//!
//! The session enforces the selection rules (at most five applicants, one
//! gadget) so callers only reach the team builder with a complete selection.
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::TEAM_SIZE;
use crate::gadgets::{Gadget, find_gadget};
use crate::generation::generate_pool;
use crate::ordering::{ApplicantSort, sort_applicants};
use crate::roster::{Character, CharacterId};
use crate::team::{Team, TeamError, build_team_checked};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecruitmentError {
    #[error("no applicant with id {0} in the pool")]
    UnknownApplicant(CharacterId),
    #[error("roster is full ({limit} applicants already selected)")]
    RosterFull { limit: usize },
    #[error("no gadget with id {0}")]
    UnknownGadget(String),
    #[error("team not ready: {selected}/{required} applicants selected, gadget chosen: {gadget_chosen}")]
    NotReady {
        selected: usize,
        required: usize,
        gadget_chosen: bool,
    },
    #[error("team has already been analyzed; start over to change the selection")]
    AlreadyAnalyzed,
    #[error(transparent)]
    Team(#[from] TeamError),
}

/// Outcome of toggling an applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected,
    Deselected,
}

/// In-memory recruitment session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recruitment {
    pool: Vec<Character>,
    selected: Vec<CharacterId>,
    gadget: Option<Gadget>,
    team: Option<Team>,
}

impl Recruitment {
    /// Start a session with a freshly generated pool.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_pool(generate_pool(rng))
    }

    #[must_use]
    pub fn from_pool(pool: Vec<Character>) -> Self {
        Self {
            pool,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn pool(&self) -> &[Character] {
        &self.pool
    }

    /// Pool copy ordered by `sort`.
    #[must_use]
    pub fn sorted_pool(&self, sort: ApplicantSort) -> Vec<Character> {
        let mut pool = self.pool.clone();
        sort_applicants(&mut pool, sort);
        pool
    }

    fn find(&self, id: &CharacterId) -> Option<&Character> {
        self.pool.iter().find(|c| &c.id == id)
    }

    /// Selected applicants in the order they were picked.
    pub fn selected(&self) -> impl Iterator<Item = &Character> + '_ {
        self.selected.iter().filter_map(|id| self.find(id))
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_selected(&self, id: &CharacterId) -> bool {
        self.selected.contains(id)
    }

    #[must_use]
    pub fn can_select_more(&self) -> bool {
        self.selected.len() < TEAM_SIZE
    }

    /// Select or deselect an applicant.
    ///
    /// # Errors
    ///
    /// Fails for unknown applicants, when selecting into a full roster, or
    /// once the team has been analyzed.
    pub fn toggle_applicant(
        &mut self,
        id: &CharacterId,
    ) -> Result<SelectionChange, RecruitmentError> {
        if self.team.is_some() {
            return Err(RecruitmentError::AlreadyAnalyzed);
        }
        if self.find(id).is_none() {
            return Err(RecruitmentError::UnknownApplicant(id.clone()));
        }
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            debug!("deselected {id} ({}/{TEAM_SIZE})", self.selected.len());
            return Ok(SelectionChange::Deselected);
        }
        if !self.can_select_more() {
            return Err(RecruitmentError::RosterFull { limit: TEAM_SIZE });
        }
        self.selected.push(id.clone());
        debug!("selected {id} ({}/{TEAM_SIZE})", self.selected.len());
        Ok(SelectionChange::Selected)
    }

    #[must_use]
    pub fn gadget(&self) -> Option<&Gadget> {
        self.gadget.as_ref()
    }

    /// Choose a catalog gadget, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Fails for unknown gadget ids or once the team has been analyzed.
    pub fn select_gadget(&mut self, id: &str) -> Result<&Gadget, RecruitmentError> {
        if self.team.is_some() {
            return Err(RecruitmentError::AlreadyAnalyzed);
        }
        let gadget = find_gadget(id).ok_or_else(|| RecruitmentError::UnknownGadget(id.to_string()))?;
        debug!("gadget set to {}", gadget.name);
        Ok(self.gadget.insert(gadget.clone()))
    }

    /// Exactly five applicants and a gadget are selected.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.selected.len() == TEAM_SIZE && self.gadget.is_some()
    }

    /// Build and keep the team for the current selection.
    ///
    /// Calling again after a successful analysis returns the same team.
    ///
    /// # Errors
    ///
    /// Fails when the selection is incomplete.
    pub fn analyze(&mut self) -> Result<&Team, RecruitmentError> {
        let team = match self.team.take() {
            Some(team) => team,
            None => {
                let Some(gadget) = self.gadget.as_ref().filter(|_| self.is_ready()) else {
                    return Err(RecruitmentError::NotReady {
                        selected: self.selected.len(),
                        required: TEAM_SIZE,
                        gadget_chosen: self.gadget.is_some(),
                    });
                };
                let members: Vec<Character> = self.selected().cloned().collect();
                let team = build_team_checked(&members, gadget)?;
                info!(
                    "analyzed team: score {} grand total {}",
                    team.efficiency_score, team.grand_total_cost
                );
                team
            }
        };
        Ok(self.team.insert(team))
    }

    #[must_use]
    pub fn team(&self) -> Option<&Team> {
        self.team.as_ref()
    }

    /// Clear the selection and team, and draw a new pool.
    pub fn start_over<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::new(rng);
        debug!("recruitment restarted with {} applicants", self.pool.len());
    }
}
