//! Team efficiency scoring.
//!
//! The score is built from the averaged stats of the core (non-apprentice)
//! members, boosted by the gadget and capped at the stat ceiling:
//!
//! 1. a weighted base score over the four averages,
//! 2. fixed threshold synergies (strengths, balance, weaknesses),
//! 3. an apprentice burden penalty when resilience is low,
//!
//! and the sum is clamped to `0..=99`.
use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    BALANCE_EFFECT, BALANCE_THRESHOLD, BURDEN_APPRENTICE_BASELINE, BURDEN_RESILIENCE_THRESHOLD,
    BURDEN_SCALE, SCORE_MAX, SCORE_MIN, STAT_MAX, STRENGTH_EFFECT, STRENGTH_THRESHOLD,
    WEAKNESS_EFFECT, WEAKNESS_THRESHOLD, WEIGHT_COMMUNICATION, WEIGHT_KNOWLEDGE,
    WEIGHT_RESILIENCE, WEIGHT_TECH_SAVVY,
};
use crate::gadgets::Gadget;
use crate::numbers::{round_f64_to_i32, round_f64_to_stat, usize_to_f64};
use crate::roster::Character;
use crate::stats::StatKind;

/// Inline capacity covers every rule that can fire at once.
pub type SynergyList = SmallVec<[Synergy; 6]>;

/// A named scoring adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synergy {
    pub name: String,
    pub desc: String,
    pub effect: i32,
}

impl Synergy {
    #[must_use]
    pub fn new(name: &str, desc: &str, effect: i32) -> Self {
        Self {
            name: name.to_string(),
            desc: desc.to_string(),
            effect,
        }
    }
}

struct ThresholdRule {
    stat: StatKind,
    name: &'static str,
    desc: &'static str,
}

const STRENGTH_RULES: [ThresholdRule; 4] = [
    ThresholdRule {
        stat: StatKind::Communication,
        name: "Unified Front",
        desc: "Excellent coordination boosts overall effectiveness.",
    },
    ThresholdRule {
        stat: StatKind::Resilience,
        name: "Iron Will",
        desc: "The team withstands high-pressure situations.",
    },
    ThresholdRule {
        stat: StatKind::TechSavvy,
        name: "Well-Oiled Machine",
        desc: "Seamless use of technology maximizes speed.",
    },
    ThresholdRule {
        stat: StatKind::Knowledge,
        name: "Knowledge Powerhouse",
        desc: "Deep expertise allows for handling complex cases.",
    },
];

const WEAKNESS_RULES: [ThresholdRule; 4] = [
    ThresholdRule {
        stat: StatKind::Communication,
        name: "Division",
        desc: "Poor communication leads to mistakes and distrust.",
    },
    ThresholdRule {
        stat: StatKind::Resilience,
        name: "Glass Body",
        desc: "The team is prone to burnout and performance drops under stress.",
    },
    ThresholdRule {
        stat: StatKind::TechSavvy,
        name: "Tech Lag",
        desc: "Inefficient use of gadgets slows down operations.",
    },
    ThresholdRule {
        stat: StatKind::Knowledge,
        name: "Knowledge Gap",
        desc: "Lacking expertise, the team struggles with diagnostics.",
    },
];

pub const SYNERGISTIC_CORE: &str = "Synergistic Core";
const SYNERGISTIC_CORE_DESC: &str = "A well-balanced team with no major weaknesses.";
pub const APPRENTICE_BURDEN: &str = "Apprentice Burden";
const APPRENTICE_BURDEN_DESC: &str =
    "Low team resilience forces the apprentice into critical roles, causing errors.";

/// Core-member averages with the gadget boost applied, each capped at 99.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AveragedStats {
    pub knowledge: f64,
    pub communication: f64,
    pub tech_savvy: f64,
    pub resilience: f64,
}

impl AveragedStats {
    #[must_use]
    pub const fn get(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::Knowledge => self.knowledge,
            StatKind::Communication => self.communication,
            StatKind::TechSavvy => self.tech_savvy,
            StatKind::Resilience => self.resilience,
        }
    }

    /// Weighted base score before synergies.
    #[must_use]
    pub fn base_score(&self) -> f64 {
        self.knowledge * WEIGHT_KNOWLEDGE
            + self.communication * WEIGHT_COMMUNICATION
            + self.tech_savvy * WEIGHT_TECH_SAVVY
            + self.resilience * WEIGHT_RESILIENCE
    }
}

/// Result of scoring a team.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Efficiency {
    /// Final score in `0..=99`.
    pub score: u8,
    pub synergies: SynergyList,
}

/// Average each stat over `core`, add the gadget boost and cap at 99.
///
/// Returns `None` when there are no core members.
#[must_use]
pub fn boosted_averages(core: &[&Character], gadget: &Gadget) -> Option<AveragedStats> {
    if core.is_empty() {
        return None;
    }
    let count = usize_to_f64(core.len());
    let average = |kind: StatKind| {
        let sum: f64 = core.iter().map(|m| f64::from(m.stats.get(kind))).sum();
        let boosted = sum / count + f64::from(gadget.stat_boost.get(kind));
        boosted.min(f64::from(STAT_MAX))
    };
    Some(AveragedStats {
        knowledge: average(StatKind::Knowledge),
        communication: average(StatKind::Communication),
        tech_savvy: average(StatKind::TechSavvy),
        resilience: average(StatKind::Resilience),
    })
}

/// Evaluate the fixed threshold rules in their canonical order.
#[must_use]
pub fn threshold_synergies(avg: &AveragedStats) -> SynergyList {
    let mut synergies = SynergyList::new();
    for rule in &STRENGTH_RULES {
        if avg.get(rule.stat) > STRENGTH_THRESHOLD {
            synergies.push(Synergy::new(rule.name, rule.desc, STRENGTH_EFFECT));
        }
    }
    if StatKind::ALL
        .iter()
        .all(|&kind| avg.get(kind) > BALANCE_THRESHOLD)
    {
        synergies.push(Synergy::new(
            SYNERGISTIC_CORE,
            SYNERGISTIC_CORE_DESC,
            BALANCE_EFFECT,
        ));
    }
    for rule in &WEAKNESS_RULES {
        if avg.get(rule.stat) < WEAKNESS_THRESHOLD {
            synergies.push(Synergy::new(rule.name, rule.desc, WEAKNESS_EFFECT));
        }
    }
    synergies
}

/// Penalty for carrying apprentices on a team with low average resilience.
///
/// Both deficits are taken unrounded; only their product is rounded. A
/// penalty of zero or less yields `None`.
#[must_use]
pub fn apprentice_burden(avg_resilience: f64, apprentices: &[&Character]) -> Option<Synergy> {
    if apprentices.is_empty() || avg_resilience >= BURDEN_RESILIENCE_THRESHOLD {
        return None;
    }
    let total: f64 = apprentices
        .iter()
        .map(|a| f64::from(a.total_stats))
        .sum();
    let apprentice_avg = total / usize_to_f64(apprentices.len()) / 4.0;
    let resilience_deficit = BURDEN_RESILIENCE_THRESHOLD - avg_resilience;
    let skill_deficit = BURDEN_APPRENTICE_BASELINE - apprentice_avg;
    let penalty =
        round_f64_to_i32((resilience_deficit / BURDEN_SCALE) * (skill_deficit / BURDEN_SCALE));
    (penalty > 0).then(|| Synergy::new(APPRENTICE_BURDEN, APPRENTICE_BURDEN_DESC, -penalty))
}

/// Score a team of members equipped with `gadget`.
///
/// A team without core members scores zero with no synergies.
#[must_use]
pub fn calculate_efficiency(members: &[Character], gadget: &Gadget) -> Efficiency {
    let (core, apprentices): (Vec<&Character>, Vec<&Character>) =
        members.iter().partition(|m| m.is_core());

    let Some(avg) = boosted_averages(&core, gadget) else {
        debug!("no core members; efficiency is zero");
        return Efficiency::default();
    };

    let base_score = avg.base_score();
    let mut synergies = threshold_synergies(&avg);
    if let Some(burden) = apprentice_burden(avg.resilience, &apprentices) {
        synergies.push(burden);
    }

    let synergy_total: i32 = synergies.iter().map(|s| s.effect).sum();
    let raw = base_score + f64::from(synergy_total);
    let score = round_f64_to_stat(raw.clamp(SCORE_MIN, SCORE_MAX));
    debug!(
        "efficiency base {base_score:.2} synergies {synergy_total:+} ({} rules) -> {score}",
        synergies.len()
    );
    Efficiency { score, synergies }
}
