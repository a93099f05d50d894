//! Applicant pool generation.
//!
//! Every entry point takes the random source as a parameter so that seeded
//! generators reproduce pools exactly. [`generate_applicant_pool`] is the
//! only function that reaches for the thread-local generator.
use log::{debug, trace};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::{ConfigError, GenerationConfig};
use crate::names::random_name;
use crate::numbers::{round_f64_to_stat, round_f64_to_step};
use crate::roster::{Character, CharacterId, Rarity, Role};
use crate::stats::{StatKind, Stats};

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 6;

/// Roll a rarity tier. Apprentices never roll above Rare.
pub fn roll_rarity<R: Rng + ?Sized>(role: Role, config: &GenerationConfig, rng: &mut R) -> Rarity {
    let roll: f64 = rng.r#gen();
    let thresholds = config.rarity_thresholds;
    let rarity = if roll < thresholds.normal {
        Rarity::Normal
    } else if roll < thresholds.rare {
        Rarity::Rare
    } else {
        Rarity::SuperRare
    };
    if role == Role::Apprentice && rarity == Rarity::SuperRare {
        trace!("apprentice roll {roll:.3} capped at rare");
        return Rarity::Rare;
    }
    rarity
}

/// Roll years of experience. Apprentices always start at the minimum.
///
/// # Panics
///
/// Panics if `config.experience` has `min_years > max_years`; validated
/// configs never do.
pub fn roll_experience<R: Rng + ?Sized>(
    role: Role,
    config: &GenerationConfig,
    rng: &mut R,
) -> u8 {
    let exp = config.experience;
    if role == Role::Apprentice {
        exp.min_years
    } else {
        rng.gen_range(exp.min_years..=exp.max_years)
    }
}

/// Roll role-biased stats for the given rarity and experience.
///
/// Base values come from the rarity range plus the experience bonus;
/// technicians additionally floor tech savvy with a high-range roll before
/// biases are applied. Every result is clamped to the stat ceiling.
///
/// # Panics
///
/// Panics if the rarity tier or tech floor range is inverted, which
/// [`GenerationConfig::validate`] rejects.
pub fn roll_stats<R: Rng + ?Sized>(
    rarity: Rarity,
    role: Role,
    experience: u8,
    config: &GenerationConfig,
    rng: &mut R,
) -> Stats {
    let tier = config.rarity.tier(rarity);
    let bonus = u16::from(experience.saturating_sub(1)) * u16::from(config.experience.bonus_per_year);

    let mut base = [0u16; 4];
    for slot in &mut base {
        *slot = u16::from(rng.gen_range(tier.min..=tier.max)) + bonus;
    }

    if role == Role::Technician {
        let floor = config.tech_floor;
        let tech = &mut base[stat_slot(StatKind::TechSavvy)];
        *tech = (*tech).max(u16::from(rng.gen_range(floor.min..=floor.max)));
    }

    let bias = config.role_bias.bias(role);
    Stats::from_fn(|kind| round_f64_to_stat(f64::from(base[stat_slot(kind)]) * bias.get(kind)))
}

const fn stat_slot(kind: StatKind) -> usize {
    match kind {
        StatKind::Knowledge => 0,
        StatKind::Communication => 1,
        StatKind::TechSavvy => 2,
        StatKind::Resilience => 3,
    }
}

/// Map the rarity-weighted stat sum linearly onto the cost band.
///
/// An inverted band collapses to `band.max`.
#[must_use]
pub fn calculate_cost(stats: &Stats, rarity: Rarity, config: &GenerationConfig) -> u32 {
    let multiplier = config.rarity.tier(rarity).multiplier;
    let score = f64::from(stats.total()) * multiplier;
    let min_score = config.min_cost_score();
    let score_range = config.max_cost_score() - min_score;
    let band = config.cost;
    let cost_range = f64::from(band.max) - f64::from(band.min);
    let raw = f64::from(band.min) + ((score - min_score) / score_range) * cost_range;
    let clamped = raw.max(f64::from(band.min)).min(f64::from(band.max));
    round_f64_to_step(clamped, band.step)
}

fn random_id<R: Rng + ?Sized>(serial: usize, rng: &mut R) -> CharacterId {
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect();
    CharacterId::new(format!("chw-{serial:02}-{suffix}"))
}

/// Generate a single applicant. `serial` keeps ids unique within a pool.
///
/// # Panics
///
/// Panics on an unvalidated config with inverted ranges; see [`roll_stats`].
pub fn generate_character<R: Rng + ?Sized>(
    role: Role,
    config: &GenerationConfig,
    rng: &mut R,
    serial: usize,
) -> Character {
    let id = random_id(serial, rng);
    let name = random_name(rng);
    let rarity = roll_rarity(role, config, rng);
    let experience = roll_experience(role, config, rng);
    let stats = roll_stats(rarity, role, experience, config, rng);
    let cost = calculate_cost(&stats, rarity, config);
    trace!(
        "generated {id} {role} {} exp {experience} total {} cost {cost}",
        rarity.code(),
        stats.total()
    );
    Character::new(id, name, role, rarity, stats, cost, experience)
}

/// Generate a shuffled applicant pool using an explicit configuration.
///
/// # Errors
///
/// Returns the first violated invariant when `config` fails
/// [`GenerationConfig::validate`]; nothing is rolled in that case.
pub fn generate_pool_with<R: Rng + ?Sized>(
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Vec<Character>, ConfigError> {
    config.validate()?;
    Ok(fill_pool(config, rng))
}

/// Generate the standard 20-applicant pool.
pub fn generate_pool<R: Rng + ?Sized>(rng: &mut R) -> Vec<Character> {
    fill_pool(&GenerationConfig::default(), rng)
}

fn fill_pool<R: Rng + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Vec<Character> {
    let mut pool = Vec::with_capacity(config.pool_size());
    for quota in &config.composition {
        for _ in 0..quota.count {
            let serial = pool.len();
            pool.push(generate_character(quota.role, config, rng, serial));
        }
    }
    pool.shuffle(rng);
    debug!(
        "generated applicant pool of {} ({} super rare)",
        pool.len(),
        pool.iter()
            .filter(|c| c.rarity == Rarity::SuperRare)
            .count()
    );
    pool
}

/// Generate a fresh pool from the thread-local random source.
#[must_use]
pub fn generate_applicant_pool() -> Vec<Character> {
    generate_pool(&mut rand::thread_rng())
}
