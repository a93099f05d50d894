//! Name tables for generated applicants.
use rand::Rng;

pub const FIRST_NAMES: [&str; 26] = [
    "Aline", "Benigne", "Claude", "Divine", "Eric", "Fabrice", "Grace", "Herve", "Irene", "Jean",
    "Kevin", "Linda", "Marie", "Noella", "Olivier", "Pascal", "Quintin", "Ruth", "Serge",
    "Tatiana", "Uwineza", "Victor", "Wendy", "Xavier", "Yvonne", "Zola",
];

pub const LAST_NAMES: [&str; 15] = [
    "Habimana",
    "Hakizimana",
    "Bizimana",
    "Dusingizimana",
    "Mugisha",
    "Ndayisenga",
    "Niyonzima",
    "Tuyisenge",
    "Uwamahoro",
    "Manirakiza",
    "Nshimiyimana",
    "Gakire",
    "Kaneza",
    "Mutesi",
    "Rutayisire",
];

/// Draw a `"<first> <last>"` name uniformly from the tables.
pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    format!("{first} {last}")
}
