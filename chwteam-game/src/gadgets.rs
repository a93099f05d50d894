//! Fixed gadget catalog.
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::stats::StatBoost;

/// A piece of team equipment with a cost and a partial stat boost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gadget {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub cost: u32,
    #[serde(default)]
    pub stat_boost: StatBoost,
}

fn catalog() -> &'static [Gadget; 3] {
    static CATALOG: OnceLock<[Gadget; 3]> = OnceLock::new();
    CATALOG.get_or_init(|| {
        [
            Gadget {
                id: "g1".to_string(),
                name: "Standard Kit".to_string(),
                desc: "Basic, reliable diagnostic and communication tools for everyday tasks."
                    .to_string(),
                cost: 5_000,
                stat_boost: StatBoost {
                    knowledge: 2,
                    tech_savvy: 3,
                    ..StatBoost::default()
                },
            },
            Gadget {
                id: "g2".to_string(),
                name: "Advanced Field Unit".to_string(),
                desc: "Upgraded sensor suite and AI co-processor for complex diagnostics."
                    .to_string(),
                cost: 12_000,
                stat_boost: StatBoost {
                    knowledge: 5,
                    tech_savvy: 8,
                    resilience: 2,
                    ..StatBoost::default()
                },
            },
            Gadget {
                id: "g3".to_string(),
                name: "Mobile Health Hub".to_string(),
                desc: "Top-tier, networked equipment providing real-time data analysis and expert consultation links."
                    .to_string(),
                cost: 25_000,
                stat_boost: StatBoost {
                    knowledge: 8,
                    tech_savvy: 12,
                    communication: 5,
                    ..StatBoost::default()
                },
            },
        ]
    })
}

/// The three selectable gadgets in id order.
#[must_use]
pub fn gadget_catalog() -> &'static [Gadget] {
    catalog()
}

/// Look up a catalog gadget by id.
#[must_use]
pub fn find_gadget(id: &str) -> Option<&'static Gadget> {
    gadget_catalog().iter().find(|gadget| gadget.id == id)
}
