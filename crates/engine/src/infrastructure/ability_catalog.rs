//! In-memory ability catalog for enriching suggested abilities.

use std::collections::HashMap;

use tierforge_domain::SpecialAbility;

use crate::infrastructure::ports::{AbilityCatalog, CatalogAbility};

const RELENTLESS_TEMPLATE: &str = "Relentless (X)";

/// (name, icon, kind, description) for the abilities the built-in
/// benchmark table suggests.
const STOCK_ABILITIES: &[(&str, &str, &str, &str)] = &[
    (
        "Momentum",
        "icons/momentum.svg",
        "reaction",
        "<p>When this adversary makes a successful attack against a PC, you gain a Fear.</p>",
    ),
    (
        "Terrifying",
        "icons/terrifying.svg",
        "passive",
        "<p>When this adversary makes a successful attack, all PCs within Far range lose a Hope and you gain a Fear.</p>",
    ),
    (
        "Relentless (X)",
        "icons/relentless.svg",
        "passive",
        "<p>This adversary can be spotlighted up to <strong>X</strong> times per GM turn. Spend Fear as usual to spotlight them.</p>",
    ),
    (
        "Ramp Up",
        "icons/ramp-up.svg",
        "passive",
        "<p>You must spend a Fear to spotlight this adversary. While spotlighted, they can make their standard attack against all targets within range.</p>",
    ),
    (
        "Overwhelm",
        "icons/overwhelm.svg",
        "reaction",
        "<p>When the adversary marks HP from an attack within Melee range, you can make a standard attack against the attacker.</p>",
    ),
    (
        "Rally Troops",
        "icons/rally.svg",
        "action",
        "<p>Spend 2 Fear to spotlight this adversary and up to <strong>2</strong> allies within Far range.</p>",
    ),
    (
        "Summon Reinforcements",
        "icons/summon.svg",
        "action",
        "<p>Spend a Fear to summon a group of Minions equal to the number of PCs at Close range.</p>",
    ),
    (
        "Call Reinforcements",
        "icons/summon.svg",
        "action",
        "<p>Once per scene, spend a Fear to summon a Standard adversary of this tier within Far range.</p>",
    ),
    (
        "Spotlight Ally",
        "icons/spotlight.svg",
        "action",
        "<p>Spend a Fear to spotlight an ally within Close range.</p>",
    ),
    (
        "Group Attack",
        "icons/group-attack.svg",
        "action",
        "<p>Spend a Fear to choose a target and spotlight all Minions within Close range of them. They make one shared attack roll.</p>",
    ),
    (
        "Opportunist",
        "icons/opportunist.svg",
        "passive",
        "<p>When two or more adversaries are within Very Close range of a creature, all damage this adversary deals to that creature is doubled.</p>",
    ),
    (
        "Cloaked",
        "icons/cloaked.svg",
        "action",
        "<p>Become Hidden until after the adversary's next attack.</p>",
    ),
    (
        "Backstab",
        "icons/backstab.svg",
        "passive",
        "<p>When this adversary succeeds on a standard attack that has advantage, they deal an extra <strong>1d6</strong> damage.</p>",
    ),
    (
        "Leverage",
        "icons/leverage.svg",
        "action",
        "<p>Mark a Stress to ask a PC what they fear losing. Gain advantage on the next social roll against them.</p>",
    ),
    (
        "Bolster",
        "icons/bolster.svg",
        "action",
        "<p>Mark a Stress to give all allies within Close range a <strong>+1</strong> bonus to their next attack roll.</p>",
    ),
];

/// Lookup is case-insensitive. `Relentless (N)` falls back to the
/// `Relentless (X)` entry with `X` filled in.
#[derive(Debug, Clone, Default)]
pub struct StaticAbilityCatalog {
    by_name: HashMap<String, CatalogAbility>,
}

impl StaticAbilityCatalog {
    pub fn new(abilities: impl IntoIterator<Item = CatalogAbility>) -> Self {
        Self {
            by_name: abilities
                .into_iter()
                .map(|a| (a.name.to_lowercase(), a))
                .collect(),
        }
    }

    /// Catalog covering the built-in benchmark suggestions.
    pub fn stock() -> Self {
        Self::new(
            STOCK_ABILITIES
                .iter()
                .map(|(name, icon, kind, description)| CatalogAbility {
                    id: name.to_lowercase().replace(' ', "-"),
                    name: name.to_string(),
                    icon: Some(icon.to_string()),
                    kind: kind.to_string(),
                    description: description.to_string(),
                }),
        )
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl AbilityCatalog for StaticAbilityCatalog {
    fn find_by_name(&self, name: &str) -> Option<CatalogAbility> {
        let key = name.trim().to_lowercase();
        if let Some(found) = self.by_name.get(&key) {
            return Some(found.clone());
        }

        if SpecialAbility::classify(name) != Some(SpecialAbility::Relentless) {
            return None;
        }
        let (_, rest) = name.trim().split_once('(')?;
        let count = rest.strip_suffix(')')?.trim();
        let template = self.by_name.get(&RELENTLESS_TEMPLATE.to_lowercase())?;
        Some(CatalogAbility {
            id: template.id.clone(),
            name: name.trim().to_string(),
            icon: template.icon.clone(),
            kind: template.kind.clone(),
            description: template
                .description
                .replace("<strong>X</strong>", &format!("<strong>{}</strong>", count)),
        })
    }
}
