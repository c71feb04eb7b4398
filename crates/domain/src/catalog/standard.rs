//! The production catalog: the Reconquista setting of Errant Dreams.

use super::Catalog;
use crate::error::DomainError;

/// Canonical names in the production catalog, as the API expects them.
pub mod names {
    pub const THE_CRUSADERS: &str = "The Crusaders";
    pub const THE_MOORS: &str = "The Moors";

    pub const CASTILIAN: &str = "Castilian";
    pub const ARAGONESE: &str = "Aragonese";
    pub const LEONESE: &str = "Leonese";
    pub const ANDALUSIAN: &str = "Andalusian";
    pub const BERBER: &str = "Berber";
    pub const MASHRIQI: &str = "Mashriqi";

    pub const KNIGHT: &str = "Knight";
    pub const ARBALIST: &str = "Arbalist";
    pub const SKIRMISHER: &str = "Skirmisher";
    pub const BLADE_DANCER: &str = "Blade Dancer";
    pub const ALCHEMIST: &str = "Alchemist";
    pub const MYSTIC_POET: &str = "Mystic Poet";
}

use names::*;

impl Catalog {
    /// Build the production catalog.
    ///
    /// The data is static, so an error here means the table below was
    /// edited into an inconsistent state.
    pub fn standard() -> Result<Catalog, DomainError> {
        Catalog::builder()
            .faction(
                THE_CRUSADERS,
                "Forged in the fires of holy wars, the Crusaders are armored knights, devout \
                 warriors, and disciplined tacticians. Backed by the Christian kingdoms of León, \
                 Castile, and Aragon, they march south under the banner of faith, seeking to \
                 reclaim the land and impose order through steel and scripture.",
                "🛡️",
            )
            .faction(
                THE_MOORS,
                "Masters of science, strategy, and the scimitar, the Moors are heirs to centuries \
                 of knowledge and culture. Hailing from the once-flourishing Caliphate of Córdoba, \
                 they fight to preserve their traditions, defend their cities, and resist the \
                 encroaching crusade.",
                "🌙",
            )
            .race(
                THE_CRUSADERS,
                CASTILIAN,
                "Hardened frontier folk of the central meseta, raised in the shadow of castles.",
                &["Frontier Grit", "Mounted Heritage", "Stubborn Faith"],
            )
            .race(
                THE_CRUSADERS,
                ARAGONESE,
                "Mountain-born traders and sailors whose crown looks east across the sea.",
                &["Mediterranean Trade", "Mountain Stamina", "Guild Learning"],
            )
            .race(
                THE_CRUSADERS,
                LEONESE,
                "Keepers of the oldest northern crown, proud of their law and their chronicles.",
                &["Ancient Lineage", "Courtly Letters", "Pilgrim Roads"],
            )
            .race(
                THE_MOORS,
                ANDALUSIAN,
                "City dwellers of al-Andalus, steeped in libraries, gardens, and poetry.",
                &["Scholarly Tradition", "Urban Cunning", "Refined Arts"],
            )
            .race(
                THE_MOORS,
                BERBER,
                "Desert and mountain tribes from across the strait, famed as swift riders.",
                &["Desert Endurance", "Tribal Loyalty", "Swift Riders"],
            )
            .race(
                THE_MOORS,
                MASHRIQI,
                "Travelers from the eastern lands who carry the learning of Baghdad and Cairo.",
                &["Eastern Wisdom", "Caravan Lore", "Mystic Insight"],
            )
            .class(
                KNIGHT,
                "Armored cavalry sworn to a lord and a cause.",
                "⚔️",
            )
            .class(
                ARBALIST,
                "Crossbow marksman who holds walls and breaks charges.",
                "🏹",
            )
            .class(
                SKIRMISHER,
                "Light raider who strikes first and is gone before the reply.",
                "🗡️",
            )
            .class(
                BLADE_DANCER,
                "Duelist whose scimitar work is equal parts art and violence.",
                "🌪️",
            )
            .class(
                ALCHEMIST,
                "Student of elixirs, fire, and the hidden nature of things.",
                "⚗️",
            )
            .class(
                MYSTIC_POET,
                "Wanderer whose verses stir hearts and unsettle the unseen.",
                "📜",
            )
            .eligible(CASTILIAN, &[KNIGHT, ARBALIST])
            .eligible(ARAGONESE, &[KNIGHT, ARBALIST, SKIRMISHER, ALCHEMIST])
            .eligible(LEONESE, &[KNIGHT, ARBALIST, MYSTIC_POET])
            .eligible(ANDALUSIAN, &[SKIRMISHER, BLADE_DANCER, ALCHEMIST, MYSTIC_POET])
            .eligible(BERBER, &[ARBALIST, SKIRMISHER, BLADE_DANCER])
            .eligible(MASHRIQI, &[BLADE_DANCER, ALCHEMIST, MYSTIC_POET])
            .build()
    }
}
