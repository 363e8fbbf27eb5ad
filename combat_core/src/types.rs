//! Core types specific to combat_core

use serde::{Deserialize, Serialize};

/// Opaque actor handle issued by the hosting entity system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u64);

impl From<u64> for ActorId {
    fn from(raw: u64) -> Self {
        ActorId(raw)
    }
}

/// Damage types recognized by the mitigation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Physical,
    Fire,
    Cold,
    Lightning,
    Poison,
    Magic,
}

impl DamageType {
    /// Get all damage types
    pub fn all() -> &'static [DamageType] {
        &[
            DamageType::Physical,
            DamageType::Fire,
            DamageType::Cold,
            DamageType::Lightning,
            DamageType::Poison,
            DamageType::Magic,
        ]
    }
}

/// Character classes with combat bonus tables
///
/// `Commoner` is the documented safe default: any class name the provider
/// does not recognize resolves to it instead of failing, since class lookup
/// sits on the hot path of every attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Class {
    Warrior,
    Cleric,
    Thief,
    Mage,
    Commoner,
}

impl Class {
    /// Resolve a class name, falling back to `Commoner` for unknown names
    pub fn from_name(name: &str) -> Self {
        match name {
            "warrior" => Class::Warrior,
            "cleric" => Class::Cleric,
            "thief" => Class::Thief,
            "mage" => Class::Mage,
            _ => Class::Commoner,
        }
    }

    /// Get all classes
    pub fn all() -> &'static [Class] {
        &[
            Class::Warrior,
            Class::Cleric,
            Class::Thief,
            Class::Mage,
            Class::Commoner,
        ]
    }
}

impl Default for Class {
    fn default() -> Self {
        Class::Commoner
    }
}

/// Playable races with combat bonus tables
///
/// `Human` is the documented safe default for unknown race names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Race {
    Human,
    Elf,
    Dwarf,
    Orc,
    Gnome,
}

impl Race {
    /// Resolve a race name, falling back to `Human` for unknown names
    pub fn from_name(name: &str) -> Self {
        match name {
            "human" => Race::Human,
            "elf" => Race::Elf,
            "dwarf" => Race::Dwarf,
            "orc" => Race::Orc,
            "gnome" => Race::Gnome,
            _ => Race::Human,
        }
    }

    /// Get all races
    pub fn all() -> &'static [Race] {
        &[Race::Human, Race::Elf, Race::Dwarf, Race::Orc, Race::Gnome]
    }
}

impl Default for Race {
    fn default() -> Self {
        Race::Human
    }
}
