//! Base set card data
//!
//! Every playable card is a static [`CardTemplate`] here. Adding a card
//! means adding a row; behavior comes from the effect enums, so no new code
//! paths are needed unless the card introduces a genuinely new mechanic.

use crate::core::effects::{
    InstantEffect, LandBehavior, ScriptKind, SorceryEffect, TargetedEffect, TutorFilter,
};
use crate::core::{Direction, MoveRange, Role};

/// Kind-specific static data of a template
#[derive(Debug, Clone, Copy)]
pub enum TemplateKind {
    Monster {
        attack: i32,
        defense: i32,
        movement: &'static [(Direction, MoveRange)],
    },
    Sorcery {
        effect: SorceryEffect,
        needs: &'static [Direction],
        text: &'static str,
    },
    Land {
        behavior: LandBehavior,
        needs: &'static [Direction],
        text: &'static str,
    },
}

/// A card template shared by all copies of one card
#[derive(Debug, Clone, Copy)]
pub struct CardTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub role: Role,
    pub mana: i32,
    pub kind: TemplateKind,
}

use Direction::*;
use MoveRange::Steps;

pub const BASE_SET: &[CardTemplate] = &[
    // ------------------------------------------------------------- monsters
    CardTemplate {
        id: "bonecrawler",
        name: "Bonecrawler",
        role: Role::Walker,
        mana: 1,
        kind: TemplateKind::Monster {
            attack: 100,
            defense: 200,
            movement: &[
                (Forward, Steps(1)),
                (Left, Steps(1)),
                (Right, Steps(1)),
                (Back, Steps(1)),
            ],
        },
    },
    CardTemplate {
        id: "shadow_vine",
        name: "Shadow Vine",
        role: Role::Walker,
        mana: 3,
        kind: TemplateKind::Monster {
            attack: 200,
            defense: 200,
            movement: &[
                (Forward, Steps(2)),
                (ForwardLeft, Steps(2)),
                (BackRight, Steps(2)),
                (BackLeft, Steps(2)),
            ],
        },
    },
    CardTemplate {
        id: "dreadmaw_queen",
        name: "Dreadmaw Queen",
        role: Role::Walker,
        mana: 4,
        kind: TemplateKind::Monster {
            attack: 170,
            defense: 130,
            movement: &[
                (Forward, Steps(2)),
                (ForwardLeft, Steps(2)),
                (ForwardRight, Steps(2)),
                (Right, Steps(2)),
                (BackLeft, Steps(2)),
                (Left, Steps(2)),
                (BackRight, Steps(2)),
                (Back, Steps(2)),
            ],
        },
    },
    CardTemplate {
        id: "frost_revenant",
        name: "Frost Revenant",
        role: Role::Sentinel,
        mana: 3,
        kind: TemplateKind::Monster {
            attack: 170,
            defense: 190,
            movement: &[(Forward, Steps(2)), (BackLeft, Steps(1)), (Back, Steps(1))],
        },
    },
    CardTemplate {
        id: "solar_paladin",
        name: "Solar Paladin",
        role: Role::Aggressor,
        mana: 4,
        kind: TemplateKind::Monster {
            attack: 230,
            defense: 130,
            movement: &[
                (Forward, Steps(2)),
                (Back, Steps(2)),
                (BackLeft, Steps(2)),
                (Right, Steps(2)),
            ],
        },
    },
    CardTemplate {
        id: "sylvan_archer",
        name: "Sylvan Archer",
        role: Role::Manipulator,
        mana: 2,
        kind: TemplateKind::Monster {
            attack: 130,
            defense: 200,
            movement: &[
                (ForwardLeft, Steps(1)),
                (ForwardRight, Steps(1)),
                (BackLeft, Steps(1)),
                (BackRight, Steps(1)),
            ],
        },
    },
    CardTemplate {
        id: "magistra",
        name: "Magistra",
        role: Role::Manipulator,
        mana: 3,
        kind: TemplateKind::Monster {
            attack: 170,
            defense: 190,
            movement: &[
                (Forward, Steps(1)),
                (Left, Steps(2)),
                (Right, Steps(2)),
                (BackLeft, Steps(1)),
                (BackRight, Steps(1)),
            ],
        },
    },
    CardTemplate {
        id: "lord_of_the_abyss",
        name: "Lord of the Abyss",
        role: Role::Breaker,
        mana: 4,
        kind: TemplateKind::Monster {
            attack: 220,
            defense: 200,
            movement: &[
                (Forward, Steps(2)),
                (Left, Steps(1)),
                (Right, Steps(1)),
                (BackLeft, Steps(2)),
                (BackRight, Steps(2)),
                (Back, Steps(1)),
            ],
        },
    },
    CardTemplate {
        id: "stormcaller",
        name: "Stormcaller",
        role: Role::Manipulator,
        mana: 3,
        kind: TemplateKind::Monster {
            attack: 170,
            defense: 190,
            movement: &[
                (ForwardRight, Steps(2)),
                (Left, Steps(1)),
                (Right, Steps(1)),
                (BackLeft, Steps(1)),
                (BackRight, Steps(1)),
            ],
        },
    },
    CardTemplate {
        id: "wings_of_the_shattered_skies",
        name: "Wings of the Shattered Skies",
        role: Role::Walker,
        mana: 2,
        kind: TemplateKind::Monster {
            attack: 150,
            defense: 170,
            movement: &[
                (Forward, Steps(2)),
                (ForwardRight, Steps(1)),
                (ForwardLeft, Steps(1)),
                (BackLeft, Steps(1)),
                (BackRight, Steps(1)),
            ],
        },
    },
    CardTemplate {
        id: "abyssal_leviathan",
        name: "Abyssal Leviathan",
        role: Role::Walker,
        mana: 5,
        kind: TemplateKind::Monster {
            attack: 250,
            defense: 150,
            movement: &[
                (Forward, Steps(2)),
                (Back, Steps(1)),
                (Left, Steps(1)),
                (Right, Steps(1)),
            ],
        },
    },
    CardTemplate {
        id: "bloodthorn_reaper",
        name: "Bloodthorn Reaper",
        role: Role::Breaker,
        mana: 3,
        kind: TemplateKind::Monster {
            attack: 190,
            defense: 140,
            movement: &[
                (ForwardLeft, Steps(2)),
                (ForwardRight, Steps(2)),
                (BackLeft, Steps(1)),
                (BackRight, Steps(1)),
            ],
        },
    },
    CardTemplate {
        id: "celestial_titan",
        name: "Celestial Titan",
        role: Role::Aggressor,
        mana: 6,
        kind: TemplateKind::Monster {
            attack: 200,
            defense: 250,
            movement: &[
                (Forward, Steps(2)),
                (Left, Steps(2)),
                (Right, Steps(2)),
                (Back, Steps(2)),
            ],
        },
    },
    // ------------------------------------------------------------ sorceries
    CardTemplate {
        id: "blazing_rain",
        name: "Blazing Rain",
        role: Role::Aggressor,
        mana: 3,
        kind: TemplateKind::Sorcery {
            effect: SorceryEffect::Instant(InstantEffect::WeakenAllEnemyDefense(50)),
            needs: &[Back],
            text: "Weaken all opponent's DEF by 50.",
        },
    },
    CardTemplate {
        id: "natures_resurgence",
        name: "Natures Resurgence",
        role: Role::Sentinel,
        mana: 1,
        kind: TemplateKind::Sorcery {
            effect: SorceryEffect::Instant(InstantEffect::RaiseAllAlliedDefense(30)),
            needs: &[Forward, ForwardRight],
            text: "Increase the DEF of your monsters by 30.",
        },
    },
    CardTemplate {
        id: "mystic_draw",
        name: "Mystic Draw",
        role: Role::Manipulator,
        mana: 2,
        kind: TemplateKind::Sorcery {
            effect: SorceryEffect::Instant(InstantEffect::DrawCards(2)),
            needs: &[Left, Back],
            text: "Draw 2 cards.",
        },
    },
    CardTemplate {
        id: "divine_reset",
        name: "Divine Reset",
        role: Role::Breaker,
        mana: 2,
        kind: TemplateKind::Sorcery {
            effect: SorceryEffect::Instant(InstantEffect::DestroyAllMonsters),
            needs: &[Left, Right],
            text: "Destroy all monsters on the field.",
        },
    },
    CardTemplate {
        id: "arcane_tempest",
        name: "Arcane Tempest",
        role: Role::Sentinel,
        mana: 2,
        kind: TemplateKind::Sorcery {
            effect: SorceryEffect::Instant(InstantEffect::WeakenAllEnemyAttack(40)),
            needs: &[BackRight],
            text: "Reduce all opponent's ATK by 40.",
        },
    },
    CardTemplate {
        id: "silent_recruiter",
        name: "Silent Recruiter",
        role: Role::Manipulator,
        mana: 2,
        kind: TemplateKind::Sorcery {
            effect: SorceryEffect::Tutor(TutorFilter::MonsterWithMaxAttack(180)),
            needs: &[Back],
            text: "Choose monster with attack lower or equal to 180 from deck and add to hand.",
        },
    },
    CardTemplate {
        id: "one_more_trick",
        name: "One More Trick",
        role: Role::Manipulator,
        mana: 3,
        kind: TemplateKind::Sorcery {
            effect: SorceryEffect::Tutor(TutorFilter::AnySorcery),
            needs: &[Forward],
            text: "Choose a sorcery from deck and add to hand.",
        },
    },
    CardTemplate {
        id: "wanderers_compass",
        name: "Wanderer's Compass",
        role: Role::Walker,
        mana: 2,
        kind: TemplateKind::Sorcery {
            effect: SorceryEffect::Tutor(TutorFilter::AnyLand),
            needs: &[Left],
            text: "Choose a land from your land deck and put it on top.",
        },
    },
    CardTemplate {
        id: "targeted_destruction",
        name: "Targeted Destruction",
        role: Role::Breaker,
        mana: 2,
        kind: TemplateKind::Sorcery {
            effect: SorceryEffect::Targeted(TargetedEffect::DestroyEnemy),
            needs: &[ForwardRight],
            text: "Choose and destroy an enemy monster.",
        },
    },
    CardTemplate {
        id: "empowering_light",
        name: "Empowering Light",
        role: Role::Sentinel,
        mana: 2,
        kind: TemplateKind::Sorcery {
            effect: SorceryEffect::Targeted(TargetedEffect::RaiseAttack(50)),
            needs: &[BackLeft],
            text: "Choose a monster to increase its ATK by 50.",
        },
    },
    CardTemplate {
        id: "frostbite_curse",
        name: "Frostbite Curse",
        role: Role::Aggressor,
        mana: 2,
        kind: TemplateKind::Sorcery {
            effect: SorceryEffect::Targeted(TargetedEffect::WeakenDefense(30)),
            needs: &[Forward],
            text: "Choose a monster to decrease its DEF by 30.",
        },
    },
    CardTemplate {
        id: "mind_seize",
        name: "Mind Seize",
        role: Role::Manipulator,
        mana: 2,
        kind: TemplateKind::Sorcery {
            effect: SorceryEffect::Targeted(TargetedEffect::SeizeControl),
            needs: &[Back, BackRight],
            text: "Choose an enemy monster to take control of it.",
        },
    },
    CardTemplate {
        id: "power_surge",
        name: "Power Surge",
        role: Role::Aggressor,
        mana: 2,
        kind: TemplateKind::Sorcery {
            effect: SorceryEffect::Targeted(TargetedEffect::DoubleStats),
            needs: &[Forward, Left],
            text: "Choose a monster to double its ATK and DEF.",
        },
    },
    CardTemplate {
        id: "rite_of_the_fallen",
        name: "Rite of the Fallen",
        role: Role::Breaker,
        mana: 5,
        kind: TemplateKind::Sorcery {
            effect: SorceryEffect::Scripted(ScriptKind::RiteOfTheFallen),
            needs: &[Back],
            text: "Discard a card, destroy an enemy monster, then revive a \
                   monster from your graveyard onto the freed tile.",
        },
    },
    // ---------------------------------------------------------------- lands
    CardTemplate {
        id: "volcanic_rift",
        name: "Volcanic Rift",
        role: Role::Aggressor,
        mana: 1,
        kind: TemplateKind::Land {
            behavior: LandBehavior::BurnOnEnter(50),
            needs: &[Forward, Back],
            text: "Burns an opponent's monster for 50 DEF when it steps on this tile.",
        },
    },
    CardTemplate {
        id: "sacred_grove",
        name: "Sacred Grove",
        role: Role::Walker,
        mana: 1,
        kind: TemplateKind::Land {
            behavior: LandBehavior::HealOnTurnStart(30),
            needs: &[Left],
            text: "Heals your monster for 30 DEF every turn it's on this tile.",
        },
    },
    CardTemplate {
        id: "frozen_barrier",
        name: "Frozen Barrier",
        role: Role::Sentinel,
        mana: 1,
        kind: TemplateKind::Land {
            behavior: LandBehavior::BlockEnemies,
            needs: &[BackRight, Forward],
            text: "Opponent's monsters cannot move across this tile.",
        },
    },
    CardTemplate {
        id: "storm_nexus",
        name: "Storm Nexus",
        role: Role::Breaker,
        mana: 1,
        kind: TemplateKind::Land {
            behavior: LandBehavior::WeakenAttackOnEnter(40),
            needs: &[BackLeft],
            text: "Reduces the ATK of enemy monsters that land on this tile by 40.",
        },
    },
    CardTemplate {
        id: "wasteland_mine",
        name: "Wasteland Mine",
        role: Role::Manipulator,
        mana: 1,
        kind: TemplateKind::Land {
            behavior: LandBehavior::DrainOnContact(30),
            needs: &[Right],
            text: "An opponent's monster going over or landing on this land loses 30 ATK and DEF.",
        },
    },
    CardTemplate {
        id: "rule_of_the_meek",
        name: "Rule of the Meek",
        role: Role::Sentinel,
        mana: 1,
        kind: TemplateKind::Land {
            behavior: LandBehavior::BlockStrongEnemies(150),
            needs: &[ForwardRight, Right],
            text: "Opponent's monsters with ATK and DEF over 150 cannot move across this tile.",
        },
    },
];
