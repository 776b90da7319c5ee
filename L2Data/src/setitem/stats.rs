//! Display names for server stat keys

const STAT_NAMES: &[(&str, &str)] = &[
    // HP / MP / CP
    ("maxHp", "Max HP"),
    ("maxMp", "Max MP"),
    ("maxCp", "Max CP"),
    ("regHp", "HP Recovery Rate"),
    ("regMp", "MP Recovery Rate"),
    ("regCp", "CP Recovery Rate"),
    ("hpLimit", "HP Limit"),
    ("mpLimit", "MP Limit"),
    ("cpLimit", "CP Limit"),
    // Speed
    ("runSpd", "Speed"),
    ("moveSpeed", "Speed"),
    // Attack and defense
    ("pDef", "P. Def."),
    ("mDef", "M. Def."),
    ("pAtk", "P. Atk."),
    ("mAtk", "M. Atk."),
    ("pAtkSpd", "Atk. Spd."),
    ("mAtkSpd", "Casting Spd."),
    // Reuse
    ("mReuse", "Magic Reuse"),
    ("pReuse", "Physical Reuse"),
    ("musicReuse", "Music Reuse"),
    ("atkReuse", "Attack Reuse"),
    ("atkBaseSpeed", "Base Attack Speed"),
    // Critical / evasion
    ("cAtk", "Critical Damage"),
    ("cAtkStatic", "Critical Damage"),
    ("rEvas", "Evasion"),
    ("evasionRate", "Evasion"),
    ("accCombat", "Accuracy"),
    ("baseCrit", "Critical Rate"),
    ("rCrit", "Critical Rate"),
    ("mCritRate", "Magic Critical Rate"),
    ("mCritDamage", "Magic Critical Damage"),
    ("mCritDamageResist", "Magic Critical Damage Resistance"),
    // Damage
    ("physDamage", "Physical Damage"),
    ("magicDamage", "Magic Damage"),
    // Shield and interrupt
    ("concentration", "Magic Cancel Rate"),
    ("sDef", "Shield Defense"),
    ("rShld", "Shield Defense Rate"),
    ("shldAngle", "Shield Block Angle"),
    ("shieldDef", "Shield Defense"),
    ("shieldDefRate", "Shield Defense Rate"),
    // Range and angle
    ("pAtkRange", "Physical Attack Range"),
    ("mAtkRange", "Magic Attack Range"),
    ("poleAngle", "Pole Attack Angle"),
    ("poleTargetCount", "Pole Target Count"),
    // Base stats
    ("STR", "STR"),
    ("CON", "CON"),
    ("DEX", "DEX"),
    ("INT", "INT"),
    ("WIT", "WIT"),
    ("MEN", "MEN"),
    // Misc
    ("breath", "Breath Gauge"),
    ("breathBonus", "Breath Gauge"),
    ("fall", "Fall Damage Resistance"),
    ("expLost", "EXP Loss Reduction"),
    ("maxNoPenaltyLoad", "Weight Limit"),
    ("weightLimit", "Weight Limit"),
    ("hpEff", "Heal Amount Received"),
    ("mpEff", "MP Recovery Amount"),
    // Resistances
    ("bleedResist", "Resistance to bleed attack"),
    ("poisonResist", "Resistance to poison attack"),
    ("stunResist", "Resistance to stun attack"),
    ("rootResist", "Resistance to root attack"),
    ("mentalResist", "Mental Resistance"),
    ("sleepResist", "Resistance to sleep attack"),
    ("paralyzeResist", "Resistance to paralysis attack"),
    ("cancelResist", "Buff Cancel Resistance"),
    ("debuffResist", "Debuff Resistance"),
    ("magicResist", "Magic Resistance"),
    ("confusionResist", "Confusion Resistance"),
    // Effect power
    ("bleedPower", "Bleed Power"),
    ("poisonPower", "Poison Power"),
    ("stunPower", "Stun Power"),
    ("rootPower", "Root Power"),
    ("mentalPower", "Mental Power"),
    ("sleepPower", "Sleep Power"),
    ("paralyzePower", "Paralyze Power"),
    ("cancelPower", "Cancel Power"),
    ("debuffPower", "Debuff Power"),
    ("magicPower", "Magic Power"),
    // Crit and vulnerabilities
    ("blowRate", "Fatal Blow Chance"),
    ("SkillCritChanceMod", "Skill Critical Chance"),
    ("deathVuln", "Death Vulnerability"),
    ("critDamRcpt", "Critical Damage Vulnerability"),
    ("critChanceRcpt", "Critical Chance Vulnerability"),
    // Elemental defense
    ("defenceFire", "Fire Defense"),
    ("defenceWater", "Water Defense"),
    ("defenceWind", "Wind Defense"),
    ("defenceEarth", "Earth Defense"),
    ("defenceHoly", "Holy Defense"),
    ("defenceUnholy", "Unholy Defense"),
    // Elemental attack
    ("attackFire", "Fire Attack"),
    ("attackWater", "Water Attack"),
    ("attackWind", "Wind Attack"),
    ("attackEarth", "Earth Attack"),
    ("attackHoly", "Holy Attack"),
    ("attackUnholy", "Unholy Attack"),
    // Weapon vulnerability
    ("swordWpnVuln", "Sword Vulnerability"),
    ("dualWpnVuln", "Dual Sword Vulnerability"),
    ("bluntWpnVuln", "Blunt Weapon Vulnerability"),
    ("daggerWpnVuln", "Dagger Vulnerability"),
    ("bowWpnVuln", "Bow Vulnerability"),
    ("crossbowWpnVuln", "Crossbow Vulnerability"),
    ("poleWpnVuln", "Pole Vulnerability"),
    ("fistWpnVuln", "Fist Vulnerability"),
    // Absorption and transfer
    ("absorbDam", "Damage Absorption"),
    ("absorbDamToMp", "Damage to MP Absorption"),
    ("absorbDamToMpChance", "Damage to MP Chance"),
    ("transferPetDam", "Damage Transfer to Pet"),
    ("transferToEffectorDam", "Damage Transfer to Buffer"),
    // Reflection
    ("reflectAndBlockDam", "Physical Damage Reflection"),
    ("reflectAndBlockPSkillDam", "Physical Skill Reflection"),
    ("reflectAndBlockMSkillDam", "Magic Skill Reflection"),
    ("absorbDamageValue", "Damage Absorption Value"),
    ("reflectDam", "Damage Reflection"),
    ("reflectPSkillDam", "Physical Skill Damage Reflection"),
    ("reflectMSkillDam", "Magic Skill Damage Reflection"),
    ("reflectPhysicSkill", "Physical Skill Reflection"),
    ("reflectMagicSkill", "Magic Skill Reflection"),
    ("reflectPhysicDebuff", "Physical Debuff Reflection"),
    ("reflectMagicDebuff", "Magic Debuff Reflection"),
    // Evasion and counter
    ("pSkillEvasion", "Physical Skill Evasion"),
    ("counterAttack", "Counter Attack"),
    // PvP
    ("skillPower", "Skill Power"),
    ("pvpPhysDmgBonus", "PvP Physical Damage"),
    ("pvpPhysSkillDmgBonus", "PvP Physical Skill Damage"),
    ("pvpMagicSkillDmgBonus", "PvP Magic Skill Damage"),
    ("pvpPhysDefenceBonus", "PvP Physical Defense"),
    ("pvpPhysSkillDefenceBonus", "PvP Physical Skill Defense"),
    ("pvpMagicSkillDefenceBonus", "PvP Magic Skill Defense"),
    // PvE
    ("pvePhysDmgBonus", "PvE Physical Damage"),
    ("pvePhysSkillDmgBonus", "PvE Physical Skill Damage"),
    ("pveMagicSkillDmgBonus", "PvE Magic Skill Damage"),
    ("pvePhysDefenceBonus", "PvE Physical Defense"),
    ("pvePhysSkillDefenceBonus", "PvE Physical Skill Defense"),
    ("pveMagicSkillDefenceBonus", "PvE Magic Skill Defense"),
    // Other
    ("mpConsumeRate", "MP Consumption"),
    ("pDamBow", "P. Atk. when bow equipped"),
];

/// Human-readable name of a stat key; unknown keys are returned unchanged
pub fn stat_display_name(stat: &str) -> &str {
    STAT_NAMES
        .iter()
        .find(|(key, _)| *key == stat)
        .map_or(stat, |(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_and_unknown() {
        assert_eq!(stat_display_name("pAtk"), "P. Atk.");
        assert_eq!(stat_display_name("runSpd"), "Speed");
        assert_eq!(stat_display_name("defenceHoly"), "Holy Defense");
        assert_eq!(stat_display_name("someNewStat"), "someNewStat");
    }

    #[test]
    fn test_keys_are_unique() {
        let mut seen = HashSet::new();
        for (key, _) in STAT_NAMES {
            assert!(seen.insert(*key), "duplicate stat key {key}");
        }
    }
}
