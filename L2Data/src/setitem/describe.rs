//! Stat modifiers → bonus text (`P. Atk. +5%`, `Max HP +100`)

use super::stats::stat_display_name;
use crate::formats::xml::{EffectOp, SkillEffect};

/// Round half up, the way the client tooling rounds (`-2.5` → `-2`)
pub fn js_round(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Describe one modifier.
///
/// `mul` becomes a signed percentage, `add` a signed integer and `sub` a
/// negative integer. `div`, `set`, a `mul` of exactly 1 and non-numeric
/// values produce nothing.
pub fn format_effect(effect: &SkillEffect) -> Option<String> {
    let value: f64 = effect.value.trim().parse().ok().filter(|v: &f64| v.is_finite())?;
    let name = stat_display_name(&effect.stat);

    match effect.op {
        EffectOp::Mul => {
            let percent = format!("{:.2}", (value - 1.0) * 100.0).replacen(".00", "", 1);
            if value > 1.0 {
                Some(format!("{name} +{percent}%"))
            } else if value < 1.0 {
                Some(format!("{name} {percent}%"))
            } else {
                None
            }
        }
        EffectOp::Add => {
            let rounded = js_round(value);
            if value > 0.0 {
                Some(format!("{name} +{rounded}"))
            } else {
                Some(format!("{name} {rounded}"))
            }
        }
        EffectOp::Sub => Some(format!("{name} -{}", js_round(value.abs()))),
        EffectOp::Div | EffectOp::Set => None,
    }
}

/// Join the descriptions of every modifier with `, `
pub fn describe_effects(effects: &[SkillEffect]) -> String {
    effects
        .iter()
        .filter_map(format_effect)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect(op: EffectOp, stat: &str, value: &str) -> SkillEffect {
        SkillEffect {
            op,
            stat: stat.to_string(),
            value: value.to_string(),
            order: None,
        }
    }

    #[test]
    fn test_mul_percentages() {
        assert_eq!(format_effect(&effect(EffectOp::Mul, "pAtk", "1.3")).as_deref(), Some("P. Atk. +30%"));
        assert_eq!(format_effect(&effect(EffectOp::Mul, "pAtk", "0.8")).as_deref(), Some("P. Atk. -20%"));
        assert_eq!(format_effect(&effect(EffectOp::Mul, "mDef", "1.125")).as_deref(), Some("M. Def. +12.50%"));
        assert_eq!(format_effect(&effect(EffectOp::Mul, "pAtk", "1")), None);
    }

    #[test]
    fn test_add_and_sub() {
        assert_eq!(format_effect(&effect(EffectOp::Add, "maxHp", "50")).as_deref(), Some("Max HP +50"));
        assert_eq!(format_effect(&effect(EffectOp::Add, "maxHp", "-49.6")).as_deref(), Some("Max HP -50"));
        assert_eq!(format_effect(&effect(EffectOp::Add, "maxHp", "-0.2")).as_deref(), Some("Max HP 0"));
        assert_eq!(format_effect(&effect(EffectOp::Sub, "runSpd", "-10")).as_deref(), Some("Speed -10"));
        assert_eq!(format_effect(&effect(EffectOp::Sub, "runSpd", "10")).as_deref(), Some("Speed -10"));
    }

    #[test]
    fn test_silent_cases() {
        assert_eq!(format_effect(&effect(EffectOp::Set, "STR", "1")), None);
        assert_eq!(format_effect(&effect(EffectOp::Div, "STR", "2")), None);
        assert_eq!(format_effect(&effect(EffectOp::Add, "STR", "#level")), None);
        assert_eq!(format_effect(&effect(EffectOp::Add, "STR", "")), None);
    }

    #[test]
    fn test_unknown_stat_uses_key() {
        assert_eq!(format_effect(&effect(EffectOp::Add, "fooBar", "3")).as_deref(), Some("fooBar +3"));
    }

    #[test]
    fn test_describe_joins() {
        let effects = [
            effect(EffectOp::Add, "maxHp", "100"),
            effect(EffectOp::Set, "STR", "1"),
            effect(EffectOp::Mul, "pAtkSpd", "1.05"),
        ];
        assert_eq!(describe_effects(&effects), "Max HP +100, Atk. Spd. +5%");
        assert_eq!(js_round(-2.5), -2);
        assert_eq!(js_round(2.5), 3);
    }
}
