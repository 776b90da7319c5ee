//! Icon token → client asset path
//!
//! Group records store icons as bracketed dotted names such as
//! `{[icon.weapon_small_sword_i00];[None]}`. The real folder layout lives in
//! the client assets, so the folder is guessed from the name prefix. A wrong
//! guess only means a missing preview image.

use serde::{Deserialize, Serialize};

const BRANCH_PREFIX: &str = "BranchIcon.";
const CASHTEX_PREFIX: &str = "br_cashtex.item.";

/// Which table the icon came from; decides the fallback folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconContext {
    /// Item group records and the XML item database (fallback `etc_i/`)
    #[default]
    Item,
    /// Skill group records (fallback `skill_i/`)
    Skill,
}

/// Resolve a raw field value to a relative asset path.
///
/// Uses the first non-empty `[...]` group. Returns `None` when there is no
/// group or the group is literally `None`.
pub fn resolve_icon(raw: &str, ctx: IconContext) -> Option<String> {
    let token = first_bracket_group(raw)?;
    if token == "None" {
        return None;
    }
    resolve_icon_token(token, ctx)
}

/// Resolve a bare token (no brackets), as found in the XML item database
pub fn resolve_icon_token(token: &str, ctx: IconContext) -> Option<String> {
    if token.is_empty() {
        return None;
    }

    if token.starts_with(BRANCH_PREFIX) {
        return Some(token.replace('.', "/"));
    }
    if let Some(rest) = token.strip_prefix(CASHTEX_PREFIX) {
        return Some(rest.to_string());
    }

    let name = token.strip_prefix("icon.").unwrap_or(token);

    if name.starts_with("item_") {
        return Some(capitalize_item_icon(name));
    }

    Some(format!("{}{name}", subfolder(name, ctx)))
}

/// Full URL for an icon under the asset root, e.g. `/Icon/weapon_i/x.png`
pub fn icon_asset_url(raw: &str, ctx: IconContext) -> Option<String> {
    let path = resolve_icon(raw, ctx)?;

    if path.starts_with("BranchIcon/") {
        Some(format!("/{path}.png"))
    } else if ctx == IconContext::Item && raw.contains(CASHTEX_PREFIX) {
        Some(format!("/br_cashtex/item/{path}.png"))
    } else {
        Some(format!("/Icon/{path}.png"))
    }
}

fn first_bracket_group(raw: &str) -> Option<&str> {
    let mut rest = raw;
    while let Some(start) = rest.find('[') {
        let after = &rest[start + 1..];
        let end = after.find(']')?;
        if end > 0 {
            return Some(&after[..end]);
        }
        rest = &after[end + 1..];
    }
    None
}

fn subfolder(name: &str, ctx: IconContext) -> &'static str {
    if name.starts_with("weapon_") {
        "weapon_i/"
    } else if name.starts_with("armor_") {
        armor_subfolder(name)
    } else if name.starts_with("shield_") {
        "shield_i/"
    } else if name.starts_with("accessory_") || name.starts_with("accessary_") {
        "accessary_i/"
    } else if name.starts_with("etc_") {
        "etc_i/"
    } else if ctx == IconContext::Skill && name.starts_with("giant_") {
        "etc_i/"
    } else if name.starts_with("skill") {
        "skill_i/"
    } else {
        match ctx {
            IconContext::Item => "etc_i/",
            IconContext::Skill => "skill_i/",
        }
    }
}

fn armor_subfolder(name: &str) -> &'static str {
    const PARTS: [(&str, &str); 5] = [
        ("_h_", "helmet_i/"),
        ("_u_", "upbody_i/"),
        ("_l_", "lowbody_i/"),
        ("_g_", "glove_i/"),
        ("_b_", "boots_i/"),
    ];

    PARTS
        .iter()
        .find(|(infix, _)| name.contains(infix))
        .map_or("onepiece/", |(_, folder)| folder)
}

/// `item_canuse28` → `Item_CanUse28`, `item_normal06` → `Item_Normal06`
fn capitalize_item_icon(name: &str) -> String {
    name.split('_')
        .enumerate()
        .map(|(index, segment)| {
            if index == 0 {
                return "Item".to_string();
            }

            let text = segment.trim_end_matches(|c: char| c.is_ascii_digit());
            let digits = &segment[text.len()..];
            let special = match text.to_ascii_lowercase().as_str() {
                "canuse" => Some("CanUse"),
                "normal" => Some("Normal"),
                "system" => Some("System"),
                "gragonskill" => Some("Gragonskill"),
                _ => None,
            };

            match special {
                Some(word) => format!("{word}{digits}"),
                None => upper_first(segment),
            }
        })
        .collect::<Vec<_>>()
        .join("_")
}

fn upper_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_icon() {
        assert_eq!(
            resolve_icon("{[icon.weapon_small_sword_i00];[None]}", IconContext::Item).as_deref(),
            Some("weapon_i/weapon_small_sword_i00")
        );
    }

    #[test]
    fn test_branch_icon() {
        assert_eq!(
            resolve_icon("[BranchIcon.Icon.etc_vip_present_i03]", IconContext::Item).as_deref(),
            Some("BranchIcon/Icon/etc_vip_present_i03")
        );
        assert_eq!(
            icon_asset_url("[BranchIcon.Icon.etc_vip_present_i03]", IconContext::Item).as_deref(),
            Some("/BranchIcon/Icon/etc_vip_present_i03.png")
        );
    }

    #[test]
    fn test_cashtex_icon() {
        let raw = "{[br_cashtex.item.br_cash_pack_i00];[None]}";
        assert_eq!(resolve_icon(raw, IconContext::Item).as_deref(), Some("br_cash_pack_i00"));
        assert_eq!(
            icon_asset_url(raw, IconContext::Item).as_deref(),
            Some("/br_cashtex/item/br_cash_pack_i00.png")
        );
    }

    #[test]
    fn test_item_root_icons() {
        assert_eq!(resolve_icon("[item_canuse28]", IconContext::Item).as_deref(), Some("Item_CanUse28"));
        assert_eq!(resolve_icon("[icon.item_normal06]", IconContext::Item).as_deref(), Some("Item_Normal06"));
        assert_eq!(resolve_icon_token("item_system_box", IconContext::Item).as_deref(), Some("Item_System_Box"));
        assert_eq!(
            icon_asset_url("[icon.item_normal06]", IconContext::Item).as_deref(),
            Some("/Icon/Item_Normal06.png")
        );
    }

    #[test]
    fn test_none_and_missing() {
        assert_eq!(resolve_icon("[None]", IconContext::Item), None);
        assert_eq!(resolve_icon("", IconContext::Item), None);
        assert_eq!(resolve_icon("icon.weapon_x", IconContext::Item), None);
        assert_eq!(
            resolve_icon("{[];[icon.etc_x]}", IconContext::Item).as_deref(),
            Some("etc_i/etc_x")
        );
    }

    #[test]
    fn test_armor_parts() {
        let cases = [
            ("icon.armor_t01_h_i00", "helmet_i/"),
            ("icon.armor_t01_u_i00", "upbody_i/"),
            ("icon.armor_t01_l_i00", "lowbody_i/"),
            ("icon.armor_t01_g_i00", "glove_i/"),
            ("icon.armor_t01_b_i00", "boots_i/"),
            ("icon.armor_t01_ul_i00", "onepiece/"),
        ];
        for (token, folder) in cases {
            let path = resolve_icon_token(token, IconContext::Item).unwrap();
            assert!(path.starts_with(folder), "{token} -> {path}");
        }
    }

    #[test]
    fn test_context_fallbacks() {
        assert_eq!(resolve_icon_token("icon.unknown_x", IconContext::Item).as_deref(), Some("etc_i/unknown_x"));
        assert_eq!(resolve_icon_token("icon.unknown_x", IconContext::Skill).as_deref(), Some("skill_i/unknown_x"));
        assert_eq!(resolve_icon_token("icon.giant_x", IconContext::Skill).as_deref(), Some("etc_i/giant_x"));
        assert_eq!(resolve_icon_token("icon.skill0003", IconContext::Skill).as_deref(), Some("skill_i/skill0003"));
        assert_eq!(resolve_icon_token("icon.accessary_ring_i00", IconContext::Item).as_deref(), Some("accessary_i/accessary_ring_i00"));
    }
}
