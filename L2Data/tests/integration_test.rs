use l2data::gateway::backup_path;
use l2data::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn layout_in(dir: &Path) -> DataLayout {
    DataLayout::load(dir.to_string_lossy()).unwrap()
}

const ARMOR_SETS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<list>
    <set id="1" chest="23" legs="2386" skills="3500-1;9999-1" />
    <set id="2" chest="58" legs="59" head="60" skills="3501-1" shield="626" shield_skills="3502-1" />
</list>
"#;

const SET_SKILLS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<list>
    <skill id="3500" levels="1" name="Wooden Set">
        <for>
            <add stat="maxHp" val="100" />
        </for>
    </skill>
    <skill id="3501" levels="1" name="Mithril Set">
        <for>
            <mul stat="pAtk" val="1.05" />
        </for>
    </skill>
    <skill id="3502" levels="1" name="Mithril Shield">
        <for>
            <add stat="pDef" val="20" />
        </for>
    </skill>
</list>
"#;

const ITEM_NAMES: &str = "item_name_begin\tid=1\tname=[Short Sword]\tname_class=-1\titem_name_end\n\
                          item_name_begin\tid=23\tname=[Wooden Breastplate]\tname_class=-1\titem_name_end\n\
                          item_name_begin\tid=58\tname=[Mithril Breastplate]\tname_class=1\titem_name_end\n";

#[test]
fn test_generate_sets_then_sync_name_class() {
    let dir = tempdir().unwrap();
    let layout = layout_in(dir.path());
    write(&layout.armor_sets(), ARMOR_SETS);
    write(&layout.skills_dir().join("3500-3599.xml"), SET_SKILLS);
    write(&layout.block_file(BlockKind::ItemName), ITEM_NAMES);

    let report = generate_set_items(&layout);
    assert!(report.success, "{}", report.message);
    let logs: Vec<String> = report.logs.unwrap().into_iter().map(|l| l.message).collect();
    assert!(logs.contains(&"Found 2 armor sets".to_string()));
    assert!(logs.contains(&"Generated 2 set entries".to_string()));

    let generated = fs::read_to_string(layout.block_file(BlockKind::SetItemGroup)).unwrap();
    assert_eq!(
        generated,
        "setitem_group_begin\tnum=0\tessential_setitem_id={{23};{2386}}\tessential_setitem_desc={[Max HP +100]}\t\
         additional_setitem_id={}\tadditional_setitem_desc={}\tunk1=0\tunk2=0\tenchant_setitem_condition={}\tsetitem_group_end\n\
         setitem_group_begin\tnum=1\tessential_setitem_id={{58};{59};{60}}\t\
         essential_setitem_desc={[No set effect];[P. Atk. +5%]}\tadditional_setitem_id={{626}}\t\
         additional_setitem_desc={[P. Def. +20]}\tunk1=0\tunk2=0\tenchant_setitem_condition={}\tsetitem_group_end\n"
    );

    let report = sync_name_class(&layout);
    assert!(report.success, "{}", report.message);
    let logs: Vec<String> = report.logs.unwrap().into_iter().map(|l| l.message).collect();
    assert!(logs.contains(&"Updated item 23: name_class -1 → 0".to_string()));
    assert!(logs.contains(&"1 items updated, 1 items already correct".to_string()));

    let item_names = fs::read_to_string(layout.block_file(BlockKind::ItemName)).unwrap();
    assert!(item_names.contains("id=23\tname=[Wooden Breastplate]\tname_class=0\t"));
    assert!(item_names.contains("id=1\tname=[Short Sword]\tname_class=-1\t"));
    assert_eq!(
        fs::read_to_string(backup_path(&layout.block_file(BlockKind::ItemName))).unwrap(),
        ITEM_NAMES
    );
}

#[test]
fn test_delete_skill_level_across_both_files() {
    let dir = tempdir().unwrap();
    let layout = layout_in(dir.path());
    let skill_names = "skill_begin\tskill_id=1000\tskill_level=1\tskill_sublevel=0\tname=[Bash]\tskill_end\n\
                       skill_begin\tskill_id=1000\tskill_level=2\tskill_sublevel=0\tname=[Bash]\tskill_end\n";
    let skill_groups = "skill_begin\tskill_id=1000\tskill_level=1\tskill_sublevel=0\tmp_consume=10\tskill_end\n\
                        skill_begin\tskill_id=1000\tskill_level=2\tskill_sublevel=0\tmp_consume=12\tskill_end\n";
    write(&layout.block_file(BlockKind::SkillName), skill_names);
    write(&layout.block_file(BlockKind::SkillGroup), skill_groups);

    let report = delete_skill_everywhere(&layout, "1000", Some("2"), None);
    assert!(report.success);
    assert_eq!(report.deleted_from, Some(vec!["skill-name".to_string(), "skill-group".to_string()]));

    let store = DataStore::load(&layout).unwrap();
    assert_eq!(store.skill_levels("1000").len(), 1);
    assert_eq!(store.skill_groups.len(), 1);
    assert_eq!(store.skill_groups[0].get("mp_consume"), Some("10"));
    assert_eq!(
        fs::read_to_string(backup_path(&layout.block_file(BlockKind::SkillGroup))).unwrap(),
        skill_groups
    );
}

#[test]
fn test_save_families_keeps_going_after_failure() {
    let dir = tempdir().unwrap();
    let layout = layout_in(dir.path());
    // A directory where the armor file should be makes that write fail
    fs::create_dir_all(layout.block_file(BlockKind::Armor)).unwrap();

    let mut store = DataStore::new();
    store.weapons = parse_blocks("item_begin\tobject_id=1\tweight=1600\titem_end\n", BlockKind::Weapon);

    let report = save_families(&layout, &store, &[BlockKind::Armor, BlockKind::Weapon]);
    assert!(!report.success);
    assert_eq!(report.message, "Files saved: weapon (1 failed)");
    assert_eq!(report.errors.as_ref().map(Vec::len), Some(1));
    assert!(report.errors.unwrap()[0].starts_with("armor: "));
    assert_eq!(
        fs::read_to_string(layout.block_file(BlockKind::Weapon)).unwrap(),
        "item_begin\tobject_id=1\tweight=1600\titem_end\n"
    );
}

#[test]
fn test_edit_save_reload() {
    let dir = tempdir().unwrap();
    let layout = layout_in(dir.path());
    write(&layout.block_file(BlockKind::ItemName), ITEM_NAMES);
    write(&layout.block_file(BlockKind::Weapon), "item_begin\tobject_id=1\ttag=2\tweight=1600\titem_end\n");
    write(&layout.block_file(BlockKind::Armor), "");
    write(&layout.block_file(BlockKind::EtcItem), "");

    let mut store = DataStore::load(&layout).unwrap();
    assert!(store.skill_names.is_empty());

    store.set_item_text("1", "description", "Line one\nLine two").unwrap();
    let new_id = store.duplicate_item("1").unwrap();
    assert_eq!(new_id, "59");

    let report = save_families(&layout, &store, &[BlockKind::ItemName, BlockKind::Weapon]);
    assert!(report.success, "{}", report.message);

    let reloaded = DataStore::load(&layout).unwrap();
    let item = reloaded.get(BlockKind::ItemName, &RecordKey::single("1")).unwrap();
    assert_eq!(item.display_text("description").unwrap(), "Line one\nLine two");
    let copy = reloaded.get(BlockKind::ItemName, &RecordKey::single("59")).unwrap();
    assert_eq!(copy.get("name"), Some("[Copy of Short Sword]"));
    let (kind, group) = reloaded.group_record("59").unwrap();
    assert_eq!(kind, BlockKind::Weapon);
    assert_eq!(group.get("tag"), Some("0"));
}

#[test]
fn test_layout_file_overrides() {
    let dir = tempdir().unwrap();
    write(
        &dir.path().join("l2data.toml"),
        "txt_dir = \"client\"\n\n[files]\nweapon = \"Weapongrp_Custom.txt\"\n",
    );
    let layout = layout_in(dir.path());
    assert_eq!(
        layout.block_file(BlockKind::Weapon),
        dir.path().join("client").join("Weapongrp_Custom.txt")
    );
}

#[test]
fn test_multisell_edit_save_reload() {
    let dir = tempdir().unwrap();
    let layout = layout_in(dir.path());
    let path = layout.multisell_dir().join("001.xml");
    write(
        &path,
        "<list><config showall=\"true\"/><item><ingredient id=\"57\" count=\"100\"/>\
         <production id=\"1\" count=\"1\" enchant=\"2\"/></item></list>",
    );

    let mut table = read_multisell(&path).unwrap();
    let copy = table.duplicate_entry(0).unwrap();
    let entry = table.entry_mut(copy).unwrap();
    assert!(entry.replace_record(MultisellSide::Production, 0, "2"));
    entry.add_record(MultisellSide::Ingredient, "1864");
    table.add_entry();

    let report = save_multisell(&layout, "001.xml", &table);
    assert!(report.success, "{}", report.message);
    assert!(backup_path(&path).exists());

    let reloaded = read_multisell(&path).unwrap();
    assert_eq!(reloaded, table);
    assert_eq!(reloaded.items.len(), 3);
    assert_eq!(reloaded.items[1].productions[0]["id"], "2");
    assert_eq!(reloaded.items[1].productions[0]["enchant"], "2");
    assert_eq!(reloaded.items[1].ingredients.len(), 2);
    assert_eq!(reloaded.items[2], MultisellEntry::blank());
}
