//! The project manifest.

use super::types::{ArchiveTarget, CodeTarget, Language, LinkSpec, LocalizedArchive, Manifest, Region, RenameTable};

const LOADER_SOURCES: &[&str] = &["Loader.c"];

const PAYLOAD_SOURCES: &[&str] = &[
  "egg/core/eggHeap.c",
  "egg/core/eggVideo.S",
  "egg/core/eggSystem.c",
  "game/effect/Effect.S",
  "game/gfx/Camera.S",
  "game/gfx/CameraManager.S",
  "game/host_system/BootStrapScene.c",
  "game/host_system/Patcher.c",
  "game/host_system/Payload.c",
  "game/host_system/RkSystem.c",
  "game/host_system/SceneManager.S",
  "game/host_system/SceneManager.c",
  "game/item/ItemObjKouraAka.S",
  "game/item/ItemObjKouraAo.S",
  "game/item/ItemObjKouraMidori.S",
  "game/kart/KartMove.S",
  "game/kart/KartObject.S",
  "game/kart/KartObjectManager.S",
  "game/kart/KartObjectManager.c",
  "game/kart/KartParam.S",
  "game/kart/KartState.S",
  "game/kart/KartSub.S",
  "game/obj/ObjManager.c",
  "game/obj/ObjPylon01.S",
  "game/obj/ObjPylon01.c",
  "game/race/Driver.S",
  "game/race/DriverManager.c",
  "game/race/JugemManager.S",
  "game/race/JugemManager.c",
  "game/snd/DriverSound.S",
  "game/snd/KartSound.S",
  "game/snd/Snd.S",
  "game/system/CourseMap.S",
  "game/system/DvdArchive.S",
  "game/system/GhostFile.c",
  "game/system/HomeButton.S",
  "game/system/InputManager.S",
  "game/system/InputManager.c",
  "game/system/Mii.S",
  "game/system/MultiDvdArchive.c",
  "game/system/NandHelper.c",
  "game/system/NandManager.S",
  "game/system/RaceConfig.S",
  "game/system/RaceConfig.c",
  "game/system/RaceManager.S",
  "game/system/RaceManager.c",
  "game/system/ResourceManager.S",
  "game/system/ResourceManager.c",
  "game/system/SaveManager.S",
  "game/system/SaveManager.c",
  "game/system/Yaz.c",
  "game/ui/ControlLoader.S",
  "game/ui/GhostManagerPage.S",
  "game/ui/GhostManagerPage.c",
  "game/ui/GhostSelectButton.c",
  "game/ui/GhostSelectControl.c",
  "game/ui/Layout.S",
  "game/ui/License.S",
  "game/ui/License.c",
  "game/ui/LicenseSelectButton.c",
  "game/ui/LicenseSelectPage.c",
  "game/ui/LicenseSettingsPage.c",
  "game/ui/Map2DRenderer.c",
  "game/ui/MiiGroup.c",
  "game/ui/Model.S",
  "game/ui/Page.c",
  "game/ui/Save.S",
  "game/ui/SaveManagerProxy.S",
  "game/ui/Section.c",
  "game/ui/SectionManager.S",
  "game/ui/SectionManager.c",
  "game/ui/TabControl.c",
  "game/ui/TimeAttackGhostListPage.c",
  "game/ui/TimeAttackRulesPage.c",
  "game/ui/TimeAttackTopPage.S",
  "game/ui/TitlePage.S",
  "game/ui/TitlePage.c",
  "game/ui/UIAnimator.c",
  "game/ui/UIControl.c",
  "game/ui/Wipe.S",
  "game/ui/ctrl/CtrlMenuBackButton.c",
  "game/ui/ctrl/CtrlMenuInstructionText.c",
  "game/ui/ctrl/CtrlMenuPageTitleText.c",
  "game/ui/ctrl/CtrlRace2DMap.S",
  "game/ui/ctrl/CtrlRaceBase.S",
  "game/ui/ctrl/CtrlRaceBase.c",
  "game/ui/ctrl/CtrlRaceInputDisplay.c",
  "game/ui/ctrl/CtrlRaceLap.c",
  "game/ui/ctrl/CtrlRaceNameBalloon.S",
  "game/ui/ctrl/CtrlRaceNameBalloon.c",
  "game/ui/ctrl/CtrlRaceSpeed.c",
  "game/ui/ctrl/CtrlRaceTime.S",
  "game/ui/ctrl/CtrlRaceTime.c",
  "game/ui/page/CharacterSelectPage.S",
  "game/ui/page/CourseSelectPage.S",
  "game/ui/page/CupSelectPage.S",
  "game/ui/page/DemoPage.S",
  "game/ui/page/DriftSelectPage.S",
  "game/ui/page/MachineSelectPage.S",
  "game/ui/page/RaceMenuPage.S",
  "game/ui/page/RaceMenuPage.c",
  "game/ui/page/RacePage.S",
  "game/ui/page/RacePage.c",
  "game/ui/page/SingleTopMenuPage.S",
  "game/ui/page/SingleTopMenuPage.c",
  "game/ui/page/TimeAttackSplitsPage.S",
  "game/ui/page/TimeAttackSplitsPage.c",
  "game/ui/page/TopMenuPage.S",
  "game/ui/page/TopMenuPage.c",
  "game/ui/page/VsMenuPage.S",
  "game/ui/page/VsMenuPage.c",
  "game/ui/page/VsRulesPage.c",
  "game/util/Input.S",
  "nw4r/lyt/lyt_arcResourceAccessor.S",
  "nw4r/lyt/lyt_layout.S",
  "nw4r/snd/snd_DvdSoundArchive.S",
  "revolution/dvd.c",
  "revolution/nand.c",
  "sp/Fatal.c",
  "sp/FlameGraph.c",
  "sp/IOSDolphin.c",
  "sp/IOSKeyboard.c",
  "sp/Keyboard.c",
];

const MENU_OTHER_SP_MEMBERS: &[&str] = &[
  "button/ctrl/LicenseManagementButton.brctr.json5",
  "control/anim/common_w023_rule_menu_fade_in_after.brlan.json5",
  "control/anim/common_w023_rule_menu_fade_in_before.brlan.json5",
  "control/anim/common_w023_rule_menu_fade_in.brlan.json5",
  "control/anim/common_w023_rule_menu_fade_out.brlan.json5",
  "control/anim/common_w023_rule_menu_free.brlan.json5",
  "control/anim/common_w023_rule_menu_free_to_select.brlan.json5",
  "control/anim/common_w023_rule_menu_fuchi_check_loop.brlan.json5",
  "control/anim/common_w023_rule_menu_select.brlan.json5",
  "control/anim/common_w023_rule_menu_select_to_free.brlan.json5",
  "control/anim/common_w023_rule_menu_text_light_01_ok.brlan.json5",
  "control/anim/common_w023_rule_menu_text_light_01_stop.brlan.json5",
  "control/anim/common_w023_rule_menu_text_light_02_select.brlan.json5",
  "control/anim/common_w023_rule_menu_text_light_02_stop.brlan.json5",
  "control/anim/common_w024_rule_icon_active_off.brlan.json5",
  "control/anim/common_w024_rule_icon_active_off_to_on.brlan.json5",
  "control/anim/common_w024_rule_icon_active_on.brlan.json5",
  "control/anim/common_w024_rule_icon_fade_in_after.brlan.json5",
  "control/anim/common_w024_rule_icon_fade_in_before.brlan.json5",
  "control/anim/common_w024_rule_icon_fade_in.brlan.json5",
  "control/anim/common_w024_rule_icon_fade_out.brlan.json5",
  "control/anim/common_w024_rule_icon_free.brlan.json5",
  "control/anim/common_w024_rule_icon_free_to_select.brlan.json5",
  "control/anim/common_w024_rule_icon_fuchi_check_loop.brlan.json5",
  "control/anim/common_w024_rule_icon_select.brlan.json5",
  "control/anim/common_w024_rule_icon_select_to_free.brlan.json5",
  "control/anim/common_w024_rule_icon_text_light_01_ok.brlan.json5",
  "control/anim/common_w024_rule_icon_text_light_01_stop.brlan.json5",
  "control/anim/common_w024_rule_icon_text_light_02_select.brlan.json5",
  "control/anim/common_w024_rule_icon_text_light_02_stop.brlan.json5",
  "control/blyt/common_w024_rule_icon.brlyt.json5",
  "control/blyt/common_w076_license_icon_center.brlyt.json5",
  "control/blyt/common_w201_setting_menu.brlyt.json5",
  "control/ctrl/LicenseDisplay.brctr.json5",
  "control/ctrl/LicenseManagement.brctr.json5",
  "control/ctrl/LicenseSettingRadioBase.brctr.json5",
  "control/ctrl/LicenseSettingRadioOption.brctr.json5",
  "control/timg/tt_license_icon_004.tpl",
];

const MENU_SINGLE_SP_MEMBERS: &[&str] = &[
  "button/blyt/common_w129_movie_button_single_top.brlyt.json5",
  "button/ctrl/SingleTop.brctr.json5",
  "button/ctrl/TimeAttackGhostListArrowLeft.brctr.json5",
  "button/ctrl/TimeAttackGhostListArrowRight.brctr.json5",
  "button/ctrl/TimeAttackGhostList.brctr.json5",
  "control/anim/common_w200_ghost_button_active_off.brlan.json5",
  "control/anim/common_w200_ghost_button_active_off_to_on.brlan.json5",
  "control/anim/common_w200_ghost_button_active_on.brlan.json5",
  "control/anim/common_w200_ghost_button_free.brlan.json5",
  "control/anim/common_w200_ghost_button_free_to_select.brlan.json5",
  "control/anim/common_w200_ghost_button_light_01_ok.brlan.json5",
  "control/anim/common_w200_ghost_button_light_01_stop.brlan.json5",
  "control/anim/common_w200_ghost_button_light_02_select.brlan.json5",
  "control/anim/common_w200_ghost_button_light_02_stop.brlan.json5",
  "control/anim/common_w200_ghost_button_select.brlan.json5",
  "control/anim/common_w200_ghost_button_select_to_free.brlan.json5",
  "control/anim/friend_room_comment_container_center_to_right.brlan.json5",
  "control/anim/friend_room_comment_container_hide.brlan.json5",
  "control/anim/friend_room_comment_container_left_to_center.brlan.json5",
  "control/anim/friend_room_comment_container_show.brlan.json5",
  "control/blyt/common_w200_ghost_button.brlyt.json5",
  "control/blyt/ghost_container.brlyt.json5",
  "control/ctrl/GhostSelectBase.brctr.json5",
  "control/ctrl/GhostSelectOption.brctr.json5",
  "control/ctrl/TASettingRadioBase.brctr.json5",
  "control/ctrl/TASettingRadioOption.brctr.json5",
  "control/ctrl/TimeAttackGhostListPageNum.brctr.json5",
  "control/ctrl/VSSettingRadioOption.brctr.json5",
];

const RACE_SP_MEMBERS: &[&str] = &[
  "button/blyt/common_w202_menu_compact.brlyt.json5",
  "button/ctrl/AfterMenuBT.brctr.json5",
  "button/ctrl/AfterMenuBTLast.brctr.json5",
  "button/ctrl/AfterMenuEndConfirm.brctr.json5",
  "button/ctrl/AfterMenuTimeAttack.brctr.json5",
  "button/ctrl/AfterMenuVS.brctr.json5",
  "button/ctrl/AfterMenuVSLast.brctr.json5",
  "button/ctrl/PauseMenuGhostWatch.brctr.json5",
  "button/ctrl/PauseMenuReplayTA.brctr.json5",
  "button/ctrl/PauseMenuTimeAttack.brctr.json5",
  "button/ctrl/PauseMenuVS.brctr.json5",
  "game_image/anim/game_image_speed_texture_pattern_0_9.brlan.json5",
  "game_image/blyt/game_image_speed.brlyt.json5",
  "game_image/blyt/InputDisplay.brlyt.json5",
  "game_image/blyt/race_message_half.brlyt",
  "game_image/ctrl/battle_total_point.brctr.json5",
  "game_image/ctrl/InputDisplay.brctr.json5",
  "game_image/ctrl/lap_number.brctr.json5",
  "game_image/ctrl/position_multi.brctr.json5",
  "game_image/ctrl/speed_number.brctr.json5",
  "game_image/ctrl/time_number.brctr.json5",
  "game_image/timg/basic_accel_off.tpl",
  "game_image/timg/basic_accel_on.tpl",
  "game_image/timg/basic_cstick_bg.tpl",
  "game_image/timg/basic_cstick_center.tpl",
  "game_image/timg/basic_dpad_down.tpl",
  "game_image/timg/basic_dpad_left.tpl",
  "game_image/timg/basic_dpad_off.tpl",
  "game_image/timg/basic_dpad_right.tpl",
  "game_image/timg/basic_dpad_up.tpl",
  "game_image/timg/basic_trigger_bd_off.tpl",
  "game_image/timg/basic_trigger_bd_on.tpl",
  "game_image/timg/basic_trigger_l_off.tpl",
  "game_image/timg/basic_trigger_l_on.tpl",
  "game_image/timg/basic_trigger_r_off.tpl",
  "game_image/timg/basic_trigger_r_on.tpl",
  "game_image/timg/tt_d_number_3d_minus.tpl",
  "game_image/timg/tt_d_number_3d_none.tpl",
];

const TITLE_SP_MEMBERS: &[&str] = &[
  "button/blyt/common_w076_license_icon_center.brlyt.json5",
  "button/ctrl/LicenseSelect.brctr.json5",
  "button/ctrl/TopMenuMultiWaku.brctr.json5",
  "button/ctrl/TopMenuSingleWaku.brctr.json5",
  "button/timg/tt_license_icon_004.tpl",
];
/// Text tables every localized archive carries, collapsed to one name when packed.
const MESSAGE_TABLES: &[&str] = &["Common", "Menu", "Race"];

/// Languages that ship their own speedometer texture.
const SPEED_TEXTURE_LANGUAGES: &[Language] = &[Language::E, Language::F, Language::G, Language::I, Language::S];

impl Manifest {
  /// The manifest for the loader, the payload and the UI archives.
  pub fn builtin() -> Self {
    let code_targets = vec![
      CodeTarget::new(
        "loader",
        LOADER_SOURCES,
        LinkSpec::Fixed {
          output: "$outdir/loader.bin".to_string(),
          base: "0x80004000".to_string(),
          script: "loader/RMC.ld".to_string(),
        },
      ),
      CodeTarget::new(
        "payload",
        PAYLOAD_SOURCES,
        LinkSpec::PerRegion {
          dir: "$outdir/disc/bin".to_string(),
          stem: "payload".to_string(),
        },
      ),
    ];

    let archives = vec![
      ArchiveTarget::new("MenuOtherSP.szs", MENU_OTHER_SP_MEMBERS),
      ArchiveTarget::new("MenuSingleSP.szs", MENU_SINGLE_SP_MEMBERS),
      ArchiveTarget::new("RaceSP.szs", RACE_SP_MEMBERS),
      ArchiveTarget::new("TitleSP.szs", TITLE_SP_MEMBERS),
    ];

    let common = "message/Common_{lang}.bmg.json5";
    let menu = "message/Menu_{lang}.bmg.json5";
    let race = "message/Race_{lang}.bmg.json5";
    let localized_archives = vec![
      LocalizedArchive::new("AwardSP", &[common, menu, race]),
      LocalizedArchive::new("MenuMultiSP", &[common, menu]),
      LocalizedArchive::new("MenuOtherSP", &[common, menu]),
      LocalizedArchive::new("MenuSingleSP", &[common, menu]),
      // TODO: pick the speedometer texture per language once the other variants are drawn.
      LocalizedArchive::new("RaceSP", &["game_image/timg/tt_speed_E.tpl", common, menu, race]),
      LocalizedArchive::new("TitleSP", &[common, menu]),
    ];

    Self {
      code_targets,
      symbol_map: "symbols.txt".to_string(),
      regions: Region::ALL.to_vec(),
      archives,
      localized_archives,
      languages: Language::ALL.to_vec(),
      renames: builtin_renames(),
    }
  }
}

fn builtin_renames() -> RenameTable {
  let mut renames = RenameTable::new();
  for table in MESSAGE_TABLES {
    for language in Language::ALL {
      renames.insert(&format!("{table}_{language}.bmg"), &format!("{table}.bmg"));
    }
  }
  for language in SPEED_TEXTURE_LANGUAGES {
    renames.insert(&format!("tt_speed_{language}.tpl"), "tt_speed.tpl");
  }
  renames
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn payload_is_linked_per_region() {
    let manifest = Manifest::builtin();
    let payload = manifest.code_targets.iter().find(|t| t.name == "payload").unwrap();
    assert!(matches!(payload.link, LinkSpec::PerRegion { .. }));
    assert_eq!(payload.sources.first().map(String::as_str), Some("egg/core/eggHeap.c"));
    assert_eq!(payload.sources.last().map(String::as_str), Some("sp/Keyboard.c"));
  }

  #[test]
  fn rename_table_covers_every_message_language() {
    let renames = builtin_renames();
    assert_eq!(renames.len(), MESSAGE_TABLES.len() * Language::ALL.len() + SPEED_TEXTURE_LANGUAGES.len());
    assert_eq!(renames.canonical_name("Common_Q.bmg"), "Common.bmg");
    assert_eq!(renames.canonical_name("tt_speed_S.tpl"), "tt_speed.tpl");
    assert_eq!(renames.canonical_name("tt_speed_J.tpl"), "tt_speed_J.tpl");
  }

  #[test]
  fn universal_language_is_listed() {
    assert!(Manifest::builtin().languages.contains(&Language::UNIVERSAL));
  }
}
