use jukebox::engine::audio::SilentPlayer;
use jukebox::engine::resources::{BindError, ElementIds, ElementRegistry};
use jukebox::game::{ExclusiveTrackController, Selection, ToggleControl, Track};

fn full_registry(ids: &ElementIds) -> ElementRegistry<SilentPlayer> {
    let mut registry = ElementRegistry::default();
    for track in Track::ALL {
        registry.register_toggle(ids.toggle_id(track), ToggleControl::new(false));
        registry.register_player(ids.audio_id(track), SilentPlayer::default());
    }
    registry
}

#[test]
fn test_bind_takes_all_elements() {
    let ids = ElementIds::default();
    let mut registry = full_registry(&ids);
    let mut controller = ExclusiveTrackController::bind(&mut registry, &ids).unwrap();
    assert_eq!(registry.element_count(), 0);

    controller.initialize();
    assert_eq!(controller.selection(), Selection::MenuSelected);
}

#[test]
fn test_missing_toggle_fails_fast() {
    let ids = ElementIds::default();
    let mut registry = full_registry(&ids);
    registry.take_toggle("toggle_ambient");

    let err = ExclusiveTrackController::bind(&mut registry, &ids).unwrap_err();
    assert_eq!(
        err,
        BindError::MissingToggle {
            id: "toggle_ambient".to_string()
        }
    );
    // Nothing was taken out.
    assert_eq!(registry.element_count(), 5);
}

#[test]
fn test_missing_player_fails_fast() {
    let ids = ElementIds::default();
    let mut registry = full_registry(&ids);
    registry.take_player("audio_battle");

    let err = ExclusiveTrackController::bind(&mut registry, &ids).unwrap_err();
    assert_eq!(err.to_string(), "audio player 'audio_battle' is not registered");
    assert_eq!(registry.element_count(), 5);
}

#[test]
fn test_empty_registry_reports_first_missing_element() {
    let ids = ElementIds::default();
    let mut registry: ElementRegistry<SilentPlayer> = ElementRegistry::default();
    let err = ExclusiveTrackController::bind(&mut registry, &ids).unwrap_err();
    assert_eq!(
        err,
        BindError::MissingToggle {
            id: "toggle_menu".to_string()
        }
    );
}

#[test]
fn test_repeated_id_fails_before_taking_anything() {
    let ids = ElementIds::new(
        ["toggle_menu".into(), "toggle_ambient".into(), "toggle_menu".into()],
        ["audio_menu".into(), "audio_ambient".into(), "audio_battle".into()],
    );
    let mut registry = full_registry(&ElementIds::default());
    assert_eq!(registry.element_count(), 6);

    let err = ExclusiveTrackController::bind(&mut registry, &ids).unwrap_err();
    assert_eq!(
        err,
        BindError::DuplicateId {
            id: "toggle_menu".to_string()
        }
    );
    assert_eq!(registry.element_count(), 6);
}
