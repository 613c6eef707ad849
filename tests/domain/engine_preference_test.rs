use hybrid_speech::domain::{EngineId, EnginePreference};

#[test]
fn given_auto_spellings_when_parsing_then_auto() {
    for raw in ["auto", "AUTO", " Auto ", ""] {
        assert_eq!(EnginePreference::from(raw), EnginePreference::Auto, "{raw:?}");
    }
    assert_eq!(EnginePreference::from(None), EnginePreference::Auto);
}

#[test]
fn given_engine_name_when_parsing_then_named_and_lowercased() {
    let preference = EnginePreference::from("Espeak");

    assert_eq!(preference, EnginePreference::Named(EngineId::new("espeak")));
    assert!(!preference.is_auto());
    assert_eq!(preference.to_string(), "espeak");
}

#[test]
fn given_none_engine_id_when_checked_then_reported_as_none() {
    assert!(EngineId::none().is_none());
    assert_eq!(EngineId::none().to_string(), "none");
    assert!(!EngineId::new("riva").is_none());
}
