use hybrid_speech::domain::{DEFAULT_VOICE, EnginePreference, SynthesisRequest};

#[test]
fn given_no_voice_when_building_request_then_default_voice_used() {
    let request = SynthesisRequest::new("Hello", None, EnginePreference::Auto);
    assert_eq!(request.voice, DEFAULT_VOICE);

    let blank = SynthesisRequest::new("Hello", Some("  ".to_string()), EnginePreference::Auto);
    assert_eq!(blank.voice, DEFAULT_VOICE);
}

#[test]
fn given_voice_when_building_request_then_voice_kept() {
    let request = SynthesisRequest::new(
        "Hello",
        Some("English-US.Male-1".to_string()),
        EnginePreference::from("riva"),
    );

    assert_eq!(request.voice, "English-US.Male-1");
    assert_eq!(request.requested_engine.to_string(), "riva");
}
