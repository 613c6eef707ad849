use std::sync::Arc;
use std::time::Duration;

use hybrid_speech::application::ports::{AudioEncoding, SynthesizedAudio};
use hybrid_speech::application::services::{
    EngineRegistration, EngineRegistry, FallbackResolver, SpeechError,
};
use hybrid_speech::domain::{
    Capability, CapabilitySet, EngineId, EnginePreference, SynthesisRequest, TranscriptionRequest,
};
use hybrid_speech::infrastructure::audio::MockSpeechEngine;

use crate::helpers::{two_engine_registry, wav_audio};

const TIMEOUT: Duration = Duration::from_secs(5);

fn resolver(registry: EngineRegistry) -> FallbackResolver {
    FallbackResolver::new(Arc::new(registry), TIMEOUT)
}

fn tts(text: &str, engine: &str) -> SynthesisRequest {
    SynthesisRequest::new(text, None, EnginePreference::from(engine))
}

fn asr(engine: &str) -> TranscriptionRequest {
    TranscriptionRequest::new(vec![1, 2, 3, 4], EnginePreference::from(engine))
}

#[tokio::test]
async fn given_both_engines_healthy_when_synthesizing_auto_then_highest_priority_serves() {
    let p1 = Arc::new(MockSpeechEngine::succeeding());
    let p2 = Arc::new(MockSpeechEngine::succeeding());
    let resolver = resolver(two_engine_registry(p1.clone(), p2.clone()));

    let result = resolver.synthesize(&tts("Hello world", "auto")).await;

    assert!(result.success());
    assert_eq!(result.engine_used, EngineId::new("p1"));
    assert_eq!(p1.calls(), 1);
    assert_eq!(p2.calls(), 0);
    let speech = result.payload().unwrap();
    assert_eq!(&speech.wav[0..4], b"RIFF");
    assert_eq!(speech.sample_rate, 22_050);
}

#[tokio::test]
async fn given_primary_failing_when_synthesizing_auto_then_secondary_serves() {
    let p1 = Arc::new(MockSpeechEngine::failing("connection refused"));
    let p2 = Arc::new(MockSpeechEngine::succeeding());
    let resolver = resolver(two_engine_registry(p1.clone(), p2.clone()));

    let result = resolver.synthesize(&tts("Hello world", "auto")).await;

    assert!(result.success());
    assert_eq!(result.engine_used, EngineId::new("p2"));
    assert_eq!(p1.calls(), 1);
    assert_eq!(p2.calls(), 1);
    assert_eq!(result.attempts.len(), 2);
    assert!(result.attempts[0].error.as_deref().unwrap().contains("connection refused"));
    assert!(result.attempts[1].error.is_none());
}

#[tokio::test]
async fn given_primary_failing_when_transcribing_auto_then_secondary_transcript_returned() {
    let p1 = Arc::new(MockSpeechEngine::failing("boom"));
    let p2 = Arc::new(MockSpeechEngine::succeeding().with_transcript("  hello there ", Some(0.75)));
    let resolver = resolver(two_engine_registry(p1, p2));

    let result = resolver.transcribe(&asr("auto")).await;

    let (transcript, engine) = result.into_result().unwrap();
    assert_eq!(engine, EngineId::new("p2"));
    assert_eq!(transcript.text, "hello there");
    assert!((transcript.confidence - 0.75).abs() < f32::EPSILON);
}

#[tokio::test]
async fn given_every_engine_failing_when_synthesizing_auto_then_all_providers_failed() {
    let p1 = Arc::new(MockSpeechEngine::failing("first"));
    let p2 = Arc::new(MockSpeechEngine::failing("second"));
    let resolver = resolver(two_engine_registry(p1, p2));

    let result = resolver.synthesize(&tts("Hello", "auto")).await;

    assert!(!result.success());
    assert!(result.engine_used.is_none());
    assert_eq!(result.engine_used.as_str(), "none");
    assert_eq!(
        result.attempted_engines(),
        vec![&EngineId::new("p1"), &EngineId::new("p2")]
    );
    match result.error().unwrap() {
        SpeechError::AllProvidersFailed {
            capability,
            attempted,
        } => {
            assert_eq!(*capability, Capability::Tts);
            assert_eq!(attempted.len(), 2);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    let message = result.error().unwrap().to_string();
    assert!(message.contains("first"));
    assert!(message.contains("second"));
}

#[tokio::test]
async fn given_explicit_unavailable_engine_when_synthesizing_then_no_provider_is_called() {
    let working = Arc::new(MockSpeechEngine::succeeding());
    let registry = EngineRegistry::builder()
        .register(EngineRegistration::unavailable(
            "cloud",
            CapabilitySet::both(),
            "missing api key",
        ))
        .register(EngineRegistration::new("local").with_synthesizer(working.clone()))
        .build()
        .unwrap();
    let resolver = resolver(registry);

    let result = resolver.synthesize(&tts("Hello", "cloud")).await;

    assert!(!result.success());
    assert!(result.engine_used.is_none());
    assert!(result.attempts.is_empty());
    assert_eq!(working.calls(), 0);
    match result.error().unwrap() {
        SpeechError::ProviderUnavailable { engine, reason } => {
            assert_eq!(engine, &EngineId::new("cloud"));
            assert_eq!(reason, "missing api key");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn given_unregistered_engine_when_transcribing_then_provider_unavailable() {
    let p1 = Arc::new(MockSpeechEngine::succeeding());
    let p2 = Arc::new(MockSpeechEngine::succeeding());
    let resolver = resolver(two_engine_registry(p1.clone(), p2.clone()));

    let result = resolver.transcribe(&asr("nonexistent")).await;

    assert!(matches!(
        result.error(),
        Some(SpeechError::ProviderUnavailable { .. })
    ));
    assert!(result.error().unwrap().is_client_error());
    assert_eq!(p1.calls() + p2.calls(), 0);
}

#[tokio::test]
async fn given_explicit_engine_without_capability_when_transcribing_then_provider_unavailable() {
    let synth_only = Arc::new(MockSpeechEngine::succeeding());
    let registry = EngineRegistry::builder()
        .register(EngineRegistration::new("tts-only").with_synthesizer(synth_only.clone()))
        .build()
        .unwrap();
    let resolver = resolver(registry);

    let result = resolver.transcribe(&asr("tts-only")).await;

    match result.error().unwrap() {
        SpeechError::ProviderUnavailable { reason, .. } => assert!(reason.contains("ASR")),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(synth_only.calls(), 0);
}

#[tokio::test]
async fn given_explicit_failing_engine_when_synthesizing_then_no_fallback_happens() {
    let p1 = Arc::new(MockSpeechEngine::failing("quota exceeded"));
    let p2 = Arc::new(MockSpeechEngine::succeeding());
    let resolver = resolver(two_engine_registry(p1.clone(), p2.clone()));

    let result = resolver.synthesize(&tts("Hello", "p1")).await;

    assert!(!result.success());
    assert!(result.engine_used.is_none());
    assert_eq!(p1.calls(), 1);
    assert_eq!(p2.calls(), 0);
    match result.error().unwrap() {
        SpeechError::ProviderCallFailed { engine, reason } => {
            assert_eq!(engine, &EngineId::new("p1"));
            assert!(reason.contains("quota exceeded"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn given_explicit_engine_name_in_mixed_case_when_synthesizing_then_it_is_matched() {
    let p1 = Arc::new(MockSpeechEngine::succeeding());
    let p2 = Arc::new(MockSpeechEngine::succeeding());
    let resolver = resolver(two_engine_registry(p1.clone(), p2.clone()));

    let result = resolver.synthesize(&tts("Hello", " P2 ")).await;

    assert_eq!(result.engine_used, EngineId::new("p2"));
    assert_eq!(p1.calls(), 0);
}

#[tokio::test]
async fn given_only_engine_unavailable_when_synthesizing_auto_then_fails_without_attempts() {
    let registry = EngineRegistry::builder()
        .register(EngineRegistration::unavailable(
            "cloud",
            CapabilitySet::both(),
            "unreachable",
        ))
        .build()
        .unwrap();
    let resolver = resolver(registry);

    let result = resolver.synthesize(&tts("Hello", "auto")).await;

    assert!(result.engine_used.is_none());
    assert!(result.attempts.is_empty());
    assert!(matches!(
        result.error(),
        Some(SpeechError::AllProvidersFailed { .. })
    ));
    assert!(result.error().unwrap().to_string().contains("no available provider"));
}

#[tokio::test]
async fn given_whitespace_text_when_synthesizing_then_invalid_input_and_no_calls() {
    let p1 = Arc::new(MockSpeechEngine::succeeding());
    let p2 = Arc::new(MockSpeechEngine::succeeding());
    let resolver = resolver(two_engine_registry(p1.clone(), p2.clone()));

    for text in ["", "   \n\t"] {
        let result = resolver.synthesize(&tts(text, "auto")).await;
        assert!(matches!(result.error(), Some(SpeechError::InvalidInput(_))));
        assert!(result.engine_used.is_none());
    }
    assert_eq!(p1.calls() + p2.calls(), 0);
}

#[tokio::test]
async fn given_empty_audio_when_transcribing_then_invalid_input_and_no_calls() {
    let p1 = Arc::new(MockSpeechEngine::succeeding());
    let p2 = Arc::new(MockSpeechEngine::succeeding());
    let resolver = resolver(two_engine_registry(p1.clone(), p2.clone()));

    let request = TranscriptionRequest::new(Vec::new(), EnginePreference::Auto);
    let result = resolver.transcribe(&request).await;

    assert!(matches!(result.error(), Some(SpeechError::InvalidInput(_))));
    assert_eq!(p1.calls() + p2.calls(), 0);
}

#[tokio::test]
async fn given_audio_over_limit_when_transcribing_then_invalid_input() {
    let p1 = Arc::new(MockSpeechEngine::succeeding());
    let p2 = Arc::new(MockSpeechEngine::succeeding());
    let resolver = resolver(two_engine_registry(p1.clone(), p2)).with_max_audio_bytes(8);

    let request = TranscriptionRequest::new(vec![0; 9], EnginePreference::Auto);
    let result = resolver.transcribe(&request).await;

    assert!(matches!(result.error(), Some(SpeechError::InvalidInput(_))));
    assert_eq!(p1.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn given_primary_hanging_when_synthesizing_auto_then_timeout_falls_back() {
    let p1 = Arc::new(MockSpeechEngine::hanging(Duration::from_secs(600)));
    let p2 = Arc::new(MockSpeechEngine::succeeding());
    let resolver = resolver(two_engine_registry(p1.clone(), p2.clone()));

    let result = resolver.synthesize(&tts("Hello", "auto")).await;

    assert_eq!(result.engine_used, EngineId::new("p2"));
    assert!(result.attempts[0].error.as_deref().unwrap().contains("timed out"));
}

#[tokio::test]
async fn given_primary_returning_empty_audio_when_synthesizing_auto_then_falls_back() {
    let p1 = Arc::new(MockSpeechEngine::empty());
    let p2 = Arc::new(MockSpeechEngine::succeeding());
    let resolver = resolver(two_engine_registry(p1.clone(), p2));

    let result = resolver.synthesize(&tts("Hello", "auto")).await;

    assert_eq!(result.engine_used, EngineId::new("p2"));
    assert_eq!(p1.calls(), 1);
}

#[tokio::test]
async fn given_primary_without_results_when_transcribing_auto_then_falls_back() {
    let p1 = Arc::new(MockSpeechEngine::empty());
    let p2 = Arc::new(MockSpeechEngine::succeeding());
    let resolver = resolver(two_engine_registry(p1.clone(), p2));

    let result = resolver.transcribe(&asr("auto")).await;

    assert_eq!(result.engine_used, EngineId::new("p2"));
    assert_eq!(p1.calls(), 1);
}

#[tokio::test]
async fn given_non_wav_payload_when_synthesizing_then_auto_falls_back_and_explicit_reports_format() {
    let mp3 = SynthesizedAudio {
        data: vec![0xFF, 0xFB, 0x90, 0x00],
        encoding: AudioEncoding::Other("audio/mpeg".to_string()),
    };
    let p1 = Arc::new(MockSpeechEngine::succeeding().with_audio(mp3));
    let p2 = Arc::new(MockSpeechEngine::succeeding().with_audio(wav_audio(16_000, 1600)));
    let resolver = resolver(two_engine_registry(p1, p2));

    let auto = resolver.synthesize(&tts("Hello", "auto")).await;
    assert_eq!(auto.engine_used, EngineId::new("p2"));
    assert_eq!(auto.payload().unwrap().sample_rate, 16_000);

    let explicit = resolver.synthesize(&tts("Hello", "p1")).await;
    match explicit.error().unwrap() {
        SpeechError::UnsupportedFormat { engine, detail } => {
            assert_eq!(engine, &EngineId::new("p1"));
            assert!(detail.contains("audio/mpeg"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn given_missing_or_out_of_range_confidence_when_transcribing_then_normalized() {
    let cases = [(None, 0.0), (Some(1.7), 1.0), (Some(-0.2), 0.0), (Some(f32::NAN), 0.0)];

    for (raw, expected) in cases {
        let engine = Arc::new(MockSpeechEngine::succeeding().with_transcript("hi", raw));
        let registry = EngineRegistry::builder()
            .register(EngineRegistration::new("only").with_recognizer(engine))
            .build()
            .unwrap();

        let result = resolver(registry).transcribe(&asr("auto")).await;

        assert_eq!(result.payload().unwrap().confidence, expected);
    }
}

#[tokio::test]
async fn given_concurrent_requests_when_resolving_then_each_is_served_independently() {
    let p1 = Arc::new(MockSpeechEngine::succeeding());
    let p2 = Arc::new(MockSpeechEngine::succeeding());
    let resolver = Arc::new(resolver(two_engine_registry(p1.clone(), p2)));

    let mut handles = Vec::new();
    for i in 0..8 {
        let resolver = resolver.clone();
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                resolver.synthesize(&tts("Hello", "auto")).await.success()
            } else {
                resolver.transcribe(&asr("auto")).await.success()
            }
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap());
    }
    assert_eq!(p1.calls(), 8);
}
