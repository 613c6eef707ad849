use std::io::Cursor;

use crate::application::ports::{AudioEncoding, RecognizedSpeech, SynthesizedAudio};
use crate::domain::{SynthesizedSpeech, Transcript};

const PCM_BITS_PER_SAMPLE: u16 = 16;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("audio payload is empty")]
    EmptyAudio,
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
}

/// Turns whatever a synthesizer produced into WAV with a known sample rate.
pub fn normalize_audio(audio: SynthesizedAudio) -> Result<SynthesizedSpeech, NormalizeError> {
    if audio.data.is_empty() {
        return Err(NormalizeError::EmptyAudio);
    }

    match audio.encoding {
        AudioEncoding::Wav => inspect_wav(audio.data),
        AudioEncoding::LinearPcm {
            sample_rate,
            channels,
        } => wrap_linear_pcm(&audio.data, sample_rate, channels),
        AudioEncoding::Other(container) => Err(NormalizeError::UnsupportedFormat(format!(
            "{} is not a WAV container",
            container
        ))),
    }
}

/// Trims the transcript and pins confidence into `[0, 1]`, defaulting to 0.
pub fn normalize_transcript(speech: RecognizedSpeech) -> Transcript {
    let confidence = speech
        .confidence
        .filter(|c| c.is_finite())
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or(0.0);

    Transcript {
        text: speech.transcript.trim().to_string(),
        confidence,
    }
}

fn inspect_wav(data: Vec<u8>) -> Result<SynthesizedSpeech, NormalizeError> {
    let (spec, frames) = {
        let reader = hound::WavReader::new(Cursor::new(data.as_slice()))
            .map_err(|e| NormalizeError::UnsupportedFormat(format!("malformed wav: {}", e)))?;
        (reader.spec(), reader.duration())
    };

    if spec.sample_rate == 0 || spec.channels == 0 {
        return Err(NormalizeError::UnsupportedFormat(
            "wav header declares no sample rate or channels".to_string(),
        ));
    }
    if frames == 0 {
        return Err(NormalizeError::EmptyAudio);
    }

    Ok(SynthesizedSpeech {
        wav: data,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        frames,
    })
}

fn wrap_linear_pcm(
    data: &[u8],
    sample_rate: u32,
    channels: u16,
) -> Result<SynthesizedSpeech, NormalizeError> {
    if sample_rate == 0 || channels == 0 {
        return Err(NormalizeError::UnsupportedFormat(format!(
            "linear pcm needs a sample rate and channel count (got {} Hz, {} ch)",
            sample_rate, channels
        )));
    }

    let frame_bytes = 2 * channels as usize;
    if data.len() % frame_bytes != 0 {
        return Err(NormalizeError::UnsupportedFormat(format!(
            "linear pcm length {} is not a multiple of the {}-byte frame",
            data.len(),
            frame_bytes
        )));
    }

    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: PCM_BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(data.len() + 44));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| NormalizeError::UnsupportedFormat(format!("wav header: {}", e)))?;
        for sample in data.chunks_exact(2) {
            writer
                .write_sample(i16::from_le_bytes([sample[0], sample[1]]))
                .map_err(|e| NormalizeError::UnsupportedFormat(format!("wav body: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| NormalizeError::UnsupportedFormat(format!("wav finalize: {}", e)))?;
    }

    let frames = (data.len() / frame_bytes) as u32;
    tracing::debug!(
        sample_rate,
        channels,
        frames,
        "Wrapped linear PCM into WAV container"
    );

    Ok(SynthesizedSpeech {
        wav: cursor.into_inner(),
        sample_rate,
        channels,
        frames,
    })
}
