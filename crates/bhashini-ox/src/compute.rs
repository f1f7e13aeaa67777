use tracing::instrument;

use crate::{
    AsrRequest, AsrResult, AudioFormat, Bhashini, BhashiniRequestError, Gender, SamplingRate,
    TranslationRequest, TranslationResult, TtsRequest, TtsResult, request::ComputeRequest,
};

impl Bhashini {
    /// Transcribe audio.
    ///
    /// # Example
    /// ```rust,no_run
    /// # use bhashini_ox::{AsrRequest, Bhashini};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Bhashini::load_from_env()?;
    /// let audio = std::fs::read("audio.wav")?;
    /// let result = client.asr(&AsrRequest::new(audio, "hi")).await?;
    /// println!("{}", result.transcript());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(
        skip_all,
        fields(lang = %request.source_language, format = %request.audio_format, rate = request.sampling_rate)
    )]
    pub async fn asr(&self, request: &AsrRequest) -> Result<AsrResult, BhashiniRequestError> {
        let service = self.languages.asr_service(&request.source_language)?;
        let audio_format = AudioFormat::parse(&request.audio_format)?;
        let sampling_rate = SamplingRate::parse(request.sampling_rate)?;

        let body = ComputeRequest::asr(
            &request.audio,
            &request.source_language,
            service.service_id.as_deref(),
            audio_format,
            sampling_rate,
        );

        let raw = self
            .request_helper()
            .post_json(&self.compute_url, &body)
            .await?;
        AsrResult::from_raw(raw)
    }

    /// Translate text between a supported language pair.
    #[instrument(
        skip_all,
        fields(source = %request.source_language, target = %request.target_language)
    )]
    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, BhashiniRequestError> {
        let service = self
            .languages
            .translation_service(&request.source_language, &request.target_language)?;

        let body = ComputeRequest::translation(
            &request.text,
            &request.source_language,
            &request.target_language,
            service.service_id.as_deref(),
        );

        let raw = self
            .request_helper()
            .post_json(&self.compute_url, &body)
            .await?;
        TranslationResult::from_raw(raw)
    }

    /// Synthesize speech. The audio comes back base64 encoded in the result.
    #[instrument(
        skip_all,
        fields(lang = %request.source_language, gender = %request.gender, rate = request.sampling_rate)
    )]
    pub async fn tts(&self, request: &TtsRequest) -> Result<TtsResult, BhashiniRequestError> {
        let service = self.languages.tts_service(&request.source_language)?;

        let gender: Gender = request
            .gender
            .trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| BhashiniRequestError::UnsupportedGender {
                gender: request.gender.clone(),
                available: "male, female".to_string(),
            })?;

        let voices = service.voices();
        if !voices.contains(&gender) {
            return Err(BhashiniRequestError::UnsupportedGender {
                gender: request.gender.clone(),
                available: voices
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        let sampling_rate = SamplingRate::parse(request.sampling_rate)?;

        let body = ComputeRequest::tts(
            &request.text,
            &request.source_language,
            service.service_id.as_deref(),
            gender,
            sampling_rate,
        );

        let raw = self
            .request_helper()
            .post_json(&self.compute_url, &body)
            .await?;
        TtsResult::from_raw(raw)
    }
}
