pub mod asr;
pub mod language;

pub use asr::{AsrBackend, AsrRequest, TranscriptionResult, remote_whisper::RemoteWhisperBackend};
pub use language::language_code;
