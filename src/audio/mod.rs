pub mod capture;
pub mod wav;

pub use capture::CaptureHandle;
pub use wav::{encode_wav, read_wav_mono_f32};
