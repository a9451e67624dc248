use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::warn;

/// A microphone capture in progress.
///
/// The cpal stream lives on a dedicated thread (streams are not `Send` on
/// every backend). The capture callback forwards each incoming frame over a
/// channel while the recording flag is set; the buffer is only drained after
/// the stream thread has been stopped and joined, so the caller never reads
/// concurrently with the callback.
pub struct CaptureHandle {
    recording: Arc<AtomicBool>,
    frames: mpsc::Receiver<Vec<i16>>,
    thread: Option<JoinHandle<()>>,
}

impl CaptureHandle {
    /// Open the default input device at `sample_rate` Hz, mono, 16-bit, and
    /// start capturing.
    pub fn start(sample_rate: u32) -> Result<Self> {
        let recording = Arc::new(AtomicBool::new(true));
        let (frame_tx, frame_rx) = mpsc::channel::<Vec<i16>>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();

        let flag = Arc::clone(&recording);
        let thread = thread::spawn(move || {
            run_stream(sample_rate, flag, frame_tx, ready_tx);
        });

        // Stream setup happens on the capture thread; wait for its verdict.
        ready_rx
            .recv()
            .map_err(|_| anyhow!("Capture thread exited before the stream was ready"))??;

        Ok(Self {
            recording,
            frames: frame_rx,
            thread: Some(thread),
        })
    }

    /// Stop capturing and return every sample recorded, in order.
    ///
    /// An empty vec means no frames arrived during the session; callers must
    /// treat that as "nothing recorded" and skip the rest of the pipeline.
    pub fn stop(mut self) -> Result<Vec<i16>> {
        self.recording.store(false, Ordering::SeqCst);

        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| anyhow!("Capture thread panicked"))?;
        }

        // The sender is gone once the thread has joined; everything left in
        // the channel is the complete recording.
        let mut samples = Vec::new();
        while let Ok(frame) = self.frames.try_recv() {
            samples.extend_from_slice(&frame);
        }

        Ok(samples)
    }
}

fn run_stream(
    sample_rate: u32,
    recording: Arc<AtomicBool>,
    frame_tx: mpsc::Sender<Vec<i16>>,
    ready_tx: mpsc::Sender<Result<()>>,
) {
    let stream = match build_stream(sample_rate, Arc::clone(&recording), frame_tx) {
        Ok(stream) => stream,
        Err(e) => {
            let _ = ready_tx.send(Err(e));
            return;
        }
    };

    if let Err(e) = stream.play() {
        let _ = ready_tx.send(Err(e).context("Failed to start input stream"));
        return;
    }

    let _ = ready_tx.send(Ok(()));

    while recording.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(20));
    }

    // Dropping the stream here stops capture and releases the device.
    drop(stream);
}

fn build_stream(
    sample_rate: u32,
    recording: Arc<AtomicBool>,
    frame_tx: mpsc::Sender<Vec<i16>>,
) -> Result<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .context("No microphone found")?;

    let config = cpal::StreamConfig {
        channels: 1,
        sample_rate: cpal::SampleRate(sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let stream = device
        .build_input_stream(
            &config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                if recording.load(Ordering::SeqCst) {
                    // Receiver outlives the stream; a send failure just means
                    // the session is already being torn down.
                    let _ = frame_tx.send(data.to_vec());
                }
            },
            |err| warn!("Input stream error: {}", err),
            None,
        )
        .with_context(|| {
            format!(
                "Microphone does not support {} Hz mono 16-bit capture",
                sample_rate
            )
        })?;

    Ok(stream)
}
