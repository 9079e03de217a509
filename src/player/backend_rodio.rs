use super::{FinishedSignal, Transport};
use crate::{PlayerError, error::Result};
use lofty::{file::AudioFile, probe::Probe};
use rodio::{
    ChannelCount, Decoder, OutputStream, OutputStreamBuilder, SampleRate, Sink, Source,
    source::SeekError,
};
use std::{fs::File, io::BufReader, path::Path, time::Duration};

pub struct RodioTransport {
    sink: Sink,
    duration: Option<Duration>,
    _stream: OutputStream,
}

impl RodioTransport {
    pub fn new() -> Result<Self> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::TransportUnavailable(e.to_string()))?;
        let sink = Sink::connect_new(stream.mixer());
        sink.pause();

        Ok(Self {
            sink,
            duration: None,
            _stream: stream,
        })
    }
}

impl Transport for RodioTransport {
    fn load(&mut self, audio: &Path, on_finished: FinishedSignal) -> Result<()> {
        let source = decode(audio)?;
        self.duration = probe_duration(audio).or_else(|| source.total_duration());

        // clear() also pauses the sink
        self.sink.clear();
        self.sink.append(EndNotifier::new(source, on_finished));

        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.sink.pause();
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.sink
            .try_seek(position)
            .map_err(|e| PlayerError::TransportUnavailable(e.to_string()))
    }

    fn rate(&self) -> f32 {
        match self.sink.is_paused() || self.sink.empty() {
            true => 0.0,
            false => self.sink.speed(),
        }
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

fn decode(audio: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(audio).map_err(|e| unavailable(audio, e))?;
    let len = file.metadata().map_err(|e| unavailable(audio, e))?.len();

    let mut builder = Decoder::builder()
        .with_data(BufReader::new(file))
        .with_byte_len(len)
        .with_seekable(true);

    if let Some(ext) = audio.extension().and_then(|e| e.to_str()) {
        let hint = match ext {
            "adif" | "adts" => "aac",
            "m4a" | "m4b" | "m4p" | "m4r" | "mp4" => "audio/mp4",
            "bit" | "mpga" => "mp3",
            "wave" => "wav",
            _ => ext,
        };
        builder = builder.with_hint(hint);
    }

    builder.build().map_err(|e| unavailable(audio, e))
}

fn unavailable(audio: &Path, e: impl std::fmt::Display) -> PlayerError {
    PlayerError::TransportUnavailable(format!("{}: {e}", audio.display()))
}

/// Rodio often cannot tell the length of an mp3 without decoding all of it,
/// the container header usually can.
fn probe_duration(audio: &Path) -> Option<Duration> {
    let tagged = Probe::open(audio).and_then(|probe| probe.read()).ok()?;
    Some(tagged.properties().duration()).filter(|d| !d.is_zero())
}

/// Fires the item's finished signal once the inner source runs dry.
struct EndNotifier<I> {
    input: I,
    signal: Option<FinishedSignal>,
}

impl<I> EndNotifier<I> {
    fn new(input: I, signal: FinishedSignal) -> Self {
        EndNotifier {
            input,
            signal: Some(signal),
        }
    }
}

impl<I> Iterator for EndNotifier<I>
where
    I: Source,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.input.next();
        if sample.is_none() {
            if let Some(signal) = self.signal.take() {
                signal.fire();
            }
        }
        sample
    }
}

impl<I> Source for EndNotifier<I>
where
    I: Source,
{
    fn current_span_len(&self) -> Option<usize> {
        self.input.current_span_len()
    }

    fn channels(&self) -> ChannelCount {
        self.input.channels()
    }

    fn sample_rate(&self) -> SampleRate {
        self.input.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.input.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> std::result::Result<(), SeekError> {
        self.input.try_seek(pos)
    }
}
