use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Quat, Vec3};
use std::time::Duration;
use viewer_camera::controls::ThrottledPoseBroadcaster;
use viewer_camera::traits::PoseSink;
use viewer_camera::{sample_pose, PerspectiveCamera, TransportError, ViewerMessage};

/// Sink that only encodes, so the benchmark measures sampling + serialization
struct EncodeOnlySink {
    buffer: Vec<u8>,
}

impl PoseSink for EncodeOnlySink {
    fn send(&mut self, message: &ViewerMessage) -> Result<(), TransportError> {
        self.buffer.clear();
        serde_json::to_writer(&mut self.buffer, message)?;
        Ok(())
    }
}

fn camera() -> PerspectiveCamera {
    PerspectiveCamera::new(60.0, 16.0 / 9.0, 0.01, 1000.0)
        .with_pose(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(0.7))
}

/// Benchmark: Pure pose sampling
fn bench_sample_pose(c: &mut Criterion) {
    let camera = camera();

    c.bench_function("sample_pose", |b| b.iter(|| black_box(sample_pose(black_box(&camera)))));
}

/// Benchmark: Pose sampling plus JSON encoding
fn bench_sample_and_encode(c: &mut Criterion) {
    let camera = camera();
    let mut buffer = Vec::with_capacity(512);

    c.bench_function("sample_and_encode", |b| {
        b.iter(|| {
            buffer.clear();
            let message = ViewerMessage::ViewerCameraMessage(sample_pose(&camera));
            serde_json::to_writer(&mut buffer, black_box(&message)).unwrap();
            black_box(buffer.len())
        })
    });
}

/// Benchmark: A burst of change signals inside one throttle window
fn bench_throttled_burst(c: &mut Criterion) {
    c.bench_function("throttled_burst_100", |b| {
        b.iter(|| {
            let sink = EncodeOnlySink { buffer: Vec::with_capacity(512) };
            let mut broadcaster = ThrottledPoseBroadcaster::new(
                camera().into_shared(),
                Box::new(sink),
                Duration::from_millis(20),
            );
            for t in 0..100u64 {
                broadcaster.on_changed(Duration::from_micros(t * 100));
            }
            broadcaster.poll(Duration::from_millis(20));
            black_box(broadcaster.sent())
        })
    });
}

criterion_group!(benches, bench_sample_pose, bench_sample_and_encode, bench_throttled_burst);
criterion_main!(benches);
