use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::RngCore;
use tempfile::TempDir;

// Reference the main crate
extern crate unixio;

use unixio::vfs::{LocalTransport, SeekWhence, VfsFile, VfsTransport, path_to_uri};

// Generate a random payload of specified length
fn generate_payload(length: usize) -> Vec<u8> {
    let mut data = vec![0u8; length];
    rand::thread_rng().fill_bytes(&mut data);
    data
}

// Benchmark the write loop with element sizes typical of decoders
pub fn bench_write(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let uri = path_to_uri(&dir.path().join("write.bin")).unwrap();
    let data = generate_payload(64 * 1024);
    let transport = LocalTransport::new();

    let mut group = c.benchmark_group("Write");

    for size in [1usize, 4, 4096] {
        group.bench_function(format!("64KiB_elem_{}", size), |b: &mut criterion::Bencher| {
            let mut file = transport.open(&uri, "w").unwrap();
            b.iter(|| {
                file.rewind();
                black_box(file.write(black_box(&data), size, data.len() / size))
            });
            file.close().unwrap();
        });
    }

    group.finish();
}

// Benchmark the read loop
pub fn bench_read(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("read.bin");
    std::fs::write(&path, generate_payload(64 * 1024)).unwrap();
    let uri = path_to_uri(&path).unwrap();
    let transport = LocalTransport::new();

    let mut group = c.benchmark_group("Read");
    let mut buf = vec![0u8; 64 * 1024];
    let len = buf.len();

    for size in [1usize, 4, 4096] {
        group.bench_function(format!("64KiB_elem_{}", size), |b: &mut criterion::Bencher| {
            let mut file = transport.open(&uri, "r").unwrap();
            b.iter(|| {
                file.rewind();
                black_box(file.read(&mut buf, size, len / size))
            });
            file.close().unwrap();
        });
    }

    group.finish();
}

// Benchmark the multi-step cursor operations
pub fn bench_cursor_ops(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cursor.bin");
    std::fs::write(&path, generate_payload(4096)).unwrap();
    let uri = path_to_uri(&path).unwrap();

    let mut file = LocalTransport::new().open(&uri, "r").unwrap();
    file.seek(100, SeekWhence::Set).unwrap();

    let mut group = c.benchmark_group("CursorOps");

    group.bench_function("eof", |b: &mut criterion::Bencher| b.iter(|| black_box(file.eof())));
    group.bench_function("size", |b: &mut criterion::Bencher| b.iter(|| black_box(file.size().unwrap())));
    group.bench_function("getc_ungetc", |b: &mut criterion::Bencher| b.iter(|| {
        let c = file.getc().unwrap();
        black_box(file.ungetc(c))
    }));

    group.finish();
    file.close().unwrap();
}

criterion_group!(benches, bench_write, bench_read, bench_cursor_ops);
criterion_main!(benches);
