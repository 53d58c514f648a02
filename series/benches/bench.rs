use criterion::{Criterion, criterion_group, criterion_main};
use series::{Measurement, MeasurementWriter, SeriesSet, from_reader};

fn table() -> Vec<u8> {
    let mut w = MeasurementWriter::new(Vec::new()).unwrap();
    for shift in 10..28u32 {
        for rep in 0..50u64 {
            for method in ["memcpy", "mremap"] {
                w.write(&Measurement::new(1 << shift, method, 1000 + rep)).unwrap();
            }
        }
    }
    w.into_inner().unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let csv = table();
    c.bench_function("parse_and_group", |b| {
        b.iter(|| SeriesSet::from_measurements(from_reader(csv.as_slice()).unwrap()))
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = criterion_benchmark,
);

criterion_main!(benches);
