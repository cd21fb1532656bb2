use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;


pub fn bench_main(c: &mut Criterion) {
    membership::bench(c);
    promote::bench(c);
    roots::bench(c);
}

criterion_group!(benches, bench_main);
criterion_main!(benches);
