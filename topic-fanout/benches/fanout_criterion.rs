use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokio::runtime::Builder;
use topic_fanout::benchmark_support::{
    generate_identity_rows, register_listener_rows, FanOutFixture,
};

const REGISTRATION_ROWS: usize = 256;
const FANOUT_SUBSCRIBER_ROWS: usize = 128;
const IDENTITY_ROWS: usize = 512;

fn fanout_criterion(c: &mut Criterion) {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("benchmark runtime should build");

    let mut registration_group = c.benchmark_group("registration");
    registration_group.bench_function("listener_rows", |b| {
        b.iter(|| {
            let registered = runtime.block_on(register_listener_rows(REGISTRATION_ROWS));
            black_box(registered);
        });
    });
    registration_group.finish();

    let mut fixture = runtime.block_on(FanOutFixture::channel_subscribers(FANOUT_SUBSCRIBER_ROWS));
    let mut fanout_group = c.benchmark_group("fanout");
    fanout_group.bench_function("channel_subscribers_full_drain", |b| {
        b.iter(|| {
            let delivered = runtime.block_on(fixture.publish_and_drain());
            assert_eq!(
                delivered, FANOUT_SUBSCRIBER_ROWS,
                "each publish should reach every subscriber"
            );
            black_box(delivered);
        });
    });
    fanout_group.finish();

    let mut identity_group = c.benchmark_group("identity");
    identity_group.bench_function("generate_rows", |b| {
        b.iter(|| {
            let ordered = generate_identity_rows(IDENTITY_ROWS);
            black_box(ordered);
        });
    });
    identity_group.finish();
}

criterion_group!(benches, fanout_criterion);
criterion_main!(benches);
