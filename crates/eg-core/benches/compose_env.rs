//! Criterion benchmarks for `eg-core` composition and policed reads.
//!
//! Runtime sources are built in memory so results do not depend on the
//! process environment.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use eg_core::{EnvOptions, FieldDescriptor, RuntimeSource, Schema};

fn schemas(fields: usize) -> (Schema, Schema, RuntimeSource) {
    let mut server = Schema::new();
    let mut client = Schema::new();
    let mut source = RuntimeSource::new();
    for i in 0..fields {
        server.insert(format!("SERVER_{i}"), FieldDescriptor::integer().min(0.0));
        client.insert(format!("PUBLIC_{i}"), FieldDescriptor::url());
        source.insert(format!("SERVER_{i}"), i.to_string());
        source.insert(format!("PUBLIC_{i}"), format!("https://example.com/{i}"));
    }
    (server, client, source)
}

fn bench_compose(c: &mut Criterion) {
    let (server, client, source) = schemas(200);
    c.bench_function("compose_server_400_fields", |b| {
        b.iter(|| {
            let env = EnvOptions::new()
                .server(server.clone())
                .client(client.clone())
                .runtime_env(source.clone())
                .is_server(true)
                .create()
                .expect("composition succeeds");
            black_box(env)
        })
    });
}

fn bench_policed_reads(c: &mut Criterion) {
    let (server, client, source) = schemas(200);
    let env = EnvOptions::new()
        .server(server)
        .client(client)
        .runtime_env(source)
        .is_server(false)
        .on_invalid_access(|_| Ok(None))
        .create()
        .expect("composition succeeds");

    c.bench_function("client_reads_mixed", |b| {
        b.iter(|| {
            for i in 0..200 {
                black_box(env.get(&format!("PUBLIC_{i}")).ok());
                black_box(env.get(&format!("SERVER_{i}")).ok());
            }
        })
    });
}

criterion_group!(benches, bench_compose, bench_policed_reads);
criterion_main!(benches);
