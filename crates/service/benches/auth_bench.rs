use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::repository::mock::MockAuthRepository;
use service::auth::domain::{RegisterInput, LoginInput};
use service::auth::{AuthConfig, AuthService};

fn config() -> AuthConfig {
    // production hashing parameters, so the numbers reflect real login cost
    AuthConfig { jwt_secret: "secret".into(), token_ttl_secs: 3600, argon2_memory_kib: 19 * 1024, argon2_iterations: 2 }
}

fn bench_login(c: &mut Criterion) {
    let repo = Arc::new(MockAuthRepository::default());
    let svc = AuthService::new(repo, config()).unwrap();

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.register(RegisterInput { email: "bench@example.com".into(), name: "Bench".into(), password: "Benchmark1".into() }));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.login(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() })).unwrap();
        });
    });

    let session = rt.block_on(svc.login(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() })).unwrap();
    c.bench_function("session_token_verify", |b| {
        b.iter(|| svc.tokens().verify(&session.token).unwrap());
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);
