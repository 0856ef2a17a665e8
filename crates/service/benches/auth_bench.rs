use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::{AuthService, TokenConfig, TokenIssuer};
use service::auth::domain::{LoginInput, SignupInput};
use service::repo::InMemoryRepository;

fn bench_login(c: &mut Criterion) {
    let repo = Arc::new(InMemoryRepository::default());
    let tokens = TokenIssuer::new(&TokenConfig { secret: "secret".into(), issuer: "recall".into(), lifetime_secs: 3600 });
    let svc = AuthService::new(repo, tokens);

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.signup(SignupInput::new("bench", "bench@example.com", "Bench", "User", "Benchmark1")));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let login = LoginInput { username: Some("bench".into()), password: "Benchmark1".into(), ..Default::default() };
            let session = rt.block_on(svc.login(login)).unwrap();
            svc.verify_token(&session.token).unwrap();
        });
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);
