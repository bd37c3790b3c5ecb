use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::favorites::FavoritesService;
use service::oracle::MemoryFileOracle;
use service::repository::Repository;
use service::storage::MemoryFavoritesStore;

fn bench_favorites(c: &mut Criterion) {
    let files: Vec<String> = (0..200).map(|i| format!("/bench/repo/file_{i}.txt")).collect();
    let store = Arc::new(MemoryFavoritesStore::new());
    let oracle = Arc::new(MemoryFileOracle::new(files));
    let svc = FavoritesService::new(store, oracle, Repository::new("/bench/repo"));

    // seed one user with a long list outside of the measured loop
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        for i in 0..200 {
            svc.add("bench", &format!("file_{i}.txt")).await.unwrap();
        }
    });

    c.bench_function("favorites_list", |b| {
        b.iter(|| rt.block_on(svc.list("bench")).unwrap());
    });

    c.bench_function("favorites_add_existing", |b| {
        b.iter(|| rt.block_on(svc.add("bench", "file_199.txt")).unwrap());
    });
}

criterion_group!(benches, bench_favorites);
criterion_main!(benches);
