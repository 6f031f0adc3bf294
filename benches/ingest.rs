use criterion::{Criterion, criterion_group, criterion_main};
use chartdeck::dataset::NewDataset;
use chartdeck::store::{DatasetStore, MemoryStore};
use chartdeck::{parse_csv, project_columns};
use std::hint::black_box;

fn generate_trips(rows: usize) -> String {
    let mut text = String::from("id,departed_on,destination,nights,cost");
    for i in 0..rows {
        let day = (i % 28) + 1;
        let destination = match i % 3 {
            0 => "Lisbon",
            1 => "Oslo",
            _ => "Lima",
        };
        text.push_str(&format!(
            "\n{i},2024-01-{day:02},{destination},{},{}",
            i % 9 + 1,
            (i * 37) % 2000
        ));
    }
    text
}

fn bench_ingest_and_project(c: &mut Criterion) {
    let text = generate_trips(50_000);

    c.bench_function("parse_csv_50k", |b| {
        b.iter(|| parse_csv(black_box(&text)).expect("parse csv"))
    });

    let parsed = parse_csv(&text).expect("parse csv");
    let dataset = MemoryStore::new()
        .create(NewDataset {
            name: "trips".to_string(),
            columns: parsed.columns,
            data: parsed.rows,
            owner_id: None,
        })
        .expect("create dataset");

    c.bench_function("project_columns_50k", |b| {
        b.iter(|| project_columns(black_box(&dataset), "nights", "cost"))
    });
}

criterion_group!(benches, bench_ingest_and_project);
criterion_main!(benches);
