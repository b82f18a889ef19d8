//! Save-pipeline benchmarks: normalization over a synthetic catalog and JSON encoding.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use cordata::data::normalize::{prepare_for_save, standardize};
use cordata::data::persistence::to_document_string;
use cordata::data::store::usecase_hash_id;
use cordata::data::translation::Translator;
use cordata::data::usecase::{Catalog, Dataset, GeoLevel, UseCase};

fn synthetic_catalog(size: usize) -> Catalog {
    let mut catalog = Catalog::empty("2025-01-01");
    for index in 0..size {
        let name = format!("Caso {index}");
        let mut record = UseCase {
            hash_id: usecase_hash_id(&name, "2025-01-01"),
            name,
            url: Some(String::new()),
            usecase_type: Some(vec!["bot".to_string()]),
            topics: Some(vec!["Saúde".to_string(), "Educação".to_string()]),
            authors: Some(vec!["Autora".to_string(), "Autor".to_string()]),
            datasets: vec![Dataset {
                data_url: Some("http://".to_string()),
                ..Dataset::default_dataset()
            }],
            record_date: "2025-01-01".to_string(),
            modified_date: "2025-01-01".to_string(),
            ..UseCase::default_record()
        };
        if index % 2 == 0 {
            record.geo_level = Some(GeoLevel::Municipalities);
            record.municipalities = Some(vec![
                "Autazes (AM)".to_string(),
                "Fonte Boa (AM)".to_string(),
                "Melgaço (PA)".to_string(),
            ]);
        } else {
            record.geo_level = Some(GeoLevel::Countries);
            record.countries = Some(vec!["Chile".to_string(), "Alemanha".to_string()]);
        }
        catalog.records.push(record);
    }
    catalog
}

fn bench_pipeline(c: &mut Criterion) {
    let translator =
        Translator::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/translations.csv"))
            .expect("bundled translation table should load");
    let catalog = synthetic_catalog(500);

    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(catalog.records.len() as u64));

    group.bench_function("standardize_500", |b| {
        b.iter_batched(
            || catalog.clone(),
            |mut working| {
                standardize(&mut working);
                black_box(working)
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("prepare_for_save_500", |b| {
        b.iter_batched(
            || catalog.clone(),
            |mut working| {
                prepare_for_save(&mut working, &translator, "2025-01-02")
                    .expect("synthetic catalog is translatable");
                black_box(working)
            },
            BatchSize::SmallInput,
        );
    });

    let mut prepared = catalog.clone();
    prepare_for_save(&mut prepared, &translator, "2025-01-02")
        .expect("synthetic catalog is translatable");
    group.bench_function("encode_document_500", |b| {
        b.iter(|| black_box(to_document_string(&prepared).expect("encodes")));
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
