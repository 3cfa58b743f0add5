use criterion::{Criterion, black_box, criterion_group, criterion_main};

use eras::content::model::StudyConfiguration;
use eras::content::{ContentRepository, QueryService};
use eras::session::study::answer_lines;

fn physics() -> StudyConfiguration {
    StudyConfiguration::new(
        "Physics",
        "B.Tech First Year",
        "Halliday & Resnick - Fundamentals of Physics",
        "Revision",
    )
}

fn bench_load(c: &mut Criterion) {
    c.bench_function("load embedded content pack", |b| {
        b.iter(|| ContentRepository::embedded())
    });
}

fn bench_lookups(c: &mut Criterion) {
    let Ok(repo) = ContentRepository::embedded() else {
        return;
    };
    let config = physics();

    c.bench_function("syllabus lookup", |b| {
        b.iter(|| repo.syllabus(black_box(&config)))
    });

    c.bench_function("all_concepts flatten", |b| {
        b.iter(|| repo.all_concepts(black_box(&config)))
    });

    c.bench_function("concept_details lookup", |b| {
        b.iter(|| repo.concept_details(black_box("concept1")))
    });
}

fn bench_answer_classification(c: &mut Criterion) {
    let Some(detail) = ContentRepository::embedded()
        .ok()
        .and_then(|repo| repo.concept_details("concept1"))
    else {
        return;
    };
    let long = detail
        .exam_answers
        .values()
        .map(|variant| variant.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    c.bench_function("classify exam answer lines", |b| {
        b.iter(|| answer_lines(black_box(&long)))
    });
}

criterion_group!(benches, bench_load, bench_lookups, bench_answer_classification);
criterion_main!(benches);
