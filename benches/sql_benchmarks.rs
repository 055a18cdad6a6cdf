//! Benchmarks for litelens's query pipeline.
//!
//! Benchmarks cover:
//! - SQL resolution of SELECT and stacked WHERE chains, per dialect
//! - Column label extraction from hand-written SELECT text
//! - Catalog-backed `SELECT *` expansion against a real SQLite file
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use litelens::ast::{extract_columns, AnsiResolver, Projection, Resolver, SqliteResolver};
use litelens::db::{Database, SqliteDatabase};
use rusqlite::Connection;
use tempfile::NamedTempFile;

const SIMPLE_SELECT: &str = "SELECT id, name FROM users";

const WIDE_SELECT: &str = "SELECT id, name, email, created_at, updated_at, status, \
    country, city, street, postcode, phone, company, title, notes FROM customers";

const ALIASED_SELECT: &str =
    "select u.id as user_id, u.name label, count(o.id) n from users u join orders o on u.id = o.user_id";

const NOT_A_SELECT: &str = "UPDATE users SET name = 'x' WHERE id = 1";

fn seeded_file() -> NamedTempFile {
    let file = NamedTempFile::new().expect("create temp db file");
    let conn = Connection::open(file.path()).expect("open temp sqlite db");
    conn.execute_batch(
        "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, email TEXT, age INTEGER);
         CREATE TABLE orders (id INTEGER PRIMARY KEY, user_id INTEGER, total REAL);",
    )
    .expect("seed schema");
    file
}

fn bench_resolve(c: &mut Criterion) {
    let file = seeded_file();
    let dialects: [(&str, Box<dyn Resolver>); 2] =
        [("sqlite", Box::new(SqliteResolver)), ("ansi", Box::new(AnsiResolver))];

    let mut group = c.benchmark_group("resolve");
    for (name, resolver) in dialects {
        let db = SqliteDatabase::with_resolver(file.path(), resolver);
        let table = db.table("users").expect("users table");
        let select = table
            .select(Projection::columns(["id", "name", "email", "age"]))
            .expect("explicit select");

        group.bench_with_input(BenchmarkId::new("select", name), &select, |b, q| {
            b.iter(|| black_box(q).resolve())
        });

        for depth in [1usize, 4, 16] {
            let mut query = select.clone();
            for i in 0..depth {
                query = query.where_(format!("age > {}", i)).expect("where");
            }
            group.bench_with_input(
                BenchmarkId::new(format!("where_{}", name), depth),
                &query,
                |b, q| b.iter(|| black_box(q).resolve()),
            );
        }
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_columns");
    for (name, sql) in [
        ("simple", SIMPLE_SELECT),
        ("wide", WIDE_SELECT),
        ("aliased", ALIASED_SELECT),
        ("not_a_select", NOT_A_SELECT),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), sql, |b, sql| {
            b.iter(|| extract_columns(black_box(sql)))
        });
    }
    group.finish();
}

fn bench_catalog(c: &mut Criterion) {
    let file = seeded_file();
    let db = SqliteDatabase::open(file.path());
    let table = db.table("users").expect("users table");

    c.bench_function("select_all_expansion", |b| {
        b.iter(|| table.select(Projection::All).and_then(|q| q.resolve()))
    });
}

criterion_group!(benches, bench_resolve, bench_extract, bench_catalog);
criterion_main!(benches);
