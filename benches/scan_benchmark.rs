use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rapidscan::output::CsvReport;
use rapidscan::{EntryRecord, OsFileSystem, Scanner};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn create_test_directory_structure(dir: &Path, depth: usize, files_per_dir: usize) {
    if depth == 0 {
        return;
    }

    for i in 0..files_per_dir {
        let file_path = dir.join(format!("file_{}.txt", i));
        fs::write(&file_path, format!("Content of file {}", i)).unwrap();
    }

    for i in 0..3 {
        let subdir_path = dir.join(format!("subdir_{}", i));
        fs::create_dir_all(&subdir_path).unwrap();
        create_test_directory_structure(&subdir_path, depth - 1, files_per_dir);
    }
}

fn benchmark_scan_small_directory(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    // 3 levels deep, 5 files per directory
    create_test_directory_structure(root, 3, 5);

    c.bench_function("scan_small_directory", |b| {
        b.iter(|| {
            let mut rows: Vec<EntryRecord> = Vec::new();
            Scanner::new(&OsFileSystem).scan(black_box(root), &mut rows);
            rows
        })
    });
}

fn benchmark_scan_deep_directory(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    // 5 levels deep, 10 files per directory
    create_test_directory_structure(root, 5, 10);

    c.bench_function("scan_deep_directory", |b| {
        b.iter(|| {
            let mut rows: Vec<EntryRecord> = Vec::new();
            Scanner::new(&OsFileSystem).scan(black_box(root), &mut rows);
            rows
        })
    });
}

fn benchmark_scan_to_csv(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    create_test_directory_structure(root, 5, 10);

    c.bench_function("scan_to_csv", |b| {
        b.iter(|| {
            let mut report = CsvReport::new(Vec::new()).unwrap();
            Scanner::new(&OsFileSystem).scan(black_box(root), &mut report);
            report.finish().unwrap()
        })
    });
}

criterion_group!(
    benches,
    benchmark_scan_small_directory,
    benchmark_scan_deep_directory,
    benchmark_scan_to_csv
);
criterion_main!(benches);
