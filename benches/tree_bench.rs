use bytes_tree::{ByteCursor, ByteSink, FieldDescriptor, Schema, Tree};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

// ─── Test Data ──────────────────────────────────────────────────────────────

/// Header `[U8, U8]` followed by `[U8, S32, FLOAT, U32, MUABLE0(3)]`.
fn message_schema() -> Schema {
    Schema::from([
        FieldDescriptor::TREE,
        FieldDescriptor::U8,
        FieldDescriptor::S32,
        FieldDescriptor::FLOAT,
        FieldDescriptor::U32,
        FieldDescriptor::muable0(3),
    ])
}

fn header_schema() -> Schema {
    Schema::from([FieldDescriptor::U8, FieldDescriptor::U8])
}

fn make_binary() -> Vec<u8> {
    let mut sink = ByteSink::new();
    sink.append(1u8)
        .append(2u8)
        .append(3u8)
        .append(1i32)
        .append(3.0f32)
        .append(32u32)
        .append_string("123", "UTF-8")
        .unwrap();
    sink.into_inner()
}

fn make_parse_tree() -> Tree {
    let mut tree = Tree::new(message_schema());
    tree.set_child_tree(0, header_schema()).unwrap();
    tree
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 1: Sink and Cursor
// ═══════════════════════════════════════════════════════════════════════════

fn bench_sink_cursor(c: &mut Criterion) {
    let mut group = c.benchmark_group("sink_cursor");

    group.bench_function("ByteSink::append (message)", |b| b.iter(|| black_box(make_binary())));

    let binary = make_binary();
    group.bench_function("ByteCursor::read (message)", |b| {
        b.iter(|| {
            let mut cursor = ByteCursor::new(black_box(&binary));
            let header = (cursor.u8().unwrap(), cursor.u8().unwrap(), cursor.u8().unwrap());
            let body = (cursor.i32().unwrap(), cursor.f32().unwrap(), cursor.u32().unwrap());
            black_box((header, body, cursor.get_string(3, "UTF-8").unwrap()))
        })
    });

    group.finish();
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 2: Tree Reads
// ═══════════════════════════════════════════════════════════════════════════

fn bench_tree_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_reads");
    group.sample_size(500);

    let binary = make_binary();
    let mut tree = make_parse_tree();
    tree.parse(binary.clone());

    group.bench_function("Tree::parse", |b| {
        let mut tree = make_parse_tree();
        b.iter(|| {
            tree.parse(black_box(binary.clone()));
        })
    });

    group.bench_function("Tree::get_s32", |b| b.iter(|| black_box(tree.get_s32(black_box(2)))));

    group.bench_function("Tree::get_float", |b| {
        b.iter(|| black_box(tree.get_float(black_box(3))))
    });

    group.bench_function("Tree::get_string", |b| {
        b.iter(|| black_box(tree.get_string(black_box(5), "UTF-8")))
    });

    group.bench_function("Tree::get_child_tree + get_u8", |b| {
        b.iter(|| black_box(tree.get_child_tree(0).and_then(|child| child.get_u8(1))))
    });

    group.finish();
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 3: Tree Writes
// ═══════════════════════════════════════════════════════════════════════════

fn bench_tree_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_writes");
    group.sample_size(500);

    let mut tree = make_parse_tree();
    tree.parse(make_binary());

    group.bench_function("Tree::set_s32", |b| {
        b.iter(|| {
            tree.set_s32(2, black_box(7)).unwrap();
        })
    });

    group.bench_function("Tree::set_string", |b| {
        b.iter(|| {
            tree.set_string(5, black_box("abc"), "UTF-8").unwrap();
        })
    });

    group.bench_function("Tree::to_bytes", |b| b.iter(|| black_box(tree.to_bytes().unwrap())));

    group.bench_function("build message from scratch", |b| {
        b.iter(|| {
            let mut header = Tree::new(header_schema());
            header.set_u8(0, 1).unwrap().set_u8(1, 2).unwrap();
            let mut tree = Tree::new(message_schema());
            tree.set_child_tree(0, header)
                .unwrap()
                .set_u8(1, 3)
                .unwrap()
                .set_s32(2, 1)
                .unwrap()
                .set_float(3, 3.0)
                .unwrap()
                .set_u32(4, 32)
                .unwrap()
                .set_string(5, "123", "UTF-8")
                .unwrap();
            black_box(tree.to_bytes().unwrap())
        })
    });

    group.finish();
}

// ─── Criterion Main ─────────────────────────────────────────────────────────

criterion_group!(benches, bench_sink_cursor, bench_tree_reads, bench_tree_writes);
criterion_main!(benches);
