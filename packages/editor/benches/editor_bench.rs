use blockmail_editor::{BlockPatch, Direction, Editor, EditorConfig, NoopHost, TextPatch};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn editor_with_blocks(count: usize) -> Editor {
    let mut editor = Editor::with_config(
        None,
        EditorConfig {
            max_history: 0,
            ..EditorConfig::default()
        },
        Box::new(NoopHost),
    );
    let types = ["text", "heading", "image", "button", "divider", "spacer", "columns", "social"];
    for i in 0..count {
        editor.add_block(types[i % types.len()]).unwrap();
    }
    editor
}

fn add_blocks(c: &mut Criterion) {
    c.bench_function("add_100_blocks", |b| {
        b.iter(|| editor_with_blocks(black_box(100)))
    });
}

fn update_text(c: &mut Criterion) {
    let mut editor = editor_with_blocks(200);
    let id = editor.add_block("text").unwrap();
    let mut n = 0u64;

    c.bench_function("update_text_in_200_block_document", |b| {
        b.iter(|| {
            n += 1;
            editor
                .update_block(
                    &id,
                    BlockPatch::Text(TextPatch {
                        content: Some(format!("<p>{}</p>", n)),
                    }),
                )
                .unwrap();
        })
    });
}

fn undo_redo(c: &mut Criterion) {
    let mut editor = editor_with_blocks(200);
    let first = editor.document().blocks[0].id.clone();
    editor.move_block(&first, Direction::Down).unwrap();

    c.bench_function("undo_redo_200_block_document", |b| {
        b.iter(|| {
            editor.undo().unwrap();
            editor.redo().unwrap();
        })
    });
}

criterion_group!(benches, add_blocks, update_text, undo_redo);
criterion_main!(benches);
