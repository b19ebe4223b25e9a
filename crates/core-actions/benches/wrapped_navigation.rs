use core_actions::{EditWindow, LogNotifier, SharedText, WrapMode};
use core_events::{KeyCode, KeyEvent};
use core_search::Finder;
use core_state::{Clipboard, EditBuffer};
use criterion::{Criterion, criterion_group, criterion_main};
use std::cell::RefCell;
use std::hint::black_box;
use std::rc::Rc;

fn window(wrap: WrapMode) -> EditWindow {
    // long prose lines so every line wraps several times at 80 columns
    let line = "lorem ipsum dolor sit amet consectetur ".repeat(8);
    let body = vec![line; 5_000].join("\n");
    let text: SharedText = Rc::new(RefCell::new(EditBuffer::from_str("bench", &body)));
    let mut window = EditWindow::new(text, Clipboard::new(), Rc::new(RefCell::new(Finder::default())));
    window.set_notifier(Box::new(LogNotifier));
    window.resize(50, 80);
    window.set_wrap(wrap);
    window
}

fn page_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_walk");
    let down = KeyEvent::plain(KeyCode::PageDown);
    let up = KeyEvent::plain(KeyCode::PageUp);

    for (name, mode) in [("unwrapped", WrapMode::None), ("wrapped", WrapMode::Soft)] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || window(mode),
                |mut w| {
                    for _ in 0..200 {
                        black_box(w.process_key(&down));
                    }
                    for _ in 0..200 {
                        black_box(w.process_key(&up));
                    }
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn line_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_walk");
    let down = KeyEvent::plain(KeyCode::Down);

    group.bench_function("wrapped_down", |b| {
        b.iter_batched(
            || window(WrapMode::Soft),
            |mut w| {
                for _ in 0..2_000 {
                    black_box(w.process_key(&down));
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.bench_function("wrapped_resize", |b| {
        b.iter_batched(
            || window(WrapMode::Soft),
            |mut w| {
                for width in (40..120).step_by(8) {
                    w.resize(50, width);
                }
                black_box(w.scrollbar())
            },
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, page_walk, line_walk);
criterion_main!(benches);
