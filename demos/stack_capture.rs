//! Pooled stack capture example

use fieldlog::prelude::*;

fn main() {
    let pools = Pools::new();

    // First-frame capture: exactly one resolvable frame.
    let mut stack = pools.capture(0, Depth::First);
    if let Some(frame) = stack.next() {
        println!("caller: {} ({}:{})", frame.function, frame.file, frame.line);
    }
    drop(stack);

    // Full capture, rendered through a pooled formatter.
    let mut stack = pools.capture(0, Depth::Full);
    let mut formatter = pools.formatter();
    formatter.format_stack(&mut stack);
    println!("--- full stack ({} frames) ---", stack.count());
    println!("{}", formatter.as_str());
    drop(formatter);
    drop(stack);

    // Buffers were recycled, not discarded.
    println!(
        "idle stacks: {}, idle formatters: {}, captures: {}",
        pools.idle_stacks(),
        pools.idle_formatters(),
        pools.captures()
    );

    // One-liner convenience.
    let rendered = pools.take(0);
    println!("--- take() ---\n{}", rendered);
}
