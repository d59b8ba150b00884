use effects::{Future, Try};
use std::thread;
use std::time::Duration;

fn fetch(id: i32) -> Future<i32> {
    Future::run(move || {
        thread::sleep(Duration::from_millis(100 * id as u64));
        id * 10
    })
}

fn main() {
    // Dependent lookups: the second fetch starts once the first resolves.
    let chained = fetch(1).flat_map(|first| fetch(first / 5));
    println!("chained lookup resolved to {:?}", chained.result().get());

    // Independent lookups run concurrently; the aggregate keeps input order.
    let combined = Future::traverse(vec![fetch(3), fetch(1), fetch(2)]);
    combined.on_complete(|result| match result {
        Try::Success(values) => println!("combined: {values:?}"),
        Try::Failure(error) => println!("combined failed: {error}"),
    });

    // the subscriber above runs on a dispatch thread; give it time to report
    thread::sleep(Duration::from_millis(700));
}
