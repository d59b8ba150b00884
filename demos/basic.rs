use effects::Future;
use std::thread;
use std::time::Duration;

fn main() {
    let message = Future::run(|| {
        // Do some background task here, eventually return the result.
        thread::sleep(Duration::from_millis(500));
        12345
    })
    .map(|intermediate| format!("the result is {intermediate}"))
    .result()
    .get();

    println!("{message}");
}
